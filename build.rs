fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_file = "proto/leads.proto";

    // Tell cargo to recompile if the proto file changes
    println!("cargo:rerun-if-changed={}", proto_file);

    // The server half backs the in-process store used by the client tests
    tonic_build::configure()
        .build_server(true)
        .compile_protos(&[proto_file], &["proto"])?;

    Ok(())
}
