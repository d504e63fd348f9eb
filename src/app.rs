//! Application state and core logic

use crate::config::TuiConfig;
use crate::error::LeadError;
use crate::service::LeadService;
use crate::state::{
    report_error, AppState, Form, FormButton, Lead, LeadId, LeadStatus, NotificationSink,
    PendingRowAction, RowAction, Severity, StatusSelection, SubmitRequest, ToastSink, View,
};
use crate::store::LeadFeed;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::future::Future;
use std::time::Instant;
use tokio::sync::mpsc;

/// Result of a remote call, delivered back to the UI loop
#[derive(Debug)]
pub enum Completion {
    Listed(Result<Vec<Lead>, LeadError>),
    Subscribed(Result<LeadFeed, LeadError>),
    Created {
        company: String,
        result: Result<LeadId, LeadError>,
    },
    StatusUpdated {
        company: String,
        status: String,
        result: Result<(), LeadError>,
    },
    Deleted {
        company: String,
        result: Result<(), LeadError>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Toast shown over the current view
    pub toasts: ToastSink,
    service: LeadService,
    config: TuiConfig,
    /// Live lead list, once subscribed
    feed: Option<LeadFeed>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(service: LeadService, config: TuiConfig, store_address: String) -> Self {
        let mut state = AppState::new(store_address, config.confirm_deletes());
        state.table.sort_field = config.sort_field();
        state.table.sort_direction = config.sort_direction();
        state.table.status_filter = config.status_filter();

        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            state,
            toasts: ToastSink::new(config.toast_duration()),
            service,
            config,
            feed: None,
            completions_tx,
            completions_rx,
            quit: false,
        }
    }

    /// Load the lead list and open the live subscription
    pub fn connect(&mut self) {
        self.refresh();
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Per-frame housekeeping: expire toasts, apply feed updates, drain completions
    pub fn tick(&mut self, now: Instant) {
        self.toasts.prune(now);
        self.poll_feed();
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.handle_completion(completion);
        }
    }

    /// Remember sort and filter choices in the config file
    pub fn save_preferences(&mut self) -> Result<()> {
        let table = &self.state.table;
        self.config
            .remember_view(table.sort_field, table.sort_direction, table.status_filter);
        self.config.save()
    }

    /// Run a remote call in the background and report its completion to the UI loop
    fn dispatch<F>(&mut self, call: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.state.in_flight += 1;
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            // The receiver only goes away on shutdown
            let _ = tx.send(call.await);
        });
    }

    /// Reload the list, resubscribing if the live feed was lost
    fn refresh(&mut self) {
        let service = self.service.clone();
        self.dispatch(async move { Completion::Listed(service.list_leads().await) });

        if self.feed.is_none() {
            let service = self.service.clone();
            self.dispatch(async move { Completion::Subscribed(service.subscribe().await) });
        }
    }

    fn poll_feed(&mut self) {
        let Some(feed) = self.feed.as_mut() else {
            return;
        };

        match feed.has_changed() {
            Ok(true) => {
                let leads = feed.borrow_and_update().clone();
                self.state.table.apply_snapshot(leads);
            }
            Ok(false) => {}
            Err(_) => {
                // The sender may have published a last snapshot before closing
                let leads = feed.borrow().clone();
                self.state.table.apply_snapshot(leads);
                tracing::warn!("Live lead feed closed");
                self.feed = None;
                self.state.store_connected = false;
                self.toasts.notify(
                    "Live Updates Stopped",
                    "Lost the connection to the lead store. Press r to reconnect.",
                    Severity::Warning,
                );
            }
        }
    }

    /// Apply the outcome of a remote call
    pub fn handle_completion(&mut self, completion: Completion) {
        self.state.in_flight = self.state.in_flight.saturating_sub(1);

        match completion {
            Completion::Listed(Ok(leads)) => {
                self.state.store_connected = true;
                // Once subscribed the table follows the feed; a list may predate its latest snapshot
                if self.feed.is_none() {
                    self.state.table.apply_snapshot(leads);
                }
            }
            Completion::Listed(Err(err)) => {
                self.state.store_connected = false;
                report_error(&mut self.toasts, "Load leads", &err);
            }
            Completion::Subscribed(Ok(mut feed)) => {
                self.state.store_connected = true;
                let leads = feed.borrow_and_update().clone();
                self.state.table.apply_snapshot(leads);
                self.feed = Some(feed);
            }
            Completion::Subscribed(Err(err)) => {
                self.state.store_connected = false;
                report_error(&mut self.toasts, "Subscribe", &err);
            }
            Completion::Created { company, result } => match result {
                Ok(id) => {
                    let still_open = self.state.form.finish_submit(true);
                    self.toasts.notify(
                        "Lead Created",
                        &format!("{company} was added as {id}"),
                        Severity::Success,
                    );
                    // A draft started after this one keeps the form open
                    if still_open && self.state.current_view == View::LeadCreate {
                        self.state.current_view = View::Leads;
                    }
                }
                Err(err) => {
                    self.state.form.finish_submit(false);
                    report_error(&mut self.toasts, "Create lead", &err);
                }
            },
            Completion::StatusUpdated {
                company,
                status,
                result,
            } => match result {
                Ok(()) => self.toasts.notify(
                    "Status Updated",
                    &format!("{company} is now {status}"),
                    Severity::Success,
                ),
                Err(err) => report_error(&mut self.toasts, "Update status", &err),
            },
            Completion::Deleted { company, result } => match result {
                Ok(()) => self.toasts.notify(
                    "Lead Deleted",
                    &format!("{company} was removed"),
                    Severity::Success,
                ),
                Err(err) => report_error(&mut self.toasts, "Delete lead", &err),
            },
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Row action dialogs are modal
        if self.state.has_modal() {
            self.handle_dialog_key(key);
            return Ok(());
        }

        match self.state.current_view {
            View::Leads => self.handle_leads_key(key),
            View::LeadCreate => self.handle_lead_create_key(key),
        }
        Ok(())
    }

    fn handle_leads_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.table.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.table.move_selection_up(),
            KeyCode::Char('n') => self.state.open_form(),
            KeyCode::Char('s') | KeyCode::Enter => self.begin_row_action(RowAction::UpdateStatus),
            KeyCode::Char('d') | KeyCode::Delete => self.begin_row_action(RowAction::Delete),
            KeyCode::Char('o') => self.state.table.cycle_sort_field(),
            KeyCode::Char('O') => self.state.table.toggle_sort_direction(),
            KeyCode::Char('f') => self.state.table.cycle_status_filter(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('x') => self.toasts.dismiss(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn begin_row_action(&mut self, action: RowAction) {
        let Some(lead) = self.state.table.selected() else {
            self.toasts
                .notify("No Lead Selected", "Select a lead first", Severity::Warning);
            return;
        };

        let pending = action.begin(lead);
        match pending {
            PendingRowAction::Delete(delete) if !self.state.confirm_deletes => {
                self.delete_lead(delete.lead_id, delete.company);
            }
            pending => self.state.pending_action = Some(pending),
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.state.pending_action.as_mut() else {
            return;
        };

        match pending {
            PendingRowAction::Delete(delete) => match key.code {
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Tab
                | KeyCode::BackTab => delete.toggle(),
                KeyCode::Enter => {
                    let confirmed = delete.selected_option;
                    let (id, company) = (delete.lead_id, delete.company.clone());
                    self.state.pending_action = None;
                    if confirmed {
                        self.delete_lead(id, company);
                    }
                }
                KeyCode::Char('y') => {
                    let (id, company) = (delete.lead_id, delete.company.clone());
                    self.state.pending_action = None;
                    self.delete_lead(id, company);
                }
                KeyCode::Char('n') | KeyCode::Esc => self.state.pending_action = None,
                _ => {}
            },
            PendingRowAction::UpdateStatus(picker) => {
                let selection = match key.code {
                    KeyCode::Up => return picker.move_up(),
                    KeyCode::Down => return picker.move_down(),
                    KeyCode::Backspace => return picker.pop_filter(),
                    KeyCode::Char(c) => return picker.push_filter(c),
                    KeyCode::Esc => picker.cancel(),
                    KeyCode::Enter => picker.resolve(),
                    _ => return,
                };

                match selection {
                    StatusSelection::Selected(status) => {
                        let (id, company) = (picker.lead_id, picker.company.clone());
                        self.state.pending_action = None;
                        self.update_status(id, company, status.label().to_string());
                    }
                    StatusSelection::Invalid(input) => {
                        picker.filter.clear();
                        picker.selected_index = picker.current.position();
                        self.toasts.notify(
                            "Invalid Status",
                            &format!(
                                "'{input}' is not a lead status. Choose one of: {}",
                                status_choices()
                            ),
                            Severity::Warning,
                        );
                    }
                    // Dismissing the picker is not an error
                    StatusSelection::Cancelled => self.state.pending_action = None,
                }
            }
        }
    }

    fn handle_lead_create_key(&mut self, key: KeyEvent) {
        let on_buttons = self.state.form.is_buttons_row_active();
        let on_status = self.state.form.is_status_field_active();

        match key.code {
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) =>
            {
                self.submit_form();
            }
            KeyCode::Esc => self.state.close_form(),
            // Button row
            KeyCode::Left | KeyCode::Up if on_buttons => self.state.form.prev_button(),
            KeyCode::Right | KeyCode::Down if on_buttons => self.state.form.next_button(),
            KeyCode::Enter if on_buttons => match self.state.form.selected_button() {
                FormButton::Create => self.submit_form(),
                FormButton::Cancel => self.state.close_form(),
            },
            // Status picklist
            KeyCode::Left if on_status => self.state.form.status.cycle_status(false),
            KeyCode::Right | KeyCode::Char(' ') if on_status => {
                self.state.form.status.cycle_status(true)
            }
            KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Down | KeyCode::Enter => self.state.form.next_field(),
            // Text input
            KeyCode::Char(c) if !on_buttons && !on_status => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace if !on_buttons => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    /// Validate the draft and hand it to the store; a second submit while one
    /// is in flight is ignored
    fn submit_form(&mut self) {
        match self.state.form.begin_submit() {
            SubmitRequest::Ready(draft) => {
                let service = self.service.clone();
                let company = draft.company.clone();
                self.dispatch(async move {
                    Completion::Created {
                        company,
                        result: service.create_lead(draft).await,
                    }
                });
            }
            SubmitRequest::Rejected(err) => report_error(&mut self.toasts, "Create lead", &err),
            SubmitRequest::Busy => tracing::debug!("Create already in flight, ignoring submit"),
        }
    }

    fn update_status(&mut self, id: LeadId, company: String, status: String) {
        let service = self.service.clone();
        self.dispatch(async move {
            let result = service.update_status(id, &status).await;
            Completion::StatusUpdated {
                company,
                status,
                result,
            }
        });
    }

    fn delete_lead(&mut self, id: LeadId, company: String) {
        let service = self.service.clone();
        self.dispatch(async move {
            Completion::Deleted {
                company,
                result: service.delete_lead(id).await,
            }
        });
    }

    /// Wait for the next remote call to finish and apply it
    #[cfg(test)]
    async fn settle(&mut self) {
        if let Some(completion) = self.completions_rx.recv().await {
            self.handle_completion(completion);
        }
    }
}

fn status_choices() -> String {
    LeadStatus::ALL
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}
