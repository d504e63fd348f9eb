//! Lead records and their status pipeline

use crate::error::LeadError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned lead identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub u64);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a lead in the sales pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    #[serde(rename = "Closed-Won")]
    ClosedWon,
    #[serde(rename = "Closed-Lost")]
    ClosedLost,
}

impl LeadStatus {
    /// Every status in pipeline order
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::ClosedWon,
        LeadStatus::ClosedLost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::ClosedWon => "Closed-Won",
            Self::ClosedLost => "Closed-Lost",
        }
    }

    /// Next status in pipeline order (wraps around)
    pub fn next(&self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous status in pipeline order (wraps around)
    pub fn prev(&self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeadStatus {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .into_iter()
            .find(|status| status.label().to_ascii_lowercase() == normalized)
            .ok_or_else(|| {
                LeadError::validation(format!(
                    "'{}' is not a valid status (expected one of: {})",
                    s.trim(),
                    Self::ALL.map(|s| s.label()).join(", ")
                ))
            })
    }
}

/// A lead as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub company: String,
    pub email: String,
    pub value: u64,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

/// Unsaved lead fields, sent to the store on creation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Draft {
    pub company: String,
    pub email: String,
    pub value: u64,
    pub status: LeadStatus,
}

impl Draft {
    /// Presence and shape checks shared by the client and the in-process store
    pub fn validate(&self) -> Result<(), LeadError> {
        if self.company.trim().is_empty() {
            return Err(LeadError::validation("Company name is required"));
        }
        if self.email.trim().is_empty() {
            return Err(LeadError::validation("Email is required"));
        }
        if !is_valid_email(&self.email) {
            return Err(LeadError::validation(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }
        Ok(())
    }

    /// Copy with surrounding whitespace removed
    pub fn normalized(&self) -> Self {
        Self {
            company: self.company.trim().to_string(),
            email: self.email.trim().to_string(),
            value: self.value,
            status: self.status,
        }
    }
}

/// Basic syntactic email check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Format an annual value with thousands separators
pub fn format_value(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
