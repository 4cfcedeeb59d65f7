use crate::domain::record::{Candidate, NewRecord};
use std::fmt;

/// Why a candidate was refused by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub field: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Normalizes a candidate into a record ready for insertion.
///
/// Whitespace-only text counts as empty. Accepted text is kept exactly as given and
/// `numeric_attribute` passes through untouched (absent stays absent).
pub fn validate(candidate: Candidate) -> Result<NewRecord, Rejection> {
    let primary_text = required(candidate.primary_text, "primary_text")?;
    let secondary_text = required(candidate.secondary_text, "secondary_text")?;
    Ok(NewRecord {
        primary_text,
        secondary_text,
        numeric_attribute: candidate.numeric_attribute,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Rejection> {
    match value {
        None => Err(Rejection {
            field,
            reason: "is missing",
        }),
        Some(text) if text.trim().is_empty() => Err(Rejection {
            field,
            reason: "is empty",
        }),
        Some(text) => Ok(text),
    }
}
