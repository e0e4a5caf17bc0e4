//! Request DTOs for the record API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::records::RecordFields;

/// Longest accepted `name` or `email`, in bytes
pub const MAX_FIELD_LENGTH: usize = 256;

/// Request body for create (POST /records) and update (PUT /records/:id)
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRequest {
    pub name: String,
    pub email: String,
}

impl RecordRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.email.trim().is_empty() {
            return Some("Email cannot be empty".to_string());
        }
        if !self.email.contains('@') {
            return Some("Email must contain '@'".to_string());
        }
        if self.name.len() > MAX_FIELD_LENGTH || self.email.len() > MAX_FIELD_LENGTH {
            return Some(format!(
                "Fields cannot exceed {} bytes",
                MAX_FIELD_LENGTH
            ));
        }
        None
    }
}

impl From<RecordRequest> for RecordFields {
    fn from(req: RecordRequest) -> Self {
        RecordFields::new(req.name, req.email)
    }
}

/// Query string for GET /records
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Page size, defaults to the configured page limit
    #[serde(default)]
    pub limit: Option<usize>,
    /// Number of records to skip
    #[serde(default)]
    pub offset: Option<usize>,
}

impl ListQuery {
    /// Effective `(limit, offset)` with the limit clamped to `max_limit`.
    pub fn window(&self, default_limit: usize, max_limit: usize) -> (usize, usize) {
        let limit = self.limit.unwrap_or(default_limit).min(max_limit);
        (limit, self.offset.unwrap_or(0))
    }
}
