//! Record Module
//!
//! The application entity held by the authoritative store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, assigned on create and never reused
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied attributes of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub name: String,
    pub email: String,
}

impl RecordFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Record {
    /// Builds a fresh record stamped with the current time.
    pub(crate) fn create(id: u64, fields: RecordFields) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: fields.name,
            email: fields.email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the attributes and bumps `updated_at`. Identity is kept.
    pub(crate) fn apply(&mut self, fields: RecordFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.updated_at = Utc::now();
    }
}
