//! Required-field validation for fetched entities
//!
//! Validation is a pure decision: [`Validate::missing_fields`] reports which
//! required fields are absent and the orchestrator does the logging. The
//! check uses loose truthiness inherited from the upstream business rule: a
//! field counts as missing when it is absent, an empty string, or numeric
//! zero. That policy is preserved bit-for-bit, so a legitimate `id: 0` is
//! classified as invalid; see the dedicated test below.

use crate::types::{Comment, Post, User};

/// Pure required-field check for one entity kind
pub trait Validate {
    /// Entity kind name used in skip diagnostics ("user", "post", "comment")
    const KIND: &'static str;

    /// Names of required fields that are missing under the loose-truthiness
    /// policy. Empty means the entity is valid.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// The entity's id for diagnostics, if it has one (zero counts as absent)
    fn id_for_log(&self) -> Option<u64>;

    /// True when every required field is present
    fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Loose truthiness for numeric ids: zero counts as missing.
fn present_id(id: u64) -> bool {
    id != 0
}

/// Loose truthiness for strings: empty counts as missing.
fn present_str(s: &str) -> bool {
    !s.is_empty()
}

impl Validate for User {
    const KIND: &'static str = "user";

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !present_id(self.id) {
            missing.push("id");
        }
        if !present_str(&self.name) {
            missing.push("name");
        }
        missing
    }

    fn id_for_log(&self) -> Option<u64> {
        present_id(self.id).then_some(self.id)
    }
}

impl Validate for Post {
    const KIND: &'static str = "post";

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !present_id(self.id) {
            missing.push("id");
        }
        if !present_str(&self.title) {
            missing.push("title");
        }
        missing
    }

    fn id_for_log(&self) -> Option<u64> {
        present_id(self.id).then_some(self.id)
    }
}

impl Validate for Comment {
    const KIND: &'static str = "comment";

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !present_id(self.id) {
            missing.push("id");
        }
        if !present_str(&self.body) {
            missing.push("body");
        }
        if !present_str(&self.email) {
            missing.push("email");
        }
        missing
    }

    fn id_for_log(&self) -> Option<u64> {
        present_id(self.id).then_some(self.id)
    }
}
