//! Validation rules for submitted monthly reports.
//!
//! Plain functions returning `Result<(), String>`; handlers map the
//! message into a 400 response.

use crate::category::{Category, CategoryCounts};

/// Maximum length of the descriptive fields (month, worker, area, church).
pub const MAX_DESCRIPTIVE_FIELD_LENGTH: usize = 100;

/// Validate a descriptive field: non-blank and within the length limit.
pub fn validate_descriptive_field(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{name} cannot be empty"));
    }
    if value.chars().count() > MAX_DESCRIPTIVE_FIELD_LENGTH {
        return Err(format!(
            "{name} exceeds maximum length of {MAX_DESCRIPTIVE_FIELD_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a narrative field: non-blank, no length cap.
pub fn validate_narrative_field(name: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{name} cannot be empty"));
    }
    Ok(())
}

/// Validate that every required-at-creation category carries at least
/// one count entry.
pub fn validate_required_categories(counts: &CategoryCounts) -> Result<(), String> {
    for category in Category::ALL {
        if category.required_at_creation() && counts.sequence(category).is_empty() {
            return Err(format!("{} is required", category.key()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
