//! Input validation utilities
//!
//! Only presence is checked. Email format and password strength are left
//! to the client on purpose, matching the deliberately lax scope of the
//! registration flow.

/// Require a non-empty value for a named form field
pub fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }

    Ok(())
}
