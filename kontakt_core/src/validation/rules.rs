//! Reusable field rules for `#[derive(Validate)]`

use validator::ValidationError;

/// Rejects empty and whitespace-only values.
pub fn not_blank(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Jana").is_ok());
        assert!(not_blank(" x ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("\t\n").is_err());
    }
}
