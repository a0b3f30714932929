use crate::{Error, Result};

/// Treats missing and blank values alike.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn require(value: Option<String>, reason: &str) -> Result<String> {
    present(value).ok_or_else(|| Error::InvalidInput {
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_missing_and_blank() {
        assert!(require(None, "User ID is required").is_err());
        assert!(require(Some("   ".to_string()), "User ID is required").is_err());
        assert_eq!(
            require(Some("u1".to_string()), "User ID is required").unwrap(),
            "u1"
        );
    }

    #[test]
    fn test_require_carries_reason() {
        match require(None, "Email is required") {
            Err(Error::InvalidInput { reason }) => assert_eq!(reason, "Email is required"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
