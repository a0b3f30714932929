use chrono::{DateTime, Duration, Utc};
use lazy_regex::regex_is_match;
use rand::Rng;

/// How long an issued passcode stays valid.
pub const OTP_TTL_MINUTES: i64 = 10;

pub fn otp_ttl() -> Duration {
    Duration::minutes(OTP_TTL_MINUTES)
}

/// Uniformly random 6-digit code, zero padded.
pub fn generate_otp() -> String {
    let code: u32 = rand::rng().random_range(0..1_000_000);
    format!("{code:06}")
}

pub fn is_valid_email(email: &str) -> bool {
    regex_is_match!(r"^[\w.-]+@[\w.-]+\.\w+$", email)
}

pub fn is_expired(issued_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - issued_at > otp_ttl()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_shape() {
        for _ in 0..200 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last-1@mail.example.co"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user name@example.com"));
    }

    #[test]
    fn test_expiry_boundary() {
        let issued = Utc::now();

        assert!(!is_expired(issued, issued));
        assert!(!is_expired(issued, issued + Duration::minutes(10)));
        assert!(is_expired(issued, issued + Duration::minutes(10) + Duration::seconds(1)));
    }
}
