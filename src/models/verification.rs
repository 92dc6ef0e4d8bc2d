use crate::utils::colors::{GREEN, RED, RESET, YELLOW};
use std::fmt;

pub const DO_NOT_VERIFIED: &str = "DO Not Verified";
pub const NOT_VERIFIED: &str = "Not Verified";
pub const VERIFIED: &str = "Verified";

/// DO-verification state as carried in `doVerified` / `verifiedBy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    NotVerified,
    Pending(String),
}

impl VerificationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            VERIFIED => VerificationStatus::Verified,
            "" | DO_NOT_VERIFIED | NOT_VERIFIED => VerificationStatus::NotVerified,
            other => VerificationStatus::Pending(other.to_string()),
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationStatus::Verified)
    }

    pub fn colored(&self) -> String {
        let color = match self {
            VerificationStatus::Verified => GREEN,
            VerificationStatus::NotVerified => RED,
            VerificationStatus::Pending(_) => YELLOW,
        };
        format!("{color}{self}{RESET}")
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Verified => f.write_str(VERIFIED),
            VerificationStatus::NotVerified => f.write_str(DO_NOT_VERIFIED),
            VerificationStatus::Pending(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown() {
        assert!(VerificationStatus::parse("Verified").is_verified());
        assert_eq!(
            VerificationStatus::parse("DO Not Verified"),
            VerificationStatus::NotVerified
        );
        assert_eq!(VerificationStatus::parse(""), VerificationStatus::NotVerified);
        assert_eq!(
            VerificationStatus::parse("Ali Khan"),
            VerificationStatus::Pending("Ali Khan".into())
        );
    }
}
