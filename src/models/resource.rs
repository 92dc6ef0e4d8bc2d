use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Record collections exposed by the compliance API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Resource {
    Attendance,
    SafetyTalk,
    TruckerTalk,
    EmptyBag,
    Stationary,
    SpotCheck,
    QuarterlySpotCheck,
}

impl Resource {
    /// Collection path, e.g. `/api/empty-bag-record`.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Attendance => "/api/attendance",
            Resource::SafetyTalk => "/api/safety-talk",
            Resource::TruckerTalk => "/api/safety-talk-trucker",
            Resource::EmptyBag => "/api/empty-bag-record",
            Resource::Stationary => "/api/pre-number-stationary-record",
            Resource::SpotCheck => "/api/spot-check",
            Resource::QuarterlySpotCheck => "/api/quarterly-spot-check",
        }
    }

    /// The signed-in user's own records.
    pub fn my_path(&self) -> String {
        match self {
            Resource::Attendance => format!("{}/my?page=1&limit=1000", self.path()),
            _ => format!("{}/my", self.path()),
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }

    pub fn verify_path(&self, id: &str) -> String {
        format!("{}/verify/{}", self.path(), id)
    }

    /// Whether a rejected PUT on verify may be retried once as PATCH.
    pub fn verify_patch_fallback(&self) -> bool {
        matches!(self, Resource::QuarterlySpotCheck)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resource::Attendance => "attendance",
            Resource::SafetyTalk => "safety talk (labours)",
            Resource::TruckerTalk => "safety talk (truckers)",
            Resource::EmptyBag => "empty bag record",
            Resource::Stationary => "pre-number stationary record",
            Resource::SpotCheck => "weekly spot check",
            Resource::QuarterlySpotCheck => "quarterly spot check",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(
            Resource::Attendance.my_path(),
            "/api/attendance/my?page=1&limit=1000"
        );
        assert_eq!(Resource::EmptyBag.my_path(), "/api/empty-bag-record/my");
        assert_eq!(
            Resource::QuarterlySpotCheck.verify_path("42"),
            "/api/quarterly-spot-check/verify/42"
        );
        assert_eq!(Resource::Stationary.item_path("x"), "/api/pre-number-stationary-record/x");
        assert!(Resource::QuarterlySpotCheck.verify_patch_fallback());
        assert!(!Resource::SpotCheck.verify_patch_fallback());
    }
}
