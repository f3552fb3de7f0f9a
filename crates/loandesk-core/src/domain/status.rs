//! Loan status label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review status of a loan application.
///
/// There is no transition table: the administrator may overwrite any status
/// with any other status, any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Freshly submitted, not yet looked at.
    #[default]
    Pending,

    /// Documents checked by the administrator.
    Verified,

    Approved,

    Rejected,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 4] = [
        LoanStatus::Pending,
        LoanStatus::Verified,
        LoanStatus::Approved,
        LoanStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LoanStatus::Pending => "PENDING",
            LoanStatus::Verified => "VERIFIED",
            LoanStatus::Approved => "APPROVED",
            LoanStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown loan status {0:?} (expected PENDING, VERIFIED, APPROVED or REJECTED)")]
pub struct ParseStatusError(pub String);

impl FromStr for LoanStatus {
    type Err = ParseStatusError;

    /// Case-insensitive, so `approved` from a CLI flag works too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoanStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
