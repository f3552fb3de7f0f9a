//! Aggregate statistics for the administrator view.

use serde::{Deserialize, Serialize};

use super::application::LoanApplication;
use super::status::LoanStatus;

/// Per-status counters, same shape as the status enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub verified: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn get(&self, status: LoanStatus) -> usize {
        match status {
            LoanStatus::Pending => self.pending,
            LoanStatus::Verified => self.verified,
            LoanStatus::Approved => self.approved,
            LoanStatus::Rejected => self.rejected,
        }
    }

    fn bump(&mut self, status: LoanStatus) {
        match status {
            LoanStatus::Pending => self.pending += 1,
            LoanStatus::Verified => self.verified += 1,
            LoanStatus::Approved => self.approved += 1,
            LoanStatus::Rejected => self.rejected += 1,
        }
    }
}

/// Snapshot computed from scratch over an application set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: usize,
    pub counts: StatusCounts,
    pub average_amount: f64,
    /// Percentage of approved applications, two decimals.
    pub approval_rate: f64,
}

impl ApplicationStats {
    /// An empty set divides by 1, so every ratio comes out as 0.
    pub fn compute(applications: &[LoanApplication]) -> Self {
        let mut counts = StatusCounts::default();
        let mut sum = 0.0;
        for application in applications {
            counts.bump(application.status);
            sum += application.amount;
        }

        let total = applications.len();
        let denominator = total.max(1) as f64;
        let approval_rate = round2(counts.approved as f64 / denominator * 100.0);

        Self {
            total,
            counts,
            average_amount: sum / denominator,
            approval_rate,
        }
    }

    pub fn count_by_status(&self, status: LoanStatus) -> usize {
        self.counts.get(status)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, ApplicationId};
    use chrono::Utc;
    use rstest::rstest;
    use ulid::Ulid;

    fn loan(amount: f64, status: LoanStatus) -> LoanApplication {
        LoanApplication {
            id: ApplicationId::from_ulid(Ulid::new()),
            account_id: AccountId::from_ulid(Ulid::new()),
            full_name: "Test".to_string(),
            amount,
            tenure: 12,
            reason: "r".to_string(),
            employment_status: "e".to_string(),
            employment_address: "a".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_set_is_all_zero() {
        let stats = ApplicationStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_amount, 0.0);
        assert_eq!(stats.approval_rate, 0.0);
        assert_eq!(stats.counts, StatusCounts::default());
    }

    #[test]
    fn two_of_three_approved() {
        let loans = vec![
            loan(100.0, LoanStatus::Approved),
            loan(300.0, LoanStatus::Approved),
            loan(200.0, LoanStatus::Rejected),
        ];
        let stats = ApplicationStats::compute(&loans);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.count_by_status(LoanStatus::Approved), 2);
        assert_eq!(stats.count_by_status(LoanStatus::Rejected), 1);
        assert_eq!(stats.count_by_status(LoanStatus::Pending), 0);
        assert_eq!(stats.average_amount, 200.0);
        assert_eq!(stats.approval_rate, 66.67);
    }

    #[rstest]
    #[case::none_approved(&[LoanStatus::Pending, LoanStatus::Verified], 0.0)]
    #[case::all_approved(&[LoanStatus::Approved, LoanStatus::Approved], 100.0)]
    #[case::one_of_three(&[LoanStatus::Approved, LoanStatus::Pending, LoanStatus::Rejected], 33.33)]
    #[case::one_of_eight(&[
        LoanStatus::Approved,
        LoanStatus::Pending,
        LoanStatus::Pending,
        LoanStatus::Pending,
        LoanStatus::Pending,
        LoanStatus::Pending,
        LoanStatus::Pending,
        LoanStatus::Pending,
    ], 12.5)]
    fn approval_rate_is_rounded(#[case] statuses: &[LoanStatus], #[case] expected: f64) {
        let loans: Vec<_> = statuses.iter().map(|&s| loan(10.0, s)).collect();
        let stats = ApplicationStats::compute(&loans);
        assert_eq!(stats.approval_rate, expected);
    }

    #[test]
    fn counts_cover_every_status() {
        let loans: Vec<_> = LoanStatus::ALL.iter().map(|&s| loan(1.0, s)).collect();
        let stats = ApplicationStats::compute(&loans);
        for status in LoanStatus::ALL {
            assert_eq!(stats.count_by_status(status), 1);
        }
    }
}
