//! Loan application records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::LoanError;
use super::ids::{AccountId, ApplicationId};
use super::status::LoanStatus;

/// A stored loan application.
///
/// Only `status` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: ApplicationId,
    /// Owning account (reference only).
    pub account_id: AccountId,
    /// Denormalized copy of the applicant name; may diverge from the account.
    pub full_name: String,
    pub amount: f64,
    /// Months.
    pub tenure: u32,
    pub reason: String,
    pub employment_status: String,
    pub employment_address: String,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

impl LoanApplication {
    /// Build a PENDING record from validated terms.
    pub fn new(id: ApplicationId, terms: LoanTerms, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            account_id: terms.account_id,
            full_name: terms.full_name,
            amount: terms.amount,
            tenure: terms.tenure,
            reason: terms.reason,
            employment_status: terms.employment_status,
            employment_address: terms.employment_address,
            status: LoanStatus::Pending,
            created_at,
        }
    }
}

/// Raw submission as it arrives from a caller.
///
/// Every field is optional so a missing one can be reported as a validation
/// error instead of a decode failure. `status` is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    #[serde(rename = "userId")]
    pub account_id: Option<AccountId>,
    pub full_name: Option<String>,
    pub amount: Option<f64>,
    pub tenure: Option<u32>,
    pub reason: Option<String>,
    pub employment_status: Option<String>,
    pub employment_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LoanStatus>,
}

/// Submission with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanTerms {
    pub account_id: AccountId,
    pub full_name: String,
    pub amount: f64,
    pub tenure: u32,
    pub reason: String,
    pub employment_status: String,
    pub employment_address: String,
}

impl ApplicationInput {
    /// Form-level guard for callers: amount and tenure, when present, must be
    /// positive and finite. `Workflow::submit` does not repeat this check.
    pub fn check_positive_terms(&self) -> Result<(), LoanError> {
        let bad_amount = self
            .amount
            .is_some_and(|amount| !amount.is_finite() || amount <= 0.0);
        if bad_amount || self.tenure == Some(0) {
            return Err(LoanError::Validation(
                "Amount and Tenure must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Check presence of required fields. Magnitudes are not checked here,
    /// but a non-finite amount is refused since JSON cannot store it.
    pub fn into_terms(self) -> Result<LoanTerms, LoanError> {
        if let Some(amount) = self.amount
            && !amount.is_finite()
        {
            return Err(LoanError::Validation(format!(
                "amount must be a finite number, got {amount}"
            )));
        }

        let mut missing = Vec::new();

        let account_id = self.account_id;
        if account_id.is_none() {
            missing.push("userId");
        }
        let full_name = required_text(self.full_name, "fullName", &mut missing);
        if self.amount.is_none() {
            missing.push("amount");
        }
        if self.tenure.is_none() {
            missing.push("tenure");
        }
        let reason = required_text(self.reason, "reason", &mut missing);
        let employment_status =
            required_text(self.employment_status, "employmentStatus", &mut missing);
        let employment_address =
            required_text(self.employment_address, "employmentAddress", &mut missing);

        match (account_id, self.amount, self.tenure) {
            (Some(account_id), Some(amount), Some(tenure)) if missing.is_empty() => Ok(LoanTerms {
                account_id,
                full_name,
                amount,
                tenure,
                reason,
                employment_status,
                employment_address,
            }),
            _ => Err(LoanError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn required_text(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}
