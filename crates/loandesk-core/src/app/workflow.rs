//! Workflow - 申請の受付・一覧・ステータス上書き・統計
//!
//! ステータスは遷移表なしの単純な上書きです。どの値からどの値へも変更できます。

use std::sync::Arc;

use crate::domain::{
    AccountId, ApplicationId, ApplicationInput, ApplicationStats, LoanApplication, LoanError,
    LoanStatus,
};
use crate::ports::{ApplicationStore, Clock, IdGenerator};

pub struct Workflow {
    applications: Arc<dyn ApplicationStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Workflow {
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            applications,
            clock,
            ids,
        }
    }

    /// Store a new application. Any status in `input` is ignored; the
    /// record always starts PENDING.
    pub async fn submit(&self, input: ApplicationInput) -> Result<LoanApplication, LoanError> {
        if let Some(requested) = input.status
            && requested != LoanStatus::Pending
        {
            tracing::debug!(%requested, "Ignoring status supplied on submission");
        }
        let terms = input.into_terms()?;
        let application =
            LoanApplication::new(self.ids.generate_application_id(), terms, self.clock.now());

        self.applications.insert(application.clone()).await?;

        tracing::info!(
            application_id = %application.id,
            account_id = %application.account_id,
            amount = application.amount,
            tenure = application.tenure,
            "Submitted loan application"
        );
        Ok(application)
    }

    pub async fn list_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<LoanApplication>, LoanError> {
        Ok(self.applications.list_by_account(account_id).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<LoanApplication>, LoanError> {
        Ok(self.applications.list_all().await?)
    }

    /// Unconditional overwrite; last write wins.
    pub async fn set_status(
        &self,
        id: ApplicationId,
        status: LoanStatus,
    ) -> Result<LoanApplication, LoanError> {
        let updated = self
            .applications
            .update_status(id, status)
            .await?
            .ok_or(LoanError::NotFound(id))?;

        tracing::info!(application_id = %id, %status, "Updated loan status");
        Ok(updated)
    }

    /// Recomputed from the full set on every call.
    pub async fn statistics(&self) -> Result<ApplicationStats, LoanError> {
        let applications = self.list_all().await?;
        Ok(ApplicationStats::compute(&applications))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryStore;
    use crate::ports::{FixedClock, UlidGenerator};
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;
    use ulid::Ulid;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn workflow() -> Workflow {
        let clock = FixedClock::new(fixed_time());
        Workflow::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(clock),
            Arc::new(UlidGenerator::new(clock)),
        )
    }

    fn input(account_id: AccountId, amount: f64) -> ApplicationInput {
        ApplicationInput {
            account_id: Some(account_id),
            full_name: Some("Ada Lovelace".to_string()),
            amount: Some(amount),
            tenure: Some(12),
            reason: Some("Equipment".to_string()),
            employment_status: Some("Employed".to_string()),
            employment_address: Some("London".to_string()),
            status: None,
        }
    }

    fn account() -> AccountId {
        AccountId::from_ulid(Ulid::new())
    }

    #[rstest]
    #[case::none(None)]
    #[case::pending(Some(LoanStatus::Pending))]
    #[case::approved(Some(LoanStatus::Approved))]
    #[case::rejected(Some(LoanStatus::Rejected))]
    #[tokio::test]
    async fn submit_forces_pending(#[case] supplied: Option<LoanStatus>) {
        let workflow = workflow();
        let submitted = workflow
            .submit(ApplicationInput {
                status: supplied,
                ..input(account(), 1000.0)
            })
            .await
            .unwrap();

        assert_eq!(submitted.status, LoanStatus::Pending);
        assert_eq!(submitted.created_at, fixed_time());
    }

    #[tokio::test]
    async fn submit_rejects_missing_fields() {
        let workflow = workflow();
        let err = workflow
            .submit(ApplicationInput {
                tenure: None,
                ..input(account(), 1000.0)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LoanError::Validation(_)));
        assert!(workflow.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_status_accepts_every_transition() {
        let workflow = workflow();
        let app = workflow.submit(input(account(), 50.0)).await.unwrap();

        for from in LoanStatus::ALL {
            for to in LoanStatus::ALL {
                workflow.set_status(app.id, from).await.unwrap();
                let updated = workflow.set_status(app.id, to).await.unwrap();
                assert_eq!(updated.status, to);

                let read_back = workflow.list_all().await.unwrap();
                assert_eq!(read_back[0].status, to);
            }
        }
    }

    #[tokio::test]
    async fn set_status_on_unknown_id_is_not_found() {
        let workflow = workflow();
        workflow.submit(input(account(), 50.0)).await.unwrap();
        let before = workflow.list_all().await.unwrap();

        let missing = ApplicationId::from_ulid(Ulid::new());
        let err = workflow
            .set_status(missing, LoanStatus::Approved)
            .await
            .unwrap_err();

        assert!(matches!(err, LoanError::NotFound(id) if id == missing));
        assert_eq!(workflow.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn statistics_follow_status_changes() {
        let workflow = workflow();
        let owner = account();
        let a = workflow.submit(input(owner, 100.0)).await.unwrap();
        let b = workflow.submit(input(owner, 300.0)).await.unwrap();
        let c = workflow.submit(input(owner, 200.0)).await.unwrap();
        workflow.set_status(a.id, LoanStatus::Approved).await.unwrap();
        workflow.set_status(b.id, LoanStatus::Approved).await.unwrap();
        workflow.set_status(c.id, LoanStatus::Rejected).await.unwrap();

        let stats = workflow.statistics().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.count_by_status(LoanStatus::Approved), 2);
        assert_eq!(stats.average_amount, 200.0);
        assert_eq!(stats.approval_rate, 66.67);
    }
}
