//! Dispatcher - Request を Access / Workflow に振り分ける
//!
//! すべてのエラーは Response に変換されます（握りつぶさない）。

use std::sync::Arc;

use serde_json::json;

use super::request::{Request, Response};
use crate::app::App;
use crate::domain::{ApplicationInput, LoanError};

#[derive(Clone)]
pub struct Dispatcher {
    app: Arc<App>,
}

impl Dispatcher {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    /// Decode one JSON request and handle it. A malformed request is a 400.
    pub async fn handle_json(&self, raw: &str) -> Response {
        match serde_json::from_str::<Request>(raw) {
            Ok(request) => self.handle(request).await,
            Err(err) => {
                tracing::debug!(error = %err, "Rejected malformed request");
                Response::bad_request(format!("malformed request: {err}"))
            }
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::Register {
                full_name,
                email,
                password,
            } => self
                .app
                .access
                .register(&full_name, &email, &password)
                .await
                .map(|_| Response::created(json!({ "message": "User registered successfully" }))),
            Request::Login { email, password } => self
                .app
                .access
                .authenticate_user(&email, &password)
                .await
                .map(Response::ok),
            Request::AdminLogin { username, password } => self
                .app
                .access
                .authenticate_admin(&username, &password)
                .map(|()| Response::ok(json!({ "admin": true }))),
            Request::Apply(input) => self.apply(input).await,
            Request::UserLoans { account_id } => self
                .app
                .workflow
                .list_for_account(account_id)
                .await
                .map(Response::ok),
            Request::AdminApplications => self.app.workflow.list_all().await.map(Response::ok),
            Request::AdminStats => self.app.workflow.statistics().await.map(Response::ok),
            Request::UpdateStatus { id, status } => self
                .app
                .workflow
                .set_status(id, status)
                .await
                .map(Response::ok),
        };

        result.unwrap_or_else(|err| {
            if matches!(err, LoanError::Store(_) | LoanError::Internal(_)) {
                tracing::error!(error = %err, "Failure while handling request");
            }
            Response::from(err)
        })
    }

    /// The engine does not check magnitudes, so the caller does it here.
    async fn apply(&self, input: ApplicationInput) -> Result<Response, LoanError> {
        input.check_positive_terms()?;
        let application = self.app.workflow.submit(input).await?;
        Ok(Response::created(application))
    }
}
