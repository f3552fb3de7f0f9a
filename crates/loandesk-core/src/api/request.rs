//! Request / Response - transport に依存しない要求面

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{AccountId, ApplicationId, ApplicationInput, LoanError, LoanStatus};

/// One caller request, tagged by `op`.
///
/// ```json
/// {"op": "update_status", "id": "01J...", "status": "APPROVED"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Request {
    Register {
        #[serde(default)]
        full_name: String,
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },
    Login {
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },
    AdminLogin {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    Apply(ApplicationInput),
    UserLoans {
        #[serde(rename = "userId")]
        account_id: AccountId,
    },
    AdminApplications,
    AdminStats,
    UpdateStatus {
        id: ApplicationId,
        status: LoanStatus,
    },
}

/// Status code plus JSON body; errors carry `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn ok(body: impl Serialize) -> Self {
        Self::with_status(200, body)
    }

    pub fn created(body: impl Serialize) -> Self {
        Self::with_status(201, body)
    }

    pub fn bad_request(message: impl std::fmt::Display) -> Self {
        Self {
            status: 400,
            body: json!({ "error": message.to_string() }),
        }
    }

    fn with_status(status: u16, body: impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(err) => Self {
                status: 500,
                body: json!({ "error": format!("failed to encode response: {err}") }),
            },
        }
    }
}

impl From<LoanError> for Response {
    fn from(err: LoanError) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "error": err.to_string() }),
        }
    }
}
