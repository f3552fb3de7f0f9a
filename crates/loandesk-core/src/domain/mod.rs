//! Domain model (IDs, accounts, applications, status, statistics, errors).

pub mod account;
pub mod application;
pub mod errors;
pub mod ids;
pub mod stats;
pub mod status;

pub use account::{Account, AdminCredentials, AuthenticatedUser};
pub use application::{ApplicationInput, LoanApplication, LoanTerms};
pub use errors::{LoanError, StoreError};
pub use ids::{AccountId, ApplicationId, ParseIdError};
pub use stats::{ApplicationStats, StatusCounts};
pub use status::{LoanStatus, ParseStatusError};
