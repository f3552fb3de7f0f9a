//! Command-line and environment configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};
use loandesk_core::app::AppConfig;
use loandesk_core::domain::{AccountId, AdminCredentials, ApplicationId, LoanStatus};
use loandesk_core::impls::StoreUrl;

/// Loan application intake and review.
#[derive(Debug, Parser)]
#[command(name = "loandesk", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings fixed for the lifetime of the process.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Store connection string: memory:// or file://<path>.
    #[arg(long, env = "LOANDESK_STORE", default_value = "memory://", global = true)]
    pub store: StoreUrl,

    /// Port for the JSON-lines server.
    #[arg(long, env = "PORT", default_value_t = 5000, global = true)]
    pub port: u16,

    #[arg(long, env = "LOANDESK_ADMIN_USERNAME", default_value = "admin", global = true)]
    pub admin_username: String,

    #[arg(
        long,
        env = "LOANDESK_ADMIN_PASSWORD",
        default_value = "admin123",
        hide_env_values = true,
        global = true
    )]
    pub admin_password: String,

    #[arg(long, env = "LOANDESK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Auto, global = true)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            store: self.store.clone(),
            port: self.port,
            admin: AdminCredentials::new(&self.admin_username, &self.admin_password),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
    /// JSON when stderr is not a terminal, text otherwise.
    Auto,
}

impl LogFormat {
    /// Logs are written to stderr, so only stderr decides `Auto`.
    pub fn use_json(self, stderr_is_terminal: bool) -> bool {
        match self {
            LogFormat::Json => true,
            LogFormat::Text => false,
            LogFormat::Auto => !stderr_is_terminal,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the request surface over TCP, one JSON request per line.
    Serve,

    /// Register an applicant account.
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Check applicant credentials.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Submit a loan application.
    Apply(ApplyArgs),

    /// List the applications of one account.
    Loans {
        #[arg(long)]
        user_id: AccountId,
    },

    /// Administrator commands.
    Admin {
        #[arg(long, short = 'u')]
        username: String,
        #[arg(long, short = 'p')]
        password: String,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[arg(long)]
    pub user_id: AccountId,
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub amount: f64,
    /// Months.
    #[arg(long)]
    pub tenure: u32,
    #[arg(long)]
    pub reason: String,
    #[arg(long)]
    pub employment_status: String,
    #[arg(long)]
    pub employment_address: String,
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// List every application.
    Applications,
    /// Show aggregate statistics.
    Stats,
    /// Overwrite the status of one application.
    SetStatus {
        id: ApplicationId,
        status: LoanStatus,
    },
}
