//! loandesk binary.
//!
//! # Usage
//!
//! ```bash
//! # Serve the request surface on port 5000 with a JSON file store
//! LOANDESK_STORE=file:///var/lib/loandesk/store.json loandesk serve
//!
//! # One-shot commands against the same store
//! loandesk --store file://store.json register --full-name "Ada" --email ada@example.com --password pw
//! loandesk --store file://store.json admin -u admin -p admin123 stats
//! ```

mod config;

use std::io::IsTerminal;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use clap::Parser;
use config::{AdminAction, ApplyArgs, Cli, Command, Config};
use loandesk_core::api::{Dispatcher, Server};
use loandesk_core::app::{App, AppBuilder, BuildError};
use loandesk_core::domain::{ApplicationInput, LoanError};
use loandesk_core::impls::StoreUrl;
use loandesk_core::present;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Top-level error for the binary.
#[derive(Debug)]
enum CliError {
    Startup(BuildError),
    Request(LoanError),
    Io(std::io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Startup(e) => write!(f, "startup error: {}", e),
            CliError::Request(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "server error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<LoanError> for CliError {
    fn from(err: LoanError) -> Self {
        CliError::Request(err)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(&cli.config);

    if cli.config.store == StoreUrl::Memory && !matches!(cli.command, Command::Serve) {
        tracing::warn!("Using memory:// store; nothing will persist after this command");
    }

    let app_config = cli.config.app_config();
    let app = AppBuilder::from_config(&app_config)
        .await
        .and_then(AppBuilder::build)
        .map_err(|err| {
            tracing::error!(error = %err, "Failed to start");
            CliError::Startup(err)
        })?;

    run(app, cli.command, app_config.port).await
}

async fn serve(app: App, port: u16) -> Result<(), CliError> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let server = Server::bind(addr, Dispatcher::new(Arc::new(app)))
        .await
        .map_err(CliError::Io)?;
    server
        .serve(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "Failed to listen for shutdown signal");
            }
        })
        .await
        .map_err(CliError::Io)
}

async fn run(app: App, command: Command, port: u16) -> Result<(), CliError> {
    match command {
        Command::Serve => return serve(app, port).await,
        Command::Register {
            full_name,
            email,
            password,
        } => {
            let id = app.access.register(&full_name, &email, &password).await?;
            println!("Registered {}", id);
        }
        Command::Login { email, password } => {
            let user = app.access.authenticate_user(&email, &password).await?;
            print_json(&user);
        }
        Command::Apply(args) => {
            let application = app.workflow.submit(application_input(args)?).await?;
            print_json(&application);
        }
        Command::Loans { user_id } => {
            let applications = app.workflow.list_for_account(user_id).await?;
            print!("{}", present::applications_table(&applications));
        }
        Command::Admin {
            username,
            password,
            action,
        } => {
            app.access.authenticate_admin(&username, &password)?;
            match action {
                AdminAction::Applications => {
                    let applications = app.workflow.list_all().await?;
                    print!("{}", present::applications_table(&applications));
                }
                AdminAction::Stats => {
                    let stats = app.workflow.statistics().await?;
                    print!("{}", present::stats_panel(&stats));
                }
                AdminAction::SetStatus { id, status } => {
                    let updated = app.workflow.set_status(id, status).await?;
                    println!("{} is now {}", updated.id, updated.status);
                }
            }
        }
    }
    Ok(())
}

fn application_input(args: ApplyArgs) -> Result<ApplicationInput, LoanError> {
    let input = ApplicationInput {
        account_id: Some(args.user_id),
        full_name: Some(args.full_name),
        amount: Some(args.amount),
        tenure: Some(args.tenure),
        reason: Some(args.reason),
        employment_status: Some(args.employment_status),
        employment_address: Some(args.employment_address),
        status: None,
    };
    input.check_positive_terms()?;
    Ok(input)
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => tracing::error!(error = %err, "Failed to encode output"),
    }
}

/// Initialize the tracing subscriber.
///
/// - `Text`: human-readable
/// - `Json`: one JSON object per event
/// - `Auto`: JSON when stderr is not a TTY, text otherwise
fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = config.log_format.use_json(std::io::stderr().is_terminal());

    // Logs go to stderr so command output on stdout stays clean.
    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loandesk_core::domain::AccountId;

    fn args(amount: f64, tenure: u32) -> ApplyArgs {
        ApplyArgs {
            user_id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse::<AccountId>().unwrap(),
            full_name: "Ada".to_string(),
            amount,
            tenure,
            reason: "r".to_string(),
            employment_status: "e".to_string(),
            employment_address: "a".to_string(),
        }
    }

    #[test]
    fn apply_args_become_complete_input() {
        let input = application_input(args(250.0, 6)).unwrap();
        assert_eq!(input.amount, Some(250.0));
        assert_eq!(input.tenure, Some(6));
        assert!(input.status.is_none());
    }

    #[test]
    fn apply_args_reject_non_positive_terms() {
        assert!(application_input(args(0.0, 6)).is_err());
        assert!(application_input(args(10.0, 0)).is_err());
        assert!(application_input(args(f64::INFINITY, 6)).is_err());
        assert!(application_input(args(f64::NEG_INFINITY, 6)).is_err());
    }
}
