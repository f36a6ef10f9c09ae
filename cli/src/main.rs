mod http;
mod terminal;
mod timer;

use std::rc::Rc;
use std::time::Duration;

use authwatch::{ApiError, SessionApi, SessionConfig, new_session, run};
use clap::{Parser, Subcommand};

use crate::http::HttpApi;
use crate::terminal::TerminalPage;
use crate::timer::TokioTimer;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("session API call failed: {0}")]
    Api(#[from] ApiError),
}

#[derive(Parser, Debug)]
#[command(name = "authwatch", about = "Session liveness agent for the auth session service")]
struct Cli {
    #[arg(long, env = "AUTHWATCH_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Raw `Cookie` header value identifying the session.
    #[arg(long, env = "AUTHWATCH_SESSION_COOKIE")]
    session_cookie: Option<String>,

    #[arg(long, env = "AUTHWATCH_API_PATH", default_value = "/api")]
    api_path: String,

    #[arg(long, env = "AUTHWATCH_LOGGED_OUT_PATH", default_value = "/login")]
    logged_out_path: String,

    #[arg(long, default_value_t = 10)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the service version.
    Version,
    /// Fetch a CSRF token and print the authenticated user once.
    Whoami,
    /// Bootstrap and keep the session checked until it ends (Ctrl-C logs out).
    Watch,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = SessionConfig::default()
        .with_api_path(&cli.api_path)
        .with_logged_out_path(&cli.logged_out_path);
    let api = HttpApi::new(
        &cli.base_url,
        cli.session_cookie.as_deref(),
        Duration::from_secs(cli.connect_timeout_secs),
        config.clone(),
    )?;

    match cli.command {
        Command::Version => {
            let info = api.fetch_version().await?;
            println!("{}", info.version);
        }
        Command::Whoami => {
            let token = api.fetch_csrf_token().await?;
            let info = api.fetch_auth_info(&token).await?;
            println!("{} ({} sec's left)", info.user, info.max_age);
        }
        Command::Watch => watch(api, config).await,
    }
    Ok(())
}

/// Run the session loop on a local task set until the session ends.
async fn watch(api: HttpApi, config: SessionConfig) {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let (controller, handle, events) = new_session(config, TerminalPage::stdout(), TokioTimer);

            drop(tokio::task::spawn_local(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("interrupted; logging out");
                        if !handle.logout() {
                            tracing::debug!("session already ended");
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "cannot listen for Ctrl-C"),
                }
            }));

            run(controller, events, Rc::new(api), |fut| drop(tokio::task::spawn_local(fut))).await;
        })
        .await;
    tracing::info!("session ended");
}
