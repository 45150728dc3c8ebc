//! ssh-key-retriever - AuthorizedKeysCommand helper for federated identities

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use ssh_key_retriever::cli::{Cli, ExitCode};
use ssh_key_retriever::directory::{self, ClientOptions, DirectoryClient};
use ssh_key_retriever::identity::FederatedId;
use ssh_key_retriever::{config, keys, Error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);
    debug!(version = ssh_key_retriever::VERSION, "Starting {}", ssh_key_retriever::NAME);

    run(cli).await.into()
}

/// Execute the lookup pipeline and map every outcome to an exit code
async fn run(cli: Cli) -> ExitCode {
    // A plain username without an underscore is not a federated identifier.
    // That is a "no match" outcome, not an error: sshd integrations expect
    // exit 0 with empty output.
    let Some(id) = FederatedId::split(&cli.username) else {
        info!(
            username = %cli.username,
            "Identifier has no underscore, nothing to resolve"
        );
        return ExitCode::Success;
    };
    debug!(org_id = %id.org_id, username = %id.username, "Split federated identifier");

    let config_path = match cli.config {
        Some(path) => path,
        None => match config::find_config_file() {
            Some(path) => path,
            None => {
                let searched: Vec<&str> = config::config_search_paths()
                    .iter()
                    .map(|cp| cp.description)
                    .collect();
                error!("No configuration file found (searched: {})", searched.join(", "));
                return ExitCode::ConfigError;
            }
        },
    };

    let config_file = match config::load_config(&config_path) {
        Ok(cf) => cf,
        Err(e) => {
            error!("{}", e);
            return ExitCode::ConfigError;
        }
    };
    debug!(path = %config_file.path.display(), "Loaded configuration");

    let client = match DirectoryClient::new(&config_file.config, ClientOptions::from_env()) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::RequestError;
        }
    };

    let records = match client.find_by_username(&id.username).await {
        Ok(records) => records,
        Err(e @ Error::Request(_)) => {
            error!("{}", e);
            return ExitCode::RequestError;
        }
        Err(e) => {
            error!("{}", e);
            return ExitCode::ResponseError;
        }
    };

    for record in directory::filter_by_org(&records, &id.org_id) {
        debug!(uid_number = record.uid_number, "Matched record");
        print!("{}", keys::render_keys(record));
    }

    ExitCode::Success
}

/// Initialize logging with tracing-subscriber
///
/// Diagnostics go to stderr; stdout carries only the resolved keys.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
