//! CLI module for ssh-key-retriever
//!
//! This module provides the command-line interface using clap derive macros.
//! The tool has exactly one operation, so there are no subcommands.

pub mod exit_code;

use clap::Parser;
use std::path::PathBuf;

pub use exit_code::ExitCode;

/// Resolve SSH public keys for a federated identity
///
/// Intended to be wired up as an sshd `AuthorizedKeysCommand`. The positional
/// argument is the combined identifier the SSH server passes through.
#[derive(Parser, Debug)]
#[command(name = "ssh-key-retriever")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Combined identifier in the form <orgId>_<username>
    pub username: String,

    /// Configuration file path (overrides the standard search locations)
    #[arg(long, env = "SSH_KEY_RETRIEVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable diagnostic output on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional() {
        let cli = Cli::try_parse_from(["ssh-key-retriever", "uni_jdoe"]).unwrap();
        assert_eq!(cli.username, "uni_jdoe");
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_verbose_and_config() {
        let cli = Cli::try_parse_from([
            "ssh-key-retriever",
            "--verbose",
            "--config",
            "/tmp/alt.conf",
            "uni_jdoe",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/alt.conf")));
    }

    #[test]
    fn test_username_required() {
        assert!(Cli::try_parse_from(["ssh-key-retriever"]).is_err());
    }
}
