//! `merkle-zeroes` command line
//!
//! Computes the level-default table of an empty sparse Merkle tree, prints
//! it in the representation a verifier or code generator needs, and checks
//! it against tables produced by the circuit toolchain.

mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use merkle_zeroes::Digest;
use tracing_subscriber::EnvFilter;

use crate::config::{FileConfig, Settings, TreeArgs};

#[derive(Parser)]
#[command(name = "merkle-zeroes")]
#[command(about = "Empty sparse Merkle tree defaults", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "MERKLE_ZEROES_CONFIG")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the full level-default table, leaf level first
    Defaults(TreeArgs),

    /// Print the root of the empty tree
    Root(TreeArgs),

    /// Compare the computed table with an independently produced one
    Verify {
        #[command(flatten)]
        tree: TreeArgs,

        /// Expected root of the empty tree
        #[arg(long, conflicts_with = "reference", required_unless_present = "reference")]
        expected_root: Option<Digest>,

        /// JSON file with the reference levels (an array of digests, or the
        /// output of `defaults --format json`)
        #[arg(long)]
        reference: Option<PathBuf>,
    },

    /// Print the Merkle path of one leaf
    Path {
        #[command(flatten)]
        tree: TreeArgs,

        /// Leaf index
        #[arg(long)]
        index: u64,

        /// Populated leaf as INDEX=DIGEST; repeatable
        #[arg(long = "leaf", value_parser = parse_leaf)]
        leaves: Vec<(u64, Digest)>,
    },
}

/// Parse `INDEX=DIGEST`
fn parse_leaf(s: &str) -> Result<(u64, Digest)> {
    let (index, digest) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected INDEX=DIGEST, got `{s}`"))?;
    Ok((index.trim().parse()?, digest.parse()?))
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = FileConfig::discover(cli.config.as_deref())?;

    match cli.command {
        Command::Defaults(tree) => commands::defaults(&Settings::resolve(&tree, &file)?),
        Command::Root(tree) => commands::root(&Settings::resolve(&tree, &file)?),
        Command::Verify {
            tree,
            expected_root,
            reference,
        } => commands::verify(
            &Settings::resolve(&tree, &file)?,
            expected_root,
            reference.as_deref(),
        ),
        Command::Path {
            tree,
            index,
            leaves,
        } => commands::path(&Settings::resolve(&tree, &file)?, index, &leaves),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_path_reads_the_environment() {
        let command = Cli::command();
        let config = command
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .expect("config argument");
        assert_eq!(
            config.get_env(),
            Some(std::ffi::OsStr::new("MERKLE_ZEROES_CONFIG"))
        );
        assert!(config.is_global_set());
    }

    #[test]
    fn parses_leaf_assignments() {
        let (index, digest) = parse_leaf("5=0x2a").expect("parse");
        assert_eq!(index, 5);
        assert_eq!(digest, Digest::from_u64(42));
        assert_eq!(parse_leaf("7=42").expect("decimal").1, Digest::from_u64(42));
        assert!(parse_leaf("5").is_err());
        assert!(parse_leaf("x=1").is_err());
    }

    #[test]
    fn verify_needs_a_reference() {
        assert!(Cli::try_parse_from(["merkle-zeroes", "verify", "--depth", "4"]).is_err());
        assert!(
            Cli::try_parse_from([
                "merkle-zeroes",
                "verify",
                "--expected-root",
                "0x01",
                "--reference",
                "ref.json",
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from(["merkle-zeroes", "verify", "--expected-root", "0x01"]).is_ok()
        );
    }

    #[test]
    fn parses_path_command() {
        let cli = Cli::try_parse_from([
            "merkle-zeroes",
            "-vv",
            "path",
            "--depth",
            "3",
            "--index",
            "2",
            "--leaf",
            "2=0x05",
            "--leaf",
            "7=9",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Path { index, leaves, .. } => {
                assert_eq!(index, 2);
                assert_eq!(
                    leaves,
                    vec![(2, Digest::from_u64(5)), (7, Digest::from_u64(9))]
                );
            }
            _ => panic!("expected the path command"),
        }
    }
}
