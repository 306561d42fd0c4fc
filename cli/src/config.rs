//! Settings resolution
//!
//! Command-line flags win over the configuration file, which wins over the
//! built-in defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Args;
use merkle_zeroes::{Digest, HashPrimitive, ZERO_DIGEST, empty_leaf_from_tag};
use serde::Deserialize;

use crate::render::OutputFormat;

/// Depth used when neither the command line nor the file sets one
pub const DEFAULT_DEPTH: usize = 20;

/// Tree options shared by every command
#[derive(Args, Debug, Default, Clone)]
pub struct TreeArgs {
    /// Tree depth [default: 20]
    #[arg(long)]
    pub depth: Option<usize>,

    /// Hash primitive (poseidon2, circom-poseidon) [default: poseidon2]
    #[arg(long = "hash")]
    pub hash: Option<HashPrimitive>,

    /// Empty leaf digest, 0x-prefixed hex or decimal [default: 0]
    #[arg(long, conflicts_with = "empty_leaf_tag")]
    pub empty_leaf: Option<Digest>,

    /// Derive the empty leaf from a 1-3 character ASCII tag with Poseidon2
    #[arg(long)]
    pub empty_leaf_tag: Option<String>,

    /// Output representation [default: json]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the output to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Contents of the TOML configuration file
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Tree depth
    pub depth: Option<usize>,
    /// Hash primitive
    pub hash: Option<HashPrimitive>,
    /// Empty leaf digest
    pub empty_leaf: Option<Digest>,
    /// Tag the empty leaf is derived from
    pub empty_leaf_tag: Option<String>,
    /// Output representation
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    /// `<config dir>/merkle-zeroes/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("merkle-zeroes").join("config.toml"))
    }

    /// Parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: FileConfig =
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
        if config.empty_leaf.is_some() && config.empty_leaf_tag.is_some() {
            bail!(
                "{}: set either `empty_leaf` or `empty_leaf_tag`, not both",
                path.display()
            );
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the explicit file if given, else the default file if present
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        Self::discover_with(explicit, Self::default_path().as_deref())
    }

    fn discover_with(explicit: Option<&Path>, fallback: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match fallback {
            Some(path) if path.is_file() => Self::load(path),
            _ => {
                tracing::debug!("no config file, using built-in defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Fully resolved options of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Tree depth
    pub depth: usize,
    /// Hash primitive
    pub primitive: HashPrimitive,
    /// Empty leaf digest
    pub empty_leaf: Digest,
    /// Output representation
    pub format: OutputFormat,
    /// Output file, stdout if unset
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Merge command-line flags over the configuration file
    pub fn resolve(args: &TreeArgs, file: &FileConfig) -> Result<Self> {
        let empty_leaf = match (&args.empty_leaf, &args.empty_leaf_tag) {
            (Some(leaf), _) => *leaf,
            (None, Some(tag)) => empty_leaf_from_tag(tag)?,
            (None, None) => match (&file.empty_leaf, &file.empty_leaf_tag) {
                (Some(leaf), _) => *leaf,
                (None, Some(tag)) => empty_leaf_from_tag(tag)?,
                (None, None) => ZERO_DIGEST,
            },
        };

        let settings = Settings {
            depth: args.depth.or(file.depth).unwrap_or(DEFAULT_DEPTH),
            primitive: args.hash.or(file.hash).unwrap_or_default(),
            empty_leaf,
            format: args.format.or(file.format).unwrap_or_default(),
            output: args.output.clone(),
        };
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }
}
