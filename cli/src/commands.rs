//! Subcommand handlers

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use merkle_zeroes::{DefaultsCache, Digest, LevelDefaults, SparseTree};

use crate::{
    config::Settings,
    render::{self, ReferenceFile},
};

fn load_defaults(settings: &Settings) -> Result<LevelDefaults> {
    let defaults = DefaultsCache::global()
        .get(settings.primitive, settings.empty_leaf, settings.depth)
        .with_context(|| {
            format!(
                "computing {} defaults for depth {}",
                settings.primitive, settings.depth
            )
        })?;
    tracing::info!(
        primitive = %settings.primitive,
        depth = settings.depth,
        root = %defaults.root(),
        "computed empty tree defaults"
    );
    Ok(defaults)
}

/// Write to the configured output file, or stdout
fn emit(settings: &Settings, text: &str) -> Result<()> {
    match &settings.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// `defaults`: the whole table
pub fn defaults(settings: &Settings) -> Result<()> {
    let defaults = load_defaults(settings)?;
    emit(
        settings,
        &render::render_defaults(settings.format, settings.primitive, &defaults)?,
    )
}

/// `root`: the root only
pub fn root(settings: &Settings) -> Result<()> {
    let defaults = load_defaults(settings)?;
    emit(
        settings,
        &render::render_root(settings.format, settings.primitive, &defaults)?,
    )
}

/// Check the computed table, failing on the first difference
fn check(
    settings: &Settings,
    expected_root: Option<Digest>,
    reference: Option<&Path>,
) -> Result<LevelDefaults> {
    let defaults = load_defaults(settings)?;

    if let Some(expected) = expected_root {
        defaults.check_root(&expected)?;
    }
    if let Some(path) = reference {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading reference {}", path.display()))?;
        let levels = ReferenceFile::parse(&text)
            .with_context(|| format!("parsing reference {}", path.display()))?;
        defaults
            .check_against(&levels)
            .with_context(|| format!("comparing against {}", path.display()))?;
    }
    Ok(defaults)
}

/// `verify`: compare with an expected root or a reference table
pub fn verify(
    settings: &Settings,
    expected_root: Option<Digest>,
    reference: Option<&Path>,
) -> Result<()> {
    let defaults = check(settings, expected_root, reference)?;
    tracing::info!("defaults match");
    emit(
        settings,
        &render::render_verified(settings.format, settings.primitive, &defaults)?,
    )
}

/// `path`: Merkle path of `index` in a tree holding `leaves`
pub fn path(settings: &Settings, index: u64, leaves: &[(u64, Digest)]) -> Result<()> {
    let mut tree = SparseTree::new(settings.primitive, settings.depth, settings.empty_leaf)?;
    for &(at, leaf) in leaves {
        if tree.insert(at, leaf)?.is_some() {
            tracing::warn!(index = at, "leaf set more than once, keeping the last value");
        }
    }

    let proof = tree.proof(index)?;
    let leaf = tree.get(index)?;
    let root = tree.root()?;
    tracing::info!(index, populated = tree.len(), %root, "computed merkle path");

    emit(
        settings,
        &render::render_path(settings.format, settings.primitive, index, leaf, root, &proof)?,
    )
}
