//! Output representations
//!
//! Hex digests are Big-Endian with a `0x` prefix; the `rust` format emits
//! Big-Endian byte arrays, the layout contract code loads with
//! `from_be_bytes`.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use merkle_zeroes::{Digest, HashPrimitive, LevelDefaults, MerklePath};
use serde::{Deserialize, Serialize};

/// How results are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON document
    #[default]
    Json,
    /// One `level<TAB>0x...` line per level
    Hex,
    /// One `level<TAB>decimal` line per level
    Decimal,
    /// Rust constant with Big-Endian byte arrays
    Rust,
}

/// JSON document of a level-default table
#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultsReport {
    /// Hash primitive
    pub primitive: HashPrimitive,
    /// Tree depth
    pub depth: usize,
    /// Digest of an empty leaf
    pub empty_leaf: Digest,
    /// Root of the empty tree
    pub root: Digest,
    /// Every level, leaf first
    pub levels: Vec<Digest>,
}

#[derive(Serialize)]
struct RootReport {
    primitive: HashPrimitive,
    depth: usize,
    empty_leaf: Digest,
    root: Digest,
    #[serde(skip_serializing_if = "Option::is_none")]
    verified: Option<bool>,
}

#[derive(Serialize)]
struct PathReport<'a> {
    primitive: HashPrimitive,
    depth: usize,
    index: u64,
    leaf: Digest,
    root: Digest,
    path_indices: u64,
    siblings: &'a [Digest],
}

/// Reference levels accepted by `verify`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReferenceFile {
    /// Plain array of digests
    Levels(Vec<Digest>),
    /// Output of `defaults --format json`
    Report(DefaultsReport),
}

impl ReferenceFile {
    /// Parse a JSON reference document
    pub fn parse(text: &str) -> Result<Vec<Digest>> {
        let reference: ReferenceFile = serde_json::from_str(text)?;
        Ok(match reference {
            ReferenceFile::Levels(levels) => levels,
            ReferenceFile::Report(report) => report.levels,
        })
    }
}

fn text_line(out: &mut String, label: impl std::fmt::Display, digest: &Digest, format: OutputFormat) {
    let value = match format {
        OutputFormat::Decimal => digest.to_decimal(),
        _ => digest.to_hex(),
    };
    // Writing into a String cannot fail
    let _ = writeln!(out, "{label}\t{value}");
}

fn rust_bytes(out: &mut String, indent: &str, digest: &Digest) {
    let bytes = digest.to_be_bytes();
    let _ = writeln!(out, "{indent}[");
    for chunk in bytes.chunks(8) {
        let row: Vec<String> = chunk.iter().map(|b| format!("0x{b:02x}")).collect();
        let _ = writeln!(out, "{indent}    {},", row.join(", "));
    }
    let _ = write!(out, "{indent}]");
}

/// Render a full table
pub fn render_defaults(
    format: OutputFormat,
    primitive: HashPrimitive,
    defaults: &LevelDefaults,
) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            let report = DefaultsReport {
                primitive,
                depth: defaults.depth(),
                empty_leaf: defaults.empty_leaf(),
                root: defaults.root(),
                levels: defaults.as_slice().to_vec(),
            };
            out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
        }
        OutputFormat::Hex | OutputFormat::Decimal => {
            for (level, digest) in defaults.iter().enumerate() {
                text_line(&mut out, level, digest, format);
            }
        }
        OutputFormat::Rust => {
            let _ = writeln!(
                out,
                "/// Empty-tree defaults, {primitive}, depth {}: level 0 is the empty leaf, level {} the root",
                defaults.depth(),
                defaults.depth()
            );
            let _ = writeln!(
                out,
                "pub const EMPTY_TREE_DEFAULTS: [[u8; 32]; {}] = [",
                defaults.as_slice().len()
            );
            for (level, digest) in defaults.iter().enumerate() {
                rust_bytes(&mut out, "    ", digest);
                let _ = writeln!(out, ", // {level}");
            }
            out.push_str("];\n");
        }
    }
    Ok(out)
}

/// Render the root of a table
pub fn render_root(
    format: OutputFormat,
    primitive: HashPrimitive,
    defaults: &LevelDefaults,
) -> Result<String> {
    let root = defaults.root();
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            let report = RootReport {
                primitive,
                depth: defaults.depth(),
                empty_leaf: defaults.empty_leaf(),
                root,
                verified: None,
            };
            out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
        }
        OutputFormat::Hex => {
            let _ = writeln!(out, "{}", root.to_hex());
        }
        OutputFormat::Decimal => {
            let _ = writeln!(out, "{}", root.to_decimal());
        }
        OutputFormat::Rust => {
            let _ = writeln!(
                out,
                "/// Root of the empty tree, {primitive}, depth {}",
                defaults.depth()
            );
            out.push_str("pub const EMPTY_TREE_ROOT: [u8; 32] = ");
            rust_bytes(&mut out, "", &root);
            out.push_str(";\n");
        }
    }
    Ok(out)
}

/// Render a successful verification
///
/// Text formats print `ok` followed by the verified root; `rust` emits the
/// root constant.
pub fn render_verified(
    format: OutputFormat,
    primitive: HashPrimitive,
    defaults: &LevelDefaults,
) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            let report = RootReport {
                primitive,
                depth: defaults.depth(),
                empty_leaf: defaults.empty_leaf(),
                root: defaults.root(),
                verified: Some(true),
            };
            out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
        }
        OutputFormat::Hex | OutputFormat::Decimal => {
            text_line(&mut out, "ok", &defaults.root(), format);
        }
        OutputFormat::Rust => return render_root(format, primitive, defaults),
    }
    Ok(out)
}

/// Render the Merkle path of one leaf
pub fn render_path(
    format: OutputFormat,
    primitive: HashPrimitive,
    index: u64,
    leaf: Digest,
    root: Digest,
    path: &MerklePath,
) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            let report = PathReport {
                primitive,
                depth: path.depth(),
                index,
                leaf,
                root,
                path_indices: path.path_indices,
                siblings: &path.siblings,
            };
            out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
        }
        OutputFormat::Hex | OutputFormat::Decimal => {
            text_line(&mut out, "leaf", &leaf, format);
            for (level, sibling) in path.siblings.iter().enumerate() {
                text_line(&mut out, level, sibling, format);
            }
            text_line(&mut out, "root", &root, format);
        }
        OutputFormat::Rust => {
            let _ = writeln!(
                out,
                "/// Merkle path of leaf {index}, {primitive}, depth {}",
                path.depth()
            );
            let _ = writeln!(out, "pub const PATH_INDICES: u64 = {};", path.path_indices);
            let _ = writeln!(
                out,
                "pub const PATH_ELEMENTS: [[u8; 32]; {}] = [",
                path.depth()
            );
            for (level, sibling) in path.siblings.iter().enumerate() {
                rust_bytes(&mut out, "    ", sibling);
                let _ = writeln!(out, ", // {level}");
            }
            out.push_str("];\n");
        }
    }
    Ok(out)
}
