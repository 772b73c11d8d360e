//! Proof tree persistence.
//!
//! Two formats are supported:
//! - text: nested TOML records holding every sequent in its canonical display form; the
//!   sequents are parsed again on load, so the file can be edited by hand;
//! - binary: a CBOR blob wrapped in [`TreeStorage`], carrying magic bytes and the exact
//!   crate version that wrote it.
//!
//! [`save`] and [`load`] pick the format from the file extension (see
//! [`StorageFormat::from_path`]).
use std::path::Path;

use log::{debug, error, trace};
use semver::{Comparator, Op, Version, VersionReq};
use seqformal::sequent::Sequent;
use serde::{Deserialize, Serialize};

use crate::magic::TREE_STORAGE_MAGIC;
use crate::tree::{Branch, ProofTree};
use crate::utils::error::{SeqError, SeqResult};

/// Textual record of one tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRecord {
    pub sequent: String,
    /// Empty for ungrown trees.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<BranchRecord>,
}

/// Textual record of one branch; no premises marks an axiom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub premises: Vec<TreeRecord>,
}

impl From<&ProofTree> for TreeRecord {
    fn from(tree: &ProofTree) -> Self {
        TreeRecord {
            sequent: tree.root().to_string(),
            branches: tree
                .branches()
                .iter()
                .map(|branch| BranchRecord {
                    premises: branch.children().iter().map(TreeRecord::from).collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<&TreeRecord> for ProofTree {
    type Error = SeqError;

    fn try_from(record: &TreeRecord) -> SeqResult<Self> {
        let root: Sequent = record.sequent.parse()?;
        let counts: Vec<usize> = record.branches.iter().map(|b| b.premises.len()).collect();
        check_shape(&root, &counts)?;

        let branches = record
            .branches
            .iter()
            .map(|branch| {
                if branch.premises.is_empty() {
                    Ok(Branch::Axiom)
                } else {
                    branch
                        .premises
                        .iter()
                        .map(ProofTree::try_from)
                        .collect::<SeqResult<Vec<_>>>()
                        .map(Branch::Premises)
                }
            })
            .collect::<SeqResult<Vec<_>>>()?;
        Ok(ProofTree::from_branches(root, branches))
    }
}

/// Reject branch shapes no decomposition step produces.
///
/// `premise_counts` holds one entry per branch, `0` standing for an axiom. An atomic
/// sequent has no branch or a single axiom; any other sequent has branches of one or two
/// premises.
fn check_shape(root: &Sequent, premise_counts: &[usize]) -> SeqResult<()> {
    let valid = if root.is_atomic() {
        matches!(premise_counts, [] | [0])
    } else {
        premise_counts.iter().all(|n| (1..=2).contains(n))
    };
    if valid {
        return Ok(());
    }

    error!(
        "Malformed branches under `{}`: premise counts {:?}",
        root, premise_counts
    );
    Err(SeqError::DecodeError(format!(
        "malformed branches under `{root}`: premise counts {premise_counts:?}"
    )))
}

fn check_tree(tree: &ProofTree) -> SeqResult<()> {
    if tree.is_grown() == tree.branches().is_empty() {
        error!("Inconsistent growth marker under `{}`", tree.root());
        return Err(SeqError::DecodeError(format!(
            "inconsistent growth marker under `{}`",
            tree.root()
        )));
    }

    let counts: Vec<usize> = tree.branches().iter().map(|b| b.children().len()).collect();
    check_shape(tree.root(), &counts)?;
    tree.branches()
        .iter()
        .flat_map(Branch::children)
        .try_for_each(check_tree)
}

/// Render `tree` as TOML.
pub fn to_text(tree: &ProofTree) -> SeqResult<String> {
    toml::to_string(&TreeRecord::from(tree)).map_err(|e| SeqError::EncodeError(e.to_string()))
}

/// Parse a tree written by [`to_text`].
pub fn from_text(text: &str) -> SeqResult<ProofTree> {
    let record: TreeRecord =
        toml::from_str(text).map_err(|e| SeqError::DecodeError(e.to_string()))?;
    ProofTree::try_from(&record)
}

/// Binary proof tree storage format.
///
/// This wrapper should be kept stable: new versions must still be able to read the magic
/// bytes and the version requirement of files written by older ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeStorage {
    pub magic: [u8; 8],
    pub version_req: VersionReq,
    pub data: Vec<u8>,
}

/// Version of this crate, the only one able to read the binary blobs it writes.
pub fn storage_version() -> SeqResult<Version> {
    Version::parse(env!("CARGO_PKG_VERSION")).map_err(|e| SeqError::Unknown(e.to_string()))
}

/// Encode `tree` into the binary format.
pub fn encode(tree: &ProofTree) -> SeqResult<Vec<u8>> {
    let data = serde_cbor::to_vec(tree).map_err(|e| {
        error!("Failed to serialize proof tree: {}", e);
        SeqError::EncodeError(e.to_string())
    })?;

    let version = storage_version()?;
    let storage = TreeStorage {
        magic: TREE_STORAGE_MAGIC,
        version_req: VersionReq {
            comparators: vec![Comparator {
                op: Op::Exact,
                major: version.major,
                minor: Some(version.minor),
                patch: Some(version.patch),
                pre: version.pre.clone(),
            }],
        },
        data,
    };

    trace!(
        "Serializing proof tree storage wrapper with version requirement {}",
        storage.version_req
    );
    serde_cbor::to_vec(&storage).map_err(|e| {
        error!("Failed to serialize proof tree storage wrapper: {}", e);
        SeqError::EncodeError(e.to_string())
    })
}

/// Decode a tree written by [`encode`].
pub fn decode(bytes: &[u8]) -> SeqResult<ProofTree> {
    trace!("Deserializing proof tree storage ({} bytes)", bytes.len());

    let storage: TreeStorage = serde_cbor::from_slice(bytes).map_err(|e| {
        error!("Failed to deserialize proof tree storage wrapper: {}", e);
        SeqError::DecodeError(e.to_string())
    })?;

    if storage.magic != TREE_STORAGE_MAGIC {
        error!("Invalid magic bytes in proof tree storage");
        return Err(SeqError::DecodeError(
            "invalid magic bytes in proof tree storage".to_string(),
        ));
    }

    let version = storage_version()?;
    if !storage.version_req.matches(&version) {
        error!(
            "Incompatible proof tree storage: required {}, found {}",
            storage.version_req, version
        );
        return Err(SeqError::IncompatibleStorage {
            req: storage.version_req,
            version,
        });
    }

    let tree = serde_cbor::from_slice(&storage.data).map_err(|e| {
        error!("Failed to deserialize proof tree: {}", e);
        SeqError::DecodeError(e.to_string())
    })?;
    check_tree(&tree)?;
    Ok(tree)
}

/// On-disk representation of a proof tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    Text,
    Binary,
}

impl StorageFormat {
    /// `.toml` files are text, everything else binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => StorageFormat::Text,
            _ => StorageFormat::Binary,
        }
    }
}

/// Write `tree` to `path`, creating parent directories as needed.
pub fn save(tree: &ProofTree, path: &Path) -> SeqResult<()> {
    let format = StorageFormat::from_path(path);
    let bytes = match format {
        StorageFormat::Text => to_text(tree)?.into_bytes(),
        StorageFormat::Binary => encode(tree)?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    debug!("Saved proof tree to {} ({:?})", path.display(), format);
    Ok(())
}

/// Read a tree saved by [`save`].
pub fn load(path: &Path) -> SeqResult<ProofTree> {
    let format = StorageFormat::from_path(path);
    debug!("Loading proof tree from {} ({:?})", path.display(), format);
    match format {
        StorageFormat::Text => from_text(&std::fs::read_to_string(path)?),
        StorageFormat::Binary => decode(&std::fs::read(path)?),
    }
}
