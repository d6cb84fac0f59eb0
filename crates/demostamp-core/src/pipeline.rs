//! File-to-file stamping.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use demostamp_loose::LoadError;

use crate::output::to_pretty_json;
use crate::patch::PatchError;
use crate::walk::{walk_document, PatchStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampOptions {
    /// Anchor instant all times are derived from.
    pub now: DateTime<Utc>,
    /// Rewrite `createTime`/`updateTime`/`pinnedTime` even when present.
    pub overwrite: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum StampError {
    #[error("failed to read `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load fixture text, patch it, and return the output JSON text.
pub fn stamp_text(raw: &str, opts: &StampOptions) -> Result<(String, PatchStats), StampError> {
    let mut doc = demostamp_loose::load_any(raw)?;
    let stats = walk_document(&mut doc, opts.now, opts.overwrite)?;
    Ok((to_pretty_json(&doc)?, stats))
}

/// Stamp `input` into `output`. The output file is only touched after the
/// whole document has been patched and serialized.
pub fn stamp_file(input: &Path, output: &Path, opts: &StampOptions) -> Result<PatchStats, StampError> {
    let raw = fs::read_to_string(input).map_err(|source| StampError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let (text, stats) = stamp_text(&raw, opts)?;
    fs::write(output, text).map_err(|source| StampError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(stats)
}
