//! Marker-delimited splicing of rendered text into artifact files.
//!
//! An artifact file owns everything outside its marker pair; generation
//! replaces only the lines strictly between the first begin marker and the
//! next end marker. Files are rewritten only when the splice changes bytes,
//! so repeated runs leave timestamps and content alone.

use std::fs;
use std::io;
use std::path::Path;

/// The line opening a generated region for `label`.
pub fn begin_marker(label: &str) -> String {
    format!("// --- begin generated {label} ---")
}

/// The line closing a generated region for `label`.
pub fn end_marker(label: &str) -> String {
    format!("// --- end generated {label} ---")
}

/// Why one artifact could not be patched. Failures are per task; the run
/// records them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("artifact `{0}` does not exist")]
    MissingArtifact(String),
    #[error("artifact `{path}` has no `{marker}` line")]
    MissingBeginMarker { path: String, marker: String },
    #[error("artifact `{path}` has no `{marker}` line after its begin marker")]
    MissingEndMarker { path: String, marker: String },
    #[error("failed to rewrite `{path}`")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Updated,
    Unchanged,
}

/// Splices `replacement` between the `label` markers of `content`.
///
/// Markers match on trimmed lines, so regions may sit at any indentation.
/// The marker lines themselves are kept verbatim; everything else in the
/// file is carried over byte for byte.
pub fn splice(
    content: &str,
    path: &str,
    label: &str,
    replacement: &str,
) -> Result<String, PatchError> {
    let begin = begin_marker(label);
    let end = end_marker(label);

    let mut offset = 0;
    let mut region_start = None;
    let mut region_end = None;
    for line in content.split_inclusive('\n') {
        let next = offset + line.len();
        if region_start.is_none() {
            if line.trim() == begin {
                region_start = Some(next);
            }
        } else if line.trim() == end {
            region_end = Some(offset);
            break;
        }
        offset = next;
    }

    let Some(start) = region_start else {
        return Err(PatchError::MissingBeginMarker {
            path: path.to_string(),
            marker: begin,
        });
    };
    let Some(stop) = region_end else {
        return Err(PatchError::MissingEndMarker {
            path: path.to_string(),
            marker: end,
        });
    };

    let mut patched = String::with_capacity(content.len() + replacement.len());
    patched.push_str(&content[..start]);
    patched.push_str(replacement);
    if !replacement.is_empty() && !replacement.ends_with('\n') {
        patched.push('\n');
    }
    patched.push_str(&content[stop..]);
    Ok(patched)
}

/// Reads an artifact, splices the `label` region, and writes it back if the
/// content changed.
pub fn patch_file(
    path: &Path,
    label: &str,
    replacement: &str,
) -> Result<PatchOutcome, PatchError> {
    let shown = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            PatchError::MissingArtifact(shown.clone())
        } else {
            PatchError::Io {
                path: shown.clone(),
                source,
            }
        }
    })?;
    let patched = splice(&content, &shown, label, replacement)?;
    if patched == content {
        return Ok(PatchOutcome::Unchanged);
    }
    fs::write(path, &patched).map_err(|source| PatchError::Io {
        path: shown,
        source,
    })?;
    Ok(PatchOutcome::Updated)
}
