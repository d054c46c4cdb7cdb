use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Access denied: path '{path}' is outside workspace '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Access denied: symlink '{path}' points outside workspace")]
    SymlinkOutsideRoot { path: PathBuf },

    #[error("Access denied: cannot resolve symlink '{path}'")]
    UnresolvableSymlink { path: PathBuf },

    #[error("Workspace root '{root}' is not accessible: {error}")]
    InvalidRoot { root: PathBuf, error: io::Error },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Resolves `input_path` against `root` and verifies the result stays inside it.
///
/// This function performs the following checks:
/// 1. Joins the input onto the canonical root (absolute inputs replace it)
/// 2. Lexically removes `.` and `..` components and checks containment
/// 3. Resolves symlinks along the longest existing prefix and checks again
///
/// The target itself does not need to exist, so the result can be used for
/// writes. A dangling symlink anywhere on the path is rejected.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The resolved path, guaranteed to be under the root
/// * `Err(PathSecurityError)` - If the path escapes the root or cannot be resolved
pub fn resolve_within_root(root: &Path, input_path: &str) -> Result<PathBuf, PathSecurityError> {
    let canonical_root = root.canonicalize().map_err(|e| PathSecurityError::InvalidRoot {
        root: root.to_path_buf(),
        error: e,
    })?;

    let requested = normalize(&canonical_root.join(input_path));
    if !is_within_root(&requested, &canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: requested,
            root: canonical_root,
        });
    }

    let resolved = resolve_existing_prefix(&requested)?;
    if !is_within_root(&resolved, &canonical_root) {
        return Err(PathSecurityError::SymlinkOutsideRoot { path: requested });
    }

    Ok(resolved)
}

/// Checks if a path is within (or equal to) a root directory
fn is_within_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

/// Lexically resolves `.` and `..`; `..` at the filesystem root is dropped.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Canonicalizes the longest existing prefix of `path` and re-appends the
/// components that do not exist yet.
fn resolve_existing_prefix(path: &Path) -> Result<PathBuf, PathSecurityError> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();

    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                for part in missing.iter().rev() {
                    resolved.push(part);
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if existing.symlink_metadata().is_ok() {
                    return Err(PathSecurityError::UnresolvableSymlink {
                        path: existing.to_path_buf(),
                    });
                }
                match (existing.parent(), existing.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_os_string());
                        existing = parent;
                    }
                    _ => {
                        return Err(PathSecurityError::IoError {
                            path: path.to_path_buf(),
                            error: e,
                        });
                    }
                }
            }
            Err(e) => {
                return Err(PathSecurityError::IoError {
                    path: path.to_path_buf(),
                    error: e,
                });
            }
        }
    }
}
