use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Path resolution errors, each with a fixed control-channel reply.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("path escapes the user root: {0}")]
    PathEscape(PathBuf),

    #[error("no such path: {0}")]
    NotFound(PathBuf),

    #[error("failed to resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SandboxError {
    pub fn to_ftp_reply(&self) -> &'static [u8] {
        match self {
            SandboxError::PathEscape(_) => b"550 Path is outside of the allowed area.\r\n",
            SandboxError::NotFound(_) => b"550 No such file or directory.\r\n",
            SandboxError::Resolve { .. } => b"550 No such file or directory.\r\n",
        }
    }
}

/// Resolves a client-supplied path that must already exist.
///
/// An argument starting with `/` is interpreted relative to the jail root,
/// anything else relative to the current directory. The candidate is
/// canonicalized against the real filesystem, so `..` segments and symlinks
/// cannot sneak past the prefix check below.
pub fn resolve_existing(root: &Path, current_dir: &Path, arg: &str) -> Result<PathBuf, SandboxError> {
    let candidate = join_candidate(root, current_dir, arg);
    let resolved = canonicalize(&candidate)?;
    check_within(root, resolved)
}

/// Resolves a client-supplied path whose final component may not exist yet,
/// as needed by STOR, MKD and RNTO destinations.
///
/// The parent must exist and canonicalize inside the jail; the final
/// component must be a plain name. When the full path already exists it is
/// resolved exactly like `resolve_existing`.
pub fn resolve_target(root: &Path, current_dir: &Path, arg: &str) -> Result<PathBuf, SandboxError> {
    let candidate = join_candidate(root, current_dir, arg);

    match std::fs::canonicalize(&candidate) {
        Ok(resolved) => return check_within(root, resolved),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SandboxError::Resolve {
                path: candidate,
                source,
            })
        }
    }

    // `file_name` is None for paths ending in `..`, which must not bypass
    // canonicalization by being re-joined verbatim.
    let name = match candidate.components().next_back() {
        Some(Component::Normal(name)) => name.to_os_string(),
        _ => return Err(SandboxError::PathEscape(candidate)),
    };
    let parent = match candidate.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Err(SandboxError::PathEscape(candidate)),
    };

    let resolved_parent = canonicalize(parent)?;
    check_within(root, resolved_parent.join(name))
}

fn join_candidate(root: &Path, current_dir: &Path, arg: &str) -> PathBuf {
    if let Some(jail_relative) = arg.strip_prefix('/') {
        root.join(jail_relative)
    } else {
        current_dir.join(arg)
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, SandboxError> {
    std::fs::canonicalize(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SandboxError::NotFound(path.to_path_buf()),
        _ => SandboxError::Resolve {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn check_within(root: &Path, resolved: PathBuf) -> Result<PathBuf, SandboxError> {
    if resolved.starts_with(root) {
        Ok(resolved)
    } else {
        Err(SandboxError::PathEscape(resolved))
    }
}
