//! Home-directory and environment expansion for user-supplied paths.

use std::path::{Path, PathBuf};

use crate::error::{FcdError, Result};

/// Resolve the current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| {
            FcdError::InvalidInput("HOME is not set; cannot expand '~'".to_string())
        })
}

/// Replace a leading `~` with the home directory.
///
/// Only the first character is considered, so `~/x` and `~x` both expand.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    match path.strip_prefix('~') {
        Some(rest) => {
            let home = home_dir()?;
            let mut joined = home.into_os_string();
            joined.push(rest);
            Ok(PathBuf::from(joined))
        }
        None => Ok(PathBuf::from(path)),
    }
}

/// Expand `$VAR` and `${VAR}` references from the process environment.
///
/// Unset variables expand to the empty string. A `$` that does not start a
/// valid reference is kept as-is.
pub fn expand_env(input: &str) -> String {
    expand_env_with(input, |name| std::env::var(name).ok())
}

fn expand_env_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                let name = &braced[..end];
                if is_var_name(name) {
                    out.push_str(&lookup(name).unwrap_or_default());
                    rest = &braced[end + 1..];
                    continue;
                }
            }
            out.push('$');
            rest = after;
            continue;
        }

        let name_len = after
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
            .map(|(i, _)| i)
            .unwrap_or(after.len());
        if name_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }

        out.push_str(&lookup(&after[..name_len]).unwrap_or_default());
        rest = &after[name_len..];
    }

    out.push_str(rest);
    out
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Expand `~` first, then environment variables.
pub fn expand(path: &str) -> Result<PathBuf> {
    let home_expanded = expand_home(path)?;
    Ok(PathBuf::from(expand_env(&home_expanded.to_string_lossy())))
}

/// True if anything (file, directory, dangling symlink) exists at `path`.
pub fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
