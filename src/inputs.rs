//! Input resolution: glob expansion and the resolved input set
//!
//! Positional tokens are either literal paths passed through untouched or
//! glob patterns matched against the filesystem. A pattern that matches
//! nothing is returned as its literal text so the engine reports the missing
//! path under the name the user typed instead of it silently vanishing.

use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

/// Resolved input for one invocation.
#[derive(Debug, Clone)]
pub enum InputSet {
    /// Ordered file paths after glob expansion
    Files(Vec<PathBuf>),
    /// Whole standard input, buffered before any job starts
    Stdin(String),
}

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}'];

/// Expand positional tokens into concrete file paths.
///
/// Inclusion patterns are expanded in order; `!pattern` tokens are applied
/// afterwards against the union of all inclusion matches, so the final set
/// is independent of where the exclusion appeared among the arguments.
/// Exclusions never contribute inclusions.
pub fn expand_globs(tokens: &[String]) -> Vec<PathBuf> {
    let mut expanded: Vec<PathBuf> = Vec::new();
    let mut exclusions: Vec<&str> = Vec::new();

    for token in tokens {
        match token.strip_prefix('!') {
            Some(pattern) => exclusions.push(pattern),
            None => expanded.extend(expand_one(token)),
        }
    }

    for pattern in exclusions {
        let Ok(matcher) = compile(pattern) else {
            tracing::warn!(pattern, "skipping invalid exclusion pattern");
            continue;
        };
        expanded.retain(|path| !matcher.is_match(path));
    }

    expanded
}

fn expand_one(token: &str) -> Vec<PathBuf> {
    // Literal tokens pass through unchanged, including empty ones and paths
    // that happen to exist under their exact spelling.
    if token.is_empty() || !token.contains(GLOB_META) || Path::new(token).exists() {
        return vec![PathBuf::from(token)];
    }

    let matcher = match compile(token) {
        Ok(matcher) => matcher,
        Err(error) => {
            tracing::warn!(pattern = %token, %error, "treating invalid glob as a literal path");
            return vec![PathBuf::from(token)];
        }
    };

    let root = literal_prefix(token);
    let mut matches: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
        // Directories are never inputs
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path().strip_prefix("./").unwrap_or(entry.path());
        if matcher.is_match(path) {
            matches.push(path.to_path_buf());
        }
    }

    matches.sort();

    if matches.is_empty() {
        vec![PathBuf::from(token)]
    } else {
        matches
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    // literal_separator keeps `*` from crossing directory boundaries; `**`
    // still does.
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

/// Directory to start walking from: the pattern's components up to the first
/// one carrying a glob metacharacter.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();

    for component in Path::new(pattern).components() {
        match component {
            Component::Normal(part) if part.to_string_lossy().contains(GLOB_META) => break,
            other => root.push(other.as_os_str()),
        }
    }

    // The last literal component may be a file-name prefix rather than a
    // directory; matching happens against full paths, so walking its parent
    // is enough only when the prefix is not itself a directory.
    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else if root.is_dir() {
        root
    } else {
        root.pop();
        if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_tokens_pass_through() {
        let expanded = expand_globs(&["no-such-file.css".to_string()]);
        assert_eq!(expanded, vec![PathBuf::from("no-such-file.css")]);
    }

    #[test]
    fn test_unmatched_pattern_returns_literal() {
        let expanded = expand_globs(&["no-such-dir-zz/*.css".to_string()]);
        assert_eq!(expanded, vec![PathBuf::from("no-such-dir-zz/*.css")]);
    }

    #[test]
    fn test_exclusion_never_contributes() {
        let expanded = expand_globs(&["!*.css".to_string()]);
        assert!(expanded.is_empty());
    }
}
