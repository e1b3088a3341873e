//! Output emission
//!
//! Writes minified text to stdout or to a destination file, creates
//! intermediate directories, writes the adjoining `.map` file, appends the
//! map-reference comment, and removes successfully inlined local files when
//! asked to.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::{Result, SlimcssError};

/// Source-map path for an output path: `<output>.map`.
pub fn map_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(".map");
    output.with_file_name(name)
}

/// Write one job's styles, plus its source map when present.
///
/// The map-reference comment is appended for every destination; the `.map`
/// file itself is only written for file destinations.
pub fn write_job(destination: Option<&Path>, styles: &str, source_map: Option<&Value>) -> Result<()> {
    let Some(map) = source_map else {
        return write_styles(destination, styles);
    };

    let map_file = destination.map(map_path);
    let map_name = map_file
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stdin.css.map".to_string());

    let body = format!("{}\n/*# sourceMappingURL={} */", styles, map_name);
    write_styles(destination, &body)?;

    if let Some(path) = map_file {
        let serialized = serde_json::to_string(map)?;
        std::fs::write(&path, serialized).map_err(|source| SlimcssError::Output {
            path: path.display().to_string(),
            source,
        })?;
    }

    Ok(())
}

fn write_styles(destination: Option<&Path>, styles: &str) -> Result<()> {
    match destination {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| SlimcssError::Output {
                    path: path.display().to_string(),
                    source,
                })?;
            }
            std::fs::write(path, styles).map_err(|source| SlimcssError::Output {
                path: path.display().to_string(),
                source,
            })
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(styles.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Best-effort removal of successfully inlined local files. Remote URLs are
/// skipped; deletion failures are never fatal.
pub fn remove_inlined_files(inlined: &[String]) {
    for location in inlined {
        if location.starts_with("http://")
            || location.starts_with("https://")
            || location.starts_with("//")
        {
            continue;
        }
        if let Err(error) = std::fs::remove_file(location) {
            tracing::debug!(path = %location, %error, "failed to remove inlined file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_path_appends_extension() {
        assert_eq!(
            map_path(Path::new("dist/one-min.css")),
            PathBuf::from("dist/one-min.css.map")
        );
        assert_eq!(map_path(Path::new("one")), PathBuf::from("one.map"));
    }
}
