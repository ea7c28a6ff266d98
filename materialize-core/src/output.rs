// Threat map rendering and feature file output

use crate::error::{MaterializeError, Result};
use crate::threat::ThreatMap;
use serde::Serialize;
use serde::ser::Error as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const FEATURE_SUFFIX: &str = ".feature";

/// Pretty JSON with four-space indentation, keys in STRIDE order.
pub fn render_threat_map(threats: &ThreatMap) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    threats
        .serialize(&mut serializer)
        .map_err(MaterializeError::Render)?;
    String::from_utf8(buf)
        .map_err(|e| MaterializeError::Render(serde_json::Error::custom(e)))
}

/// `<diagram file name>.feature`, relative to the working directory.
pub fn default_feature_path(diagram: &Path) -> PathBuf {
    let name = diagram
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "diagram".to_string());
    PathBuf::from(format!("{}{}", name, FEATURE_SUFFIX))
}

/// Write the feature file through a temporary sibling and rename it into
/// place, so a failed write never leaves a truncated artifact behind.
///
/// An existing file keeps its permissions. A new file gets the mode a plain
/// create would give it under the current umask.
pub fn write_feature_file(path: &Path, contents: &str) -> Result<()> {
    let output_error = |source: std::io::Error| MaterializeError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir).map_err(output_error)?;
    if let Some(permissions) = existing {
        file.as_file()
            .set_permissions(permissions)
            .map_err(output_error)?;
    }
    file.write_all(contents.as_bytes()).map_err(output_error)?;
    file.flush().map_err(output_error)?;
    file.persist(path).map_err(|e| output_error(e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote feature file");
    Ok(())
}
