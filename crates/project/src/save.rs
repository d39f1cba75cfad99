//! Export serialization: writing `ExportedTimeline` as JSON.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ProjectError, ProjectResult};
use crate::export::ExportedTimeline;

/// Serialize an export to a pretty-printed JSON string.
pub fn to_json_string(export: &ExportedTimeline) -> ProjectResult<String> {
    let json = serde_json::to_string_pretty(export)?;
    debug!(
        segments = export.segments.len(),
        json_len = json.len(),
        "Serialized timeline export"
    );
    Ok(json)
}

/// Serialize an export to a compact (non-pretty) JSON string.
pub fn to_json_string_compact(export: &ExportedTimeline) -> ProjectResult<String> {
    let json = serde_json::to_string(export)?;
    debug!(
        segments = export.segments.len(),
        json_len = json.len(),
        "Serialized compact timeline export"
    );
    Ok(json)
}

/// Write an export to `path`.
///
/// The data goes to a temporary file next to the target first and is then
/// renamed over it, so an interrupted write never leaves a truncated file.
/// An export without segments is refused.
pub fn save_export(export: &ExportedTimeline, path: &Path) -> ProjectResult<()> {
    if export.segments.is_empty() {
        return Err(ProjectError::EmptyExport);
    }
    let json = to_json_string(export)?;
    let temp_path = path.with_extension("json.tmp");

    std::fs::write(&temp_path, json.as_bytes()).map_err(|e| {
        tracing::error!(path = %temp_path.display(), error = %e, "Failed to write temp file");
        ProjectError::Io(e)
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        tracing::error!(
            from = %temp_path.display(),
            to = %path.display(),
            error = %e,
            "Failed to rename temp file to target"
        );
        ProjectError::Io(e)
    })?;

    info!(
        segments = export.segments.len(),
        path = %path.display(),
        "Timeline exported"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_timeline::{EditLimits, Timeline};

    fn sample_export() -> ExportedTimeline {
        let mut tl = Timeline::new(EditLimits::default());
        tl.initialize(42.0);
        tl.split_at(10.0).unwrap();
        ExportedTimeline::from_timeline(&tl)
    }

    #[test]
    fn pretty_and_compact_agree() {
        let export = sample_export();
        let pretty = to_json_string(&export).expect("pretty");
        let compact = to_json_string_compact(&export).expect("compact");
        assert!(compact.len() < pretty.len());

        let a: serde_json::Value = serde_json::from_str(&pretty).expect("parse pretty");
        let b: serde_json::Value = serde_json::from_str(&compact).expect("parse compact");
        assert_eq!(a, b);
        assert_eq!(a["duration"], 42.0);
    }

    #[test]
    fn save_export_writes_file_without_temp_residue() {
        let dir = std::env::temp_dir().join("sl_project_save_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("timeline.json");
        let temp_path = path.with_extension("json.tmp");

        let export = sample_export();
        save_export(&export, &path).expect("save");

        assert!(path.exists());
        assert!(!temp_path.exists());
        let contents = std::fs::read_to_string(&path).expect("read");
        let back: ExportedTimeline = serde_json::from_str(&contents).expect("parse");
        assert_eq!(back, export);

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn save_export_into_missing_dir_fails() {
        let path = std::env::temp_dir()
            .join("sl_project_missing_dir")
            .join("nested")
            .join("timeline.json");
        let err = save_export(&sample_export(), &path).unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
    }

    #[test]
    fn empty_export_is_refused() {
        let tl = Timeline::new(EditLimits::default());
        let export = ExportedTimeline::from_timeline(&tl);
        let path = std::env::temp_dir().join("sl_project_empty.json");
        let err = save_export(&export, &path).unwrap_err();
        assert!(matches!(err, ProjectError::EmptyExport));
        assert!(!path.exists());
    }
}
