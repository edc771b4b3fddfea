use super::ReportSink;
use crate::error::DataError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes each report as compact JSON to `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonChartWriter {
    dir: PathBuf,
}

impl JsonChartWriter {
    /// Creates the writer, creating `dir` if needed.
    ///
    /// # Errors
    /// Fails if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| DataError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl ReportSink for JsonChartWriter {
    fn publish(&self, name: &str, payload: serde_json::Value) -> Result<(), DataError> {
        let path = self.path_for(name);
        let body = serde_json::to_vec(&payload).map_err(|source| DataError::Serialize {
            name: name.to_string(),
            source,
        })?;
        fs::write(&path, body).map_err(|source| DataError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Saved report JSON");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::publish_chart;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Point {
        x: f64,
        label: &'static str,
    }

    #[test]
    fn test_writes_compact_json() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonChartWriter::new(dir.path().join("charts/nested")).unwrap();
        publish_chart(&writer, "point", &Point { x: 1.5, label: "a" }).unwrap();

        let written = fs::read_to_string(writer.path_for("point")).unwrap();
        assert_eq!(written, r#"{"label":"a","x":1.5}"#);
    }

    #[test]
    fn test_overwrites_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonChartWriter::new(dir.path()).unwrap();
        writer.publish("r", serde_json::json!([1, 2])).unwrap();
        writer.publish("r", serde_json::json!([3])).unwrap();
        assert_eq!(fs::read_to_string(writer.path_for("r")).unwrap(), "[3]");
    }
}
