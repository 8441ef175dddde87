pub mod fixtures;

use graphe::{ContentDocument, PipelineBuilder, PipelineError};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Compile markup source with a style sheet given as a JSON value.
pub fn compile_with_sheet(source: &str, sheet: &Value) -> Result<ContentDocument, PipelineError> {
    let pipeline = PipelineBuilder::new()
        .with_style_json(&serde_json::to_string(sheet)?)?
        .build();
    pipeline.compile(source)
}

/// Writes `contents` to `name` inside a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn write_temp(name: &str, contents: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(name);
    std::fs::write(&path, contents)?;
    Ok((dir, path))
}
