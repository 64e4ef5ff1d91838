//! File collaborators around the pipeline: schema in, declarations out.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::config::{OUTPUT_FILE_EXTENSION, SCHEMA_FILE_EXTENSION};
use crate::error::{Error, Result};

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

pub fn read_schema(path: &Path) -> Result<String> {
    if !has_extension(path, SCHEMA_FILE_EXTENSION) {
        return Err(Error::SchemaFormat { path: path.to_path_buf() });
    }
    let source = std::fs::read_to_string(path)
        .map_err(|source| Error::SchemaRead { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read schema");
    Ok(source)
}

pub fn check_output_path(path: &Path) -> Result<()> {
    if !has_extension(path, OUTPUT_FILE_EXTENSION) {
        return Err(Error::OutputFormat { path: path.to_path_buf() });
    }
    Ok(())
}

pub fn write_definitions(path: &Path, contents: &str) -> Result<()> {
    check_output_path(path)?;
    write_atomic(path, contents).map_err(|source| Error::OutputWrite { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote definitions");
    Ok(())
}

/// Temp file in the destination directory, synced, then renamed over the
/// target. Readers never observe a partially written file.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|error| error.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn schema_extension_is_enforced() {
        let error = read_schema(Path::new("schema.json")).unwrap_err();
        assert_eq!(error.kind(), "SchemaFormat");
    }

    #[test]
    fn missing_schema_is_a_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let error = read_schema(&temp_dir.path().join("missing.graphql")).unwrap_err();
        assert_eq!(error.kind(), "SchemaRead");
    }

    #[test]
    fn output_extension_is_enforced() {
        assert_eq!(check_output_path(Path::new("out.js")).unwrap_err().kind(), "OutputFormat");
        assert_eq!(check_output_path(Path::new("definitions")).unwrap_err().kind(), "OutputFormat");
        assert!(check_output_path(Path::new("definitions.ts")).is_ok());
    }

    #[test]
    fn writes_replace_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("definitions.ts");
        std::fs::write(&target, "old").unwrap();

        write_definitions(&target, "export type A = B;\n").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "export type A = B;\n");

        // only the target remains; the temp file was renamed over it
        let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nope").join("definitions.ts");
        let error = write_definitions(&target, "").unwrap_err();
        assert_eq!(error.kind(), "OutputWrite");
        assert!(!target.exists());
    }
}
