//! Naming and writing of the exported script.
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use post_dump_shared::ContentType;

use crate::errors::DumpError;

/// Media type of the exported file.
pub const MIME_TYPE: &str = "application/sql";

/// File name of a dump, e.g. `ptsd-post-2024-05-17-093000.sql`.
pub fn file_name(content_type: &ContentType, generated_at: DateTime<Utc>) -> String {
    format!(
        "ptsd-{}-{}.sql",
        content_type,
        generated_at.format("%Y-%m-%d-%H%M%S")
    )
}

/// Writes `script` into `directory`, creating it if needed.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(DumpError)` - The directory or file could not be written
pub fn write(
    directory: &Path,
    content_type: &ContentType,
    generated_at: DateTime<Utc>,
    script: &str,
) -> Result<PathBuf, DumpError> {
    fs::create_dir_all(directory)?;
    let path = directory.join(file_name(content_type, generated_at));
    fs::write(&path, script)?;
    Ok(path)
}
