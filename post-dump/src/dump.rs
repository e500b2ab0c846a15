//! The `dump` command.
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use post_dump_shared::ContentType;
use tracing::info;

use crate::artifact;
use crate::cli::DumpArgs;
use crate::config::{Dependencies, Settings};
use crate::errors::DumpError;

/// Runs one export.
///
/// # Returns
///
/// * `Ok(Some(path))` - The script was written to `path`
/// * `Ok(None)` - The script was written to stdout
/// * `Err(DumpError)` - Configuration, source or output failure
pub async fn run(args: DumpArgs) -> Result<Option<PathBuf>, DumpError> {
    let content_type = ContentType::parse(&args.post_type)?;
    let settings = Settings::from_env(&args)?;
    let deps = Dependencies::new(&settings, &content_type, &args.taxonomies).await?;

    let generated_at = Utc::now();
    let script = deps
        .generator
        .generate(&deps.repository, deps.catalog.as_ref(), &content_type, generated_at)
        .await?
        .to_string();

    match args.output_dir {
        Some(directory) => {
            let path = artifact::write(&directory, &content_type, generated_at, &script)?;
            info!(
                path = %path.display(),
                mime_type = artifact::MIME_TYPE,
                bytes = script.len(),
                "Dump written"
            );
            Ok(Some(path))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(script.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
            Ok(None)
        }
    }
}
