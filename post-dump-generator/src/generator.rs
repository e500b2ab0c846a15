//! The dump generator.
use chrono::{DateTime, Utc};
use post_dump_repository::{MysqlEscaper, SessionSource, TaxonomyCatalog, ValueEscaper};
use post_dump_shared::ContentType;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::dialect::{Dialect, MysqlDialect};
use crate::errors::GenerateError;
use crate::extraction::{self, ExportSnapshot, Queries};
use crate::script::SqlScript;
use crate::stages::{self, Emission};

/// Compiles the subgraph of one content type into a replayable SQL script.
///
/// Source identifiers never reach the script as keys: every copied row gets a
/// fresh key at replay, captured into a session variable that later
/// statements reference.
pub struct DumpGenerator {
    config: GeneratorConfig,
    queries: Queries,
    escaper: Box<dyn ValueEscaper>,
    dialect: Box<dyn Dialect>,
}

impl DumpGenerator {
    /// Creates a generator emitting MySQL.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_dialect(config, Box::new(MysqlEscaper::new()), Box::new(MysqlDialect::new()))
    }

    pub fn with_dialect(
        config: GeneratorConfig,
        escaper: Box<dyn ValueEscaper>,
        dialect: Box<dyn Dialect>,
    ) -> Self {
        let queries = Queries::new(config.table_prefix.clone());
        Self {
            config,
            queries,
            escaper,
            dialect,
        }
    }

    /// Reads the subgraph of `content_type` from `source` and renders it.
    ///
    /// One session is opened for the whole read and released before the
    /// script is rendered, on success and on error alike.
    ///
    /// # Arguments
    ///
    /// * `source` - Hands out the read session
    /// * `catalog` - Lists the taxonomies the cleanup clears
    /// * `content_type` - The content type to export
    /// * `generated_at` - Timestamp written to the header
    ///
    /// # Returns
    ///
    /// * `Ok(SqlScript)` - The complete script
    /// * `Err(GenerateError)` - The source could not be read
    pub async fn generate<S: SessionSource>(
        &self,
        source: &S,
        catalog: &dyn TaxonomyCatalog,
        content_type: &ContentType,
        generated_at: DateTime<Utc>,
    ) -> Result<SqlScript, GenerateError> {
        info!(
            content_type = %content_type,
            prefix = %self.config.table_prefix,
            "Starting export"
        );

        let snapshot = {
            let mut session = source.open().await?;
            extraction::extract(&mut session, catalog, &self.queries, content_type).await?
        };

        let script = self.render(&snapshot, content_type, generated_at)?;
        info!(
            content_type = %content_type,
            statements = script.statements().count(),
            "Export complete"
        );
        Ok(script)
    }

    /// Renders an already extracted snapshot.
    pub fn render(
        &self,
        snapshot: &ExportSnapshot,
        content_type: &ContentType,
        generated_at: DateTime<Utc>,
    ) -> Result<SqlScript, GenerateError> {
        let mut emission = Emission::new(
            &self.config,
            self.dialect.as_ref(),
            self.escaper.as_ref(),
            content_type,
            generated_at,
        );
        stages::assemble(&mut emission, snapshot)
    }
}
