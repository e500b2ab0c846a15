//! Dependency initialization and wiring for the dump command.
use post_dump_generator::{DumpGenerator, GeneratorConfig};
use post_dump_repository::{MysqlRepository, SourceTaxonomyCatalog, StaticTaxonomyCatalog, TaxonomyCatalog};
use post_dump_shared::ContentType;
use tracing::info;

use super::Settings;
use crate::errors::DumpError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub repository: MysqlRepository,
    pub catalog: Box<dyn TaxonomyCatalog>,
    pub generator: DumpGenerator,
}

impl Dependencies {
    /// Connects to the source and builds the generator.
    ///
    /// Explicit `taxonomies` replace discovery from the source data.
    pub async fn new(
        settings: &Settings,
        content_type: &ContentType,
        taxonomies: &[String],
    ) -> Result<Self, DumpError> {
        info!(
            database = %settings.database_name,
            table_prefix = %settings.table_prefix,
            max_connections = settings.max_connections,
            "Initializing dependencies"
        );

        let repository =
            MysqlRepository::connect(&settings.database_url, settings.max_connections).await?;
        info!("Database connection established");

        let catalog: Box<dyn TaxonomyCatalog> = if taxonomies.is_empty() {
            Box::new(SourceTaxonomyCatalog::new(settings.table_prefix.clone()))
        } else {
            Box::new(
                StaticTaxonomyCatalog::new().with(content_type.as_str(), taxonomies.iter().cloned()),
            )
        };

        let generator = DumpGenerator::new(GeneratorConfig::new(
            settings.table_prefix.clone(),
            settings.database_name.clone(),
        ));

        Ok(Self {
            repository,
            catalog,
            generator,
        })
    }
}
