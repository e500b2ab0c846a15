//! Configuration types for the dump generator.

/// Table prefix used when none is configured.
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

/// Configuration for `DumpGenerator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Prefix shared by every table of the content store, e.g. `wp_`.
    ///
    /// The same prefix is used for the source reads and the emitted script.
    pub table_prefix: String,

    /// Source database name, recorded in the script header only.
    pub database_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            database_name: String::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(table_prefix: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            table_prefix: table_prefix.into(),
            database_name: database_name.into(),
        }
    }

    /// Full name of `table` with the configured prefix.
    pub fn table(&self, table: &str) -> String {
        format!("{}{}", self.table_prefix, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        let config = GeneratorConfig::default();
        assert_eq!(config.table("posts"), "wp_posts");
    }

    #[test]
    fn test_custom_prefix() {
        let config = GeneratorConfig::new("blog_", "content");
        assert_eq!(config.table("term_taxonomy"), "blog_term_taxonomy");
        assert_eq!(config.database_name, "content");
    }
}
