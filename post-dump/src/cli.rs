//! Command-line interface.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "post-dump", version, about = "Export a post type as a replayable SQL script")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export every item of a post type with its media, terms and translations.
    Dump(DumpArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct DumpArgs {
    /// Post type to export.
    #[arg(long, default_value = "post")]
    pub post_type: String,

    /// Taxonomy attached to the post type; repeat for several. When given,
    /// the taxonomies are not discovered from the source.
    #[arg(long = "taxonomy", value_name = "NAME")]
    pub taxonomies: Vec<String>,

    /// Write the script into this directory instead of stdout.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Overrides DATABASE_URL.
    #[arg(long)]
    pub database_url: Option<String>,

    /// Overrides TABLE_PREFIX.
    #[arg(long)]
    pub table_prefix: Option<String>,

    /// Overrides DB_NAME.
    #[arg(long)]
    pub db_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump_args(argv: &[&str]) -> DumpArgs {
        let cli = Cli::try_parse_from(argv.iter().copied()).unwrap();
        match cli.command {
            Command::Dump(args) => args,
        }
    }

    #[test]
    fn test_defaults() {
        let args = dump_args(&["post-dump", "dump"]);
        assert_eq!(args.post_type, "post");
        assert!(args.taxonomies.is_empty());
        assert!(args.output_dir.is_none());
    }

    #[test]
    fn test_repeated_taxonomies() {
        let args = dump_args(&[
            "post-dump",
            "dump",
            "--post-type",
            "book",
            "--taxonomy",
            "genre",
            "--taxonomy",
            "author",
            "--output-dir",
            "/tmp/dumps",
        ]);
        assert_eq!(args.post_type, "book");
        assert_eq!(args.taxonomies, vec!["genre", "author"]);
        assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/dumps")));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["post-dump"]).is_err());
    }
}
