use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use txe_quote::application::dto::OutputFormat;
use txe_quote::ports::inbound::{ModelFilter, RecordKind};
use txe_quote::quoting::domain::LicenseGroup;

/// Configure TippingPoint TXE appliances and build quotes
#[derive(Parser, Debug)]
#[command(name = "txe-quote")]
#[command(version)]
#[command(
    about = "Configure TippingPoint TXE appliances and build quotes",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./txe-quote.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Product catalog document
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Directory holding catalog backups
    #[arg(long, global = true, value_name = "DIR")]
    pub backups_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a quote from a request file
    Quote(QuoteArgs),

    /// Show the modules and licenses offered for a chassis selection
    Options(OptionsArgs),

    /// Inspect and edit the product catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(ClapArgs, Debug)]
pub struct QuoteArgs {
    /// Quote request (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub request: PathBuf,

    /// Output format: json, markdown or table
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct OptionsArgs {
    /// Chassis id, e.g. txe-8600
    #[arg(short, long)]
    pub model: String,

    /// Throughput tier in Gbps (defaults to the first tier)
    #[arg(short, long, value_name = "GBPS")]
    pub throughput: Option<f64>,

    /// Inspection license SKU bounding the ThreatDV list
    #[arg(short, long, value_name = "SKU")]
    pub inspect: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Print catalog metadata and record counts
    Show,

    /// Replace the catalog with the built-in TXE product data
    Seed,

    /// Write the catalog as JSON
    Export {
        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate and store a catalog document
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List stored backups, newest first
    Backups,

    /// Replace the catalog with a stored backup
    Restore {
        /// Backup filename as printed by `catalog backups`
        filename: String,
    },

    /// List records of one kind: models, modules, licenses or sms
    List {
        kind: RecordKind,

        /// Case-insensitive match on name or SKU
        #[arg(short, long)]
        search: Option<String>,

        /// License group: INSPECT or THREATDV
        #[arg(short, long)]
        group: Option<LicenseGroup>,

        /// License binding: a model id, or NONE for unbound licenses
        #[arg(short, long)]
        model: Option<ModelFilter>,
    },

    /// Add a record read from a JSON file
    Add {
        kind: RecordKind,

        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },

    /// Replace a record with the contents of a JSON file
    Update {
        kind: RecordKind,

        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Bound model of the license being replaced, when it changes
        #[arg(long, value_name = "ID")]
        model_id: Option<String>,
    },

    /// Remove a record by model id or SKU
    Remove {
        kind: RecordKind,

        key: String,

        /// Bound model of the license to remove
        #[arg(long, value_name = "ID")]
        model_id: Option<String>,
    },

    /// Give a license a new SKU
    RenameSku {
        sku: String,

        new_sku: String,

        /// Bound model of the license to rename
        #[arg(long, value_name = "ID")]
        model_id: Option<String>,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_quote_command() {
        let args = Args::try_parse_from([
            "txe-quote",
            "--catalog",
            "catalog.json",
            "quote",
            "--request",
            "quote.yml",
            "-f",
            "md",
        ])
        .unwrap();

        assert_eq!(args.catalog, Some(PathBuf::from("catalog.json")));
        match args.command {
            Command::Quote(quote) => {
                assert_eq!(quote.request, PathBuf::from("quote.yml"));
                assert_eq!(quote.format, Some(OutputFormat::Markdown));
                assert!(quote.output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "txe-quote",
            "catalog",
            "show",
            "--backups-dir",
            "backups",
        ])
        .unwrap();
        assert_eq!(args.backups_dir, Some(PathBuf::from("backups")));
    }

    #[test]
    fn test_parse_catalog_list_filters() {
        let args = Args::try_parse_from([
            "txe-quote",
            "catalog",
            "list",
            "licenses",
            "--group",
            "threatdv",
            "--model",
            "none",
        ])
        .unwrap();

        match args.command {
            Command::Catalog {
                command: CatalogCommand::List { kind, group, model, search },
            } => {
                assert_eq!(kind, RecordKind::License);
                assert_eq!(group, Some(LicenseGroup::ThreatDv));
                assert_eq!(model, Some(ModelFilter::Unbound));
                assert!(search.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rename_sku() {
        let args = Args::try_parse_from([
            "txe-quote",
            "catalog",
            "rename-sku",
            "TPNN0276",
            "TPNN0999",
            "--model-id",
            "txe-8600",
        ])
        .unwrap();

        match args.command {
            Command::Catalog {
                command: CatalogCommand::RenameSku { sku, new_sku, model_id },
            } => {
                assert_eq!(sku, "TPNN0276");
                assert_eq!(new_sku, "TPNN0999");
                assert_eq!(model_id.as_deref(), Some("txe-8600"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = Args::try_parse_from([
            "txe-quote",
            "quote",
            "--request",
            "quote.yml",
            "--format",
            "pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_record_kind_is_rejected() {
        let result = Args::try_parse_from(["txe-quote", "catalog", "list", "chassis"]);
        assert!(result.is_err());
    }
}
