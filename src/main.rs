mod cli;

use cli::{Args, CatalogCommand, Command, OptionsArgs, QuoteArgs};
use std::path::Path;
use std::process;
use txe_quote::adapters::outbound::console::StderrProgressReporter;
use txe_quote::adapters::outbound::filesystem::{FileSystemReader, JsonCatalogStore};
use txe_quote::adapters::outbound::formatters::CatalogTextFormatter;
use txe_quote::application::dto::OptionsRequest;
use txe_quote::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use txe_quote::application::read_models::QuoteReadModelBuilder;
use txe_quote::application::use_cases::{
    GenerateQuoteUseCase, ListOptionsUseCase, ManageCatalogUseCase,
};
use txe_quote::config::{
    discover_config, load_config_from_path, CliOverrides, Settings, CONFIG_FILENAME,
};
use txe_quote::ports::inbound::{CatalogAdminPort, CatalogRecord, RecordFilter};
use txe_quote::ports::outbound::QuoteRequestReader;
use txe_quote::quoting::domain::CatalogStats;
use txe_quote::quoting::policies::CompatibilityTable;
use txe_quote::shared::error::ExitCode;
use txe_quote::shared::Result;

#[tokio::main]
async fn main() {
    // clap exits with InvalidArguments (2) on its own
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(path)?),
        None => {
            let discovered = discover_config(Path::new("."))?;
            if discovered.is_some() {
                eprintln!("📋 Auto-discovered config file: {}", CONFIG_FILENAME);
            }
            discovered
        }
    };

    let format = match &args.command {
        Command::Quote(quote) => quote.format,
        _ => None,
    };
    let settings = Settings::resolve(
        config,
        CliOverrides {
            catalog_path: args.catalog,
            backups_dir: args.backups_dir,
            format,
        },
    )?;

    let table = load_compatibility_table(settings.compatibility_path.as_deref())?;
    let store = JsonCatalogStore::new(settings.catalog_path.clone(), settings.backups_dir.clone())
        .with_max_backups(settings.max_backups);

    match args.command {
        Command::Quote(quote) => run_quote(quote, &settings, store, table).await,
        Command::Options(options) => run_options(options, store, table).await,
        Command::Catalog { command } => {
            let admin = ManageCatalogUseCase::new(
                store,
                StderrProgressReporter::new(),
                table,
                Some(settings.updated_by.clone()),
            );
            run_catalog(command, &settings, &admin).await
        }
    }
}

fn load_compatibility_table(path: Option<&Path>) -> Result<CompatibilityTable> {
    match path {
        Some(path) => {
            let content = FileSystemReader::new().read_document(path, "Compatibility table")?;
            CompatibilityTable::from_yaml_str(&content).map_err(|e| {
                e.context(format!(
                    "Failed to load compatibility table: {}",
                    path.display()
                ))
            })
        }
        None => Ok(CompatibilityTable::builtin()),
    }
}

async fn run_quote(
    args: QuoteArgs,
    settings: &Settings,
    store: JsonCatalogStore,
    table: CompatibilityTable,
) -> Result<()> {
    let request = FileSystemReader::new().read_quote_request(&args.request)?;

    let use_case = GenerateQuoteUseCase::new(store, StderrProgressReporter::new(), table);
    let response = use_case.execute(request).await?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let read_model = QuoteReadModelBuilder::build(&response);
    let output = FormatterFactory::create(settings.format).format(&read_model)?;

    PresenterFactory::create(PresenterType::from(args.output)).present(&output)
}

async fn run_options(
    args: OptionsArgs,
    store: JsonCatalogStore,
    table: CompatibilityTable,
) -> Result<()> {
    let use_case = ListOptionsUseCase::new(store, table);
    let response = use_case
        .execute(OptionsRequest::new(args.model, args.throughput, args.inspect))
        .await?;

    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&response)?;
        json.push('\n');
        json
    } else {
        CatalogTextFormatter::options(&response)
    };
    PresenterFactory::create(PresenterType::Stdout).present(&output)
}

async fn run_catalog(
    command: CatalogCommand,
    settings: &Settings,
    admin: &impl CatalogAdminPort,
) -> Result<()> {
    let stdout = PresenterFactory::create(PresenterType::Stdout);
    let reader = FileSystemReader::new();

    match command {
        CatalogCommand::Show => {
            let catalog = admin.catalog().await?;
            stdout.present(&CatalogTextFormatter::summary(
                &catalog,
                &settings.catalog_path,
            ))
        }
        CatalogCommand::Seed => {
            let stats = admin.seed().await?;
            report_stats("Catalog seeded", &stats);
            Ok(())
        }
        CatalogCommand::Export { output } => {
            let mut content = admin.export().await?;
            content.push('\n');
            PresenterFactory::create(PresenterType::from(output)).present(&content)
        }
        CatalogCommand::Import { file } => {
            let content = reader.read_document(&file, "Catalog document")?;
            let stats = admin.import(&content).await?;
            report_stats("Catalog imported", &stats);
            Ok(())
        }
        CatalogCommand::Backups => {
            let backups = admin.backups().await?;
            stdout.present(&CatalogTextFormatter::backups(&backups))
        }
        CatalogCommand::Restore { filename } => admin.restore(&filename).await,
        CatalogCommand::List {
            kind,
            search,
            group,
            model,
        } => {
            let filter = RecordFilter {
                search,
                group,
                model,
            };
            let records = admin.list_records(kind, &filter).await?;
            stdout.present(&CatalogTextFormatter::records(&records))
        }
        CatalogCommand::Add { kind, file } => {
            let content = reader.read_document(&file, "Record file")?;
            admin.add_record(CatalogRecord::from_json(kind, &content)?).await
        }
        CatalogCommand::Update {
            kind,
            file,
            model_id,
        } => {
            let content = reader.read_document(&file, "Record file")?;
            admin
                .update_record(CatalogRecord::from_json(kind, &content)?, model_id.as_deref())
                .await
        }
        CatalogCommand::Remove {
            kind,
            key,
            model_id,
        } => {
            admin
                .remove_record(kind, &key, model_id.as_deref())
                .await?;
            Ok(())
        }
        CatalogCommand::RenameSku {
            sku,
            new_sku,
            model_id,
        } => {
            admin
                .change_license_sku(&sku, model_id.as_deref(), &new_sku)
                .await?;
            Ok(())
        }
    }
}

fn report_stats(action: &str, stats: &CatalogStats) {
    eprintln!(
        "✅ {}: {} model(s), {} module(s), {} license(s), {} SMS model(s)",
        action, stats.models, stats.io_modules, stats.licenses, stats.sms_models
    );
}
