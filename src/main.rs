// src/main.rs

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use localpage::config::GenerateRequest;
use localpage::formatting::{render_details, render_listing};
use localpage::{
    deliver, find_page, generate_landing_page, plan_export, Action, AppConfig, AppError,
    CommandLineInput, ContentSource, DeliveryTarget, DurableSlot, ErrorKind, FileSlot,
    MockContentSource, OpenAiClient, OutputReport, PageStore, RetryingSlot,
};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("localpage.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Opens the page store on the configured file, with bounded retry on I/O.
fn open_store(config: &AppConfig) -> PageStore {
    let slot: Arc<dyn DurableSlot> = Arc::new(RetryingSlot::new(FileSlot::new(&config.store_path)));
    let store = PageStore::open(slot);
    log::debug!(
        "Using slot '{}' at {}",
        store.slot_name(),
        config.store_path.display()
    );
    store.subscribe(|pages| log::debug!("Page store now holds {} page(s)", pages.len()));
    store
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    let store = open_store(&config);

    match config.action {
        Action::Generate(request) => generate(&store, request).await,
        Action::List => {
            print!("{}", render_listing(store.list().iter(), Utc::now()));
            Ok(())
        }
        Action::Show { id } => {
            match find_page(&store, &id) {
                Some(page) => print!("{}", render_details(&page, Utc::now())),
                None => println!("No saved landing page matches '{}'.", id),
            }
            Ok(())
        }
        Action::Delete { id } => {
            let Some(page) = find_page(&store, &id) else {
                println!("No saved landing page matches '{}'.", id);
                return Ok(());
            };
            store.remove(page.id.as_str())?;
            println!("✓ Deleted \"{}\" ({})", page.headline(), page.id.short());
            Ok(())
        }
        Action::Export { id, options } => {
            let Some(page) = find_page(&store, &id) else {
                println!("No saved landing page matches '{}'.", id);
                return Ok(());
            };
            let plan = plan_export(&page, &options, Utc::now())?;
            let report = deliver(plan).into_result()?;
            report_deliveries(&report);
            Ok(())
        }
    }
}

async fn generate(store: &PageStore, request: GenerateRequest) -> Result<(), AppError> {
    let source: Box<dyn ContentSource> = if request.offline {
        Box::new(MockContentSource::new())
    } else {
        Box::new(OpenAiClient::new(request.settings.clone())?)
    };

    println!(
        "Generating landing page for \"{}\" in {}, {}...",
        request.params.keywords.primary(),
        request.params.city,
        request.params.state
    );

    let record = generate_landing_page(
        source.as_ref(),
        &request.credentials,
        &request.params,
        Utc::now(),
    )
    .await?;

    if request.save {
        store.add(record.clone())?;
        println!("✓ Saved \"{}\" ({})", record.headline(), record.id.short());
    } else {
        print!("{}", render_details(&record, Utc::now()));
    }

    if let Some(options) = &request.export {
        let plan = plan_export(&record, options, Utc::now())?;
        let report = deliver(plan).into_result()?;
        report_deliveries(&report);
    }

    Ok(())
}

fn report_deliveries(report: &OutputReport) {
    for completed in &report.completed {
        match &completed.operation {
            DeliveryTarget::WriteFile { path, .. } => {
                println!("✓ Exported to {}", path.display());
            }
            DeliveryTarget::OpenInViewer { path, .. } => {
                println!("✓ Opened {} for printing", path.display());
            }
            DeliveryTarget::PrintToStdout { .. } => {}
        }
    }
}

fn report_error(err: &AppError) {
    match err.kind() {
        ErrorKind::Configuration => {
            eprintln!("✗ {}", err);
        }
        ErrorKind::Generation => {
            eprintln!("✗ Failed to generate content: {}", err);
            if let Some(hint) = err.next_step() {
                eprintln!("  {}", hint);
            }
        }
        ErrorKind::Storage => {
            eprintln!("✗ Could not update saved landing pages: {}", err);
        }
        _ => eprintln!("✗ {}", err),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to initialize logging")?;

    let config = AppConfig::resolve(cli).context("Invalid configuration")?;

    if let Err(err) = run(config).await {
        log::debug!("Command failed: {:?}", err);
        report_error(&err);
        std::process::exit(1);
    }

    Ok(())
}
