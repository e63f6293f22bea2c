//! Command-line entry point for the form core.
//!
//! # Responsibility
//! - Spell amounts, derive document numbers and dates from the shell.
//! - Inspect, save, restore and clear form state in a SQLite-backed store.

use clap::{Args, Parser, Subcommand};
use docform_core::db::{open_db, Connection};
use docform_core::{
    format_long_date, generate_document_number, init_logging, number_to_words, today_iso_date,
    BlobKind, DocformConfig, DocumentKind, FileSignatureSource, FormFields, FormStateStore,
    InMemoryForm, RecordingPreview, SessionState, SettingKind, SqliteKeyValueStore,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "docform", version, about = "Contract and invoice form helper")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Spell an amount in English words.
    Words { value: u64 },
    /// Print the `YYYY.MM.DD` document number for a `YYYY-MM-DD` date.
    DocNumber { date: String },
    /// Print the long `DD Month YYYY` display date.
    LongDate { date: String },
    /// Print today's date and its document number.
    Today,
    /// Print everything saved in the store.
    Show(StoreArgs),
    /// Save field values (`id=value`) as the page would.
    Save {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        #[arg(long)]
        specification: Option<String>,
    },
    /// Restore saved state and refresh the default signature.
    Restore(StoreArgs),
    /// Remove the saved form data, specification and signature.
    Clear(StoreArgs),
}

#[derive(Debug, Args)]
struct StoreArgs {
    /// SQLite store file; falls back to `store_path` from config.
    #[arg(long)]
    store: Option<PathBuf>,
    /// Treat the page as an invoice page.
    #[arg(long)]
    invoice: bool,
}

impl StoreArgs {
    fn session(&self) -> SessionState {
        if self.invoice {
            SessionState::new(DocumentKind::Invoice)
        } else {
            SessionState::new(DocumentKind::Contract)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("docform: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => DocformConfig::load(path).map_err(|err| err.to_string())?,
        None => DocformConfig::default(),
    };
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir.clone();
    }
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    match cli.command {
        Command::Words { value } => println!("{}", number_to_words(value)),
        Command::DocNumber { date } => println!("{}", generate_document_number(&date)),
        Command::LongDate { date } => println!("{}", format_long_date(&date)),
        Command::Today => {
            let today = today_iso_date();
            println!("{today} {}", generate_document_number(&today));
        }
        Command::Show(args) => {
            let conn = open_store(&args, &config)?;
            let state = FormStateStore::new(SqliteKeyValueStore::new(&conn));
            for (field_id, value) in state.load_snapshot().iter() {
                println!("field {field_id}={value}");
            }
            for kind in [BlobKind::Specification, BlobKind::Signature] {
                if let Some(blob) = state.load_blob(kind) {
                    println!("blob {}: {} bytes", kind.store_key().as_str(), blob.len());
                }
            }
            for kind in [SettingKind::DeliveryTerm, SettingKind::InvoiceNumber] {
                if let Some(value) = state.load_setting(kind) {
                    println!("setting {}={value}", kind.store_key().as_str());
                }
            }
        }
        Command::Save {
            store,
            fields,
            specification,
        } => {
            let conn = open_store(&store, &config)?;
            let state = FormStateStore::new(SqliteKeyValueStore::new(&conn));
            let mut form = InMemoryForm::new();
            for (field_id, value) in fields {
                form = form.with_text(field_id, value);
            }
            let mut session = store.session();
            session.loaded_specification = specification;
            state.save_all(&form, &session);
            info!("event=cli_save module=cli status=ok");
        }
        Command::Restore(args) => {
            let conn = open_store(&args, &config)?;
            let state = FormStateStore::new(SqliteKeyValueStore::new(&conn));
            let mut form = restore_target(&state);
            let mut preview = RecordingPreview::new();
            let mut session = args.session();
            let source = FileSignatureSource::new(config.asset_dir.clone());

            let report = state
                .restore_all(
                    &mut form,
                    &mut preview,
                    &mut session,
                    &source,
                    &config.signature_path,
                )
                .await;

            for field_id in form.field_ids() {
                let value = form.value(&field_id).unwrap_or_default();
                println!("field {field_id}={value}");
            }
            println!(
                "restored fields={} specification={} signature={}",
                report.applied_fields, report.specification_restored, report.signature_refreshed
            );
        }
        Command::Clear(args) => {
            let conn = open_store(&args, &config)?;
            FormStateStore::new(SqliteKeyValueStore::new(&conn)).clear_all();
        }
    }

    Ok(())
}

fn open_store(args: &StoreArgs, config: &DocformConfig) -> Result<Connection, String> {
    let path = args
        .store
        .clone()
        .or_else(|| config.store_path.clone())
        .ok_or_else(|| "no store path; pass --store or set store_path in config".to_string())?;
    open_db(&path).map_err(|err| format!("failed to open store `{}`: {err}", path.display()))
}

/// Builds a form with every field the store knows about, so a restore has
/// somewhere to write.
fn restore_target(state: &FormStateStore<SqliteKeyValueStore<'_>>) -> InMemoryForm {
    let mut form = InMemoryForm::new();
    for (field_id, _) in state.load_snapshot().iter() {
        form = form.with_text(field_id, "");
    }
    for kind in [SettingKind::DeliveryTerm, SettingKind::InvoiceNumber] {
        if form.field_kind(kind.field_id()).is_none() {
            form = form.with_text(kind.field_id(), "");
        }
    }
    form
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (field_id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `id=value`, got `{raw}`"))?;
    let field_id = field_id.trim();
    if field_id.is_empty() {
        return Err(format!("field id must not be empty in `{raw}`"));
    }
    Ok((field_id.to_string(), value.to_string()))
}
