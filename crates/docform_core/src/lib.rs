//! Core logic for contract and invoice form pages.
//!
//! Spells out amounts in English words, derives document numbers and display
//! dates, and saves/restores form state through a local key-value store.

pub mod config;
pub mod db;
pub mod form;
pub mod format;
pub mod logging;
pub mod model;
pub mod service;
pub mod signature;
pub mod store;

pub use config::{ConfigError, DocformConfig};
pub use form::{FieldKind, FormFields, InMemoryForm, PreviewSurface, RecordingPreview};
pub use format::date::{
    document_number_for, format_long_date, generate_document_number, iso_date_at,
    long_date_for, today_iso_date,
};
pub use format::number::format_number;
pub use format::words::{chunk_to_words, number_to_words, WORDS_UPPER_BOUND};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::keys::{BlobKind, SettingKind, StoreKey};
pub use model::session::{DocumentKind, SessionState};
pub use model::snapshot::FormSnapshot;
pub use service::form_state::{FormStateStore, RestoreReport};
pub use signature::{
    fetch_signature_data_uri, signature_request_path, to_data_uri, FileSignatureSource,
    SignatureError, SignatureImage, SignatureSource, DEFAULT_SIGNATURE_PATH,
};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
