//! Form state persistence facade.
//!
//! # Responsibility
//! - Capture form fields into a `FormSnapshot` and restore them back.
//! - Persist the specification/signature blobs and the two scalar settings
//!   under their fixed store keys.
//! - Run the composite page-load restore and page save flows.
//!
//! # Invariants
//! - Reads never fail observably: missing keys are absent, malformed data is
//!   logged and degraded to an empty default.
//! - Writes are fire-and-forget: store failures are logged, not returned.
//! - File-typed fields are never captured or written back.
//! - `clear_all` keeps the delivery-term and invoice-number settings.
//! - `restore_all` runs snapshot, specification, signature, settings in that
//!   order and always re-fetches the signature instead of trusting the store.

use crate::form::{FieldKind, FormFields, PreviewSurface};
use crate::format::date::generate_document_number;
use crate::model::keys::{
    BlobKind, SettingKind, StoreKey, FIELD_AGREEMENT_DATE, FIELD_AGREEMENT_NUMBER,
    PREVIEW_SIGNATURE, PREVIEW_SPECIFICATION,
};
use crate::model::session::SessionState;
use crate::model::snapshot::FormSnapshot;
use crate::signature::{fetch_signature_data_uri, SignatureSource};
use crate::store::KeyValueStore;
use log::{debug, error, info, warn};

const SPECIFICATION_RESTORED_MARKUP: &str = "<p>Specification restored from saved data</p>";
const SIGNATURE_FALLBACK_MARKUP: &str = "<p style=\"color: #ff6b6b;\">Could not load the default signature. Please upload a signature manually.</p>";

/// Outcome of one `restore_all` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Number of snapshot entries written into form fields.
    pub applied_fields: usize,
    pub specification_restored: bool,
    pub signature_refreshed: bool,
    pub delivery_term_restored: bool,
    pub invoice_number_restored: bool,
}

/// Persistence facade binding form fields to a key-value store.
pub struct FormStateStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FormStateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads every non-file field of `form` into a snapshot.
    pub fn capture_snapshot(&self, form: &dyn FormFields) -> FormSnapshot {
        let snapshot: FormSnapshot = form
            .field_ids()
            .into_iter()
            .filter(|field_id| form.field_kind(field_id) == Some(FieldKind::Text))
            .filter_map(|field_id| {
                let value = form.value(&field_id)?;
                Some((field_id, value))
            })
            .collect();
        debug!(
            "event=snapshot_capture module=form_state status=ok fields={}",
            snapshot.len()
        );
        snapshot
    }

    /// Writes `snapshot` under the form-data key, replacing any prior value.
    pub fn persist_snapshot(&self, snapshot: &FormSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(serialized) => {
                if self.write(StoreKey::FormData, &serialized) {
                    info!(
                        "event=snapshot_save module=form_state status=ok fields={}",
                        snapshot.len()
                    );
                }
            }
            Err(err) => error!(
                "event=snapshot_save module=form_state status=error error_code=serialize_failed error={err}"
            ),
        }
    }

    /// Reads the stored snapshot.
    ///
    /// Returns an empty snapshot when nothing is stored or the stored value
    /// cannot be deserialized.
    pub fn load_snapshot(&self) -> FormSnapshot {
        let Some(serialized) = self.read(StoreKey::FormData) else {
            return FormSnapshot::new();
        };

        match serde_json::from_str::<FormSnapshot>(&serialized) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(
                    "event=snapshot_load module=form_state status=error error_code=malformed_snapshot stored_len={} error={err}",
                    serialized.len()
                );
                FormSnapshot::new()
            }
        }
    }

    /// Pushes snapshot values into matching form fields.
    ///
    /// Unknown ids and file-typed fields are skipped. Returns the number of
    /// fields written.
    pub fn apply_snapshot(&self, form: &mut dyn FormFields, snapshot: &FormSnapshot) -> usize {
        let mut applied = 0;
        for (field_id, value) in snapshot.iter() {
            match form.field_kind(field_id) {
                Some(FieldKind::Text) => {
                    form.set_value(field_id, value);
                    applied += 1;
                }
                Some(FieldKind::File) | None => {}
            }
        }
        debug!(
            "event=snapshot_apply module=form_state status=ok applied={} skipped={}",
            applied,
            snapshot.len() - applied
        );
        applied
    }

    /// Removes the snapshot and both blobs. Settings are left in place.
    pub fn clear_all(&self) {
        for key in StoreKey::cleared_on_reset() {
            if let Err(err) = self.store.remove(key.as_str()) {
                error!(
                    "event=store_remove module=form_state status=error key={} error={err}",
                    key.as_str()
                );
            }
        }
        info!("event=form_clear module=form_state status=ok");
    }

    pub fn persist_blob(&self, kind: BlobKind, value: &str) {
        self.write(kind.store_key(), value);
    }

    pub fn load_blob(&self, kind: BlobKind) -> Option<String> {
        self.read(kind.store_key())
    }

    pub fn persist_setting(&self, kind: SettingKind, value: &str) {
        self.write(kind.store_key(), value);
    }

    pub fn load_setting(&self, kind: SettingKind) -> Option<String> {
        self.read(kind.store_key())
    }

    /// Restores everything saved for the page.
    ///
    /// Steps run in order: snapshot, specification, signature refresh,
    /// settings. A failed signature fetch shows a warning in the signature
    /// preview and the remaining steps still run.
    pub async fn restore_all(
        &self,
        form: &mut dyn FormFields,
        preview: &mut dyn PreviewSurface,
        session: &mut SessionState,
        signature_source: &dyn SignatureSource,
        signature_path: &str,
    ) -> RestoreReport {
        let mut report = RestoreReport::default();

        let snapshot = self.load_snapshot();
        report.applied_fields = self.apply_snapshot(form, &snapshot);

        if let Some(specification) = self
            .load_blob(BlobKind::Specification)
            .filter(|value| !value.is_empty())
        {
            session.loaded_specification = Some(specification);
            preview.show(PREVIEW_SPECIFICATION, SPECIFICATION_RESTORED_MARKUP);
            report.specification_restored = true;
        }

        report.signature_refreshed = self
            .refresh_signature(preview, session, signature_source, signature_path)
            .await
            .is_some();

        report.delivery_term_restored = restore_setting(
            self.load_setting(SettingKind::DeliveryTerm),
            SettingKind::DeliveryTerm,
            form,
        );
        if session.is_invoice() {
            report.invoice_number_restored = restore_setting(
                self.load_setting(SettingKind::InvoiceNumber),
                SettingKind::InvoiceNumber,
                form,
            );
        }

        info!(
            "event=restore_all module=form_state status=ok applied_fields={} specification={} signature={}",
            report.applied_fields, report.specification_restored, report.signature_refreshed
        );
        report
    }

    /// Saves everything the page holds.
    ///
    /// Blobs are written only when the session holds them; nothing is
    /// cleared first.
    pub fn save_all(&self, form: &dyn FormFields, session: &SessionState) {
        let snapshot = self.capture_snapshot(form);
        self.persist_snapshot(&snapshot);

        if let Some(specification) = session.loaded_specification.as_deref() {
            self.persist_blob(BlobKind::Specification, specification);
        }
        if let Some(signature) = session.loaded_signature.as_deref() {
            self.persist_blob(BlobKind::Signature, signature);
        }

        if let Some(term) = form.value(SettingKind::DeliveryTerm.field_id()) {
            self.persist_setting(SettingKind::DeliveryTerm, &term);
        }
        if session.is_invoice() {
            if let Some(number) = form.value(SettingKind::InvoiceNumber.field_id()) {
                self.persist_setting(SettingKind::InvoiceNumber, &number);
            }
        }

        info!("event=save_all module=form_state status=ok");
    }

    /// Drops any cached signature and fetches the default one again.
    ///
    /// On success the data URI is stored, kept in `session` and shown in the
    /// signature preview. On failure the preview shows a warning and `None`
    /// is returned.
    pub async fn refresh_signature(
        &self,
        preview: &mut dyn PreviewSurface,
        session: &mut SessionState,
        source: &dyn SignatureSource,
        signature_path: &str,
    ) -> Option<String> {
        self.clear_signature_cache(session);

        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        match fetch_signature_data_uri(source, signature_path, timestamp_ms).await {
            Ok(data_uri) => {
                self.persist_blob(BlobKind::Signature, &data_uri);
                preview.show(PREVIEW_SIGNATURE, &signature_markup(&data_uri));
                info!(
                    "event=signature_refresh module=form_state status=ok data_len={}",
                    data_uri.len()
                );
                session.loaded_signature = Some(data_uri.clone());
                Some(data_uri)
            }
            Err(err) => {
                warn!(
                    "event=signature_refresh module=form_state status=error path={signature_path} error={err}"
                );
                preview.show(PREVIEW_SIGNATURE, SIGNATURE_FALLBACK_MARKUP);
                None
            }
        }
    }

    /// Forgets the stored and in-memory signature.
    pub fn clear_signature_cache(&self, session: &mut SessionState) {
        if let Err(err) = self.store.remove(StoreKey::Signature.as_str()) {
            error!(
                "event=store_remove module=form_state status=error key={} error={err}",
                StoreKey::Signature.as_str()
            );
        }
        session.loaded_signature = None;
    }

    /// Prefills the agreement date with `today` and derives its number.
    ///
    /// `today` is a `YYYY-MM-DD` string; missing fields are skipped.
    pub fn initialize_form(&self, form: &mut dyn FormFields, today: &str) {
        if form.field_kind(FIELD_AGREEMENT_DATE).is_some() {
            form.set_value(FIELD_AGREEMENT_DATE, today);
        }
        if form.field_kind(FIELD_AGREEMENT_NUMBER).is_some() {
            form.set_value(FIELD_AGREEMENT_NUMBER, &generate_document_number(today));
        }
    }

    fn read(&self, key: StoreKey) -> Option<String> {
        match self.store.get(key.as_str()) {
            Ok(value) => value,
            Err(err) => {
                error!(
                    "event=store_get module=form_state status=error key={} error={err}",
                    key.as_str()
                );
                None
            }
        }
    }

    fn write(&self, key: StoreKey, value: &str) -> bool {
        match self.store.set(key.as_str(), value) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=store_set module=form_state status=error key={} value_len={} error={err}",
                    key.as_str(),
                    value.len()
                );
                false
            }
        }
    }
}

fn restore_setting(saved: Option<String>, kind: SettingKind, form: &mut dyn FormFields) -> bool {
    let Some(value) = saved.filter(|value| !value.is_empty()) else {
        return false;
    };
    if form.field_kind(kind.field_id()).is_none() {
        return false;
    }
    form.set_value(kind.field_id(), &value);
    true
}

fn signature_markup(data_uri: &str) -> String {
    format!(
        "<img src=\"{data_uri}\" style=\"max-width: 200px; max-height: 100px; border: 1px solid #ddd; border-radius: 4px;\">"
    )
}
