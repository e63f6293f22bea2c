//! Fixed store keys, blob/setting kinds and well-known field ids.

/// Field holding the agreement date (`YYYY-MM-DD`).
pub const FIELD_AGREEMENT_DATE: &str = "agreementDate";
/// Field holding the contract number, or the invoice number on invoice pages.
pub const FIELD_AGREEMENT_NUMBER: &str = "agreementNumber";
/// Field holding the invoice delivery term.
pub const FIELD_TERM_OF_DELIVERY: &str = "termOfDelivery";

/// Preview region showing the loaded specification notice.
pub const PREVIEW_SPECIFICATION: &str = "specificationPreview";
/// Preview region showing the signature image.
pub const PREVIEW_SIGNATURE: &str = "signaturePreview";

/// Every key this crate reads or writes in the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreKey {
    FormData,
    Specification,
    Signature,
    DeliveryTerm,
    InvoiceNumber,
}

impl StoreKey {
    /// Stable key string used in the store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FormData => "contractData",
            Self::Specification => "loadedSpecification",
            Self::Signature => "loadedSignature",
            Self::DeliveryTerm => "termOfDelivery",
            Self::InvoiceNumber => "invoiceNumber",
        }
    }

    /// Keys removed by `FormStateStore::clear_all`.
    ///
    /// Settings keys are deliberately absent.
    pub fn cleared_on_reset() -> &'static [StoreKey] {
        &[Self::FormData, Self::Specification, Self::Signature]
    }
}

/// Large opaque payloads persisted next to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKind {
    /// Serialized HTML fragment of the embedded specification table.
    Specification,
    /// Signature image as a data URI.
    Signature,
}

impl BlobKind {
    pub fn store_key(self) -> StoreKey {
        match self {
            Self::Specification => StoreKey::Specification,
            Self::Signature => StoreKey::Signature,
        }
    }
}

/// Scalar settings persisted outside the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    DeliveryTerm,
    InvoiceNumber,
}

impl SettingKind {
    pub fn store_key(self) -> StoreKey {
        match self {
            Self::DeliveryTerm => StoreKey::DeliveryTerm,
            Self::InvoiceNumber => StoreKey::InvoiceNumber,
        }
    }

    /// Form field the setting is captured from and restored into.
    pub fn field_id(self) -> &'static str {
        match self {
            Self::DeliveryTerm => FIELD_TERM_OF_DELIVERY,
            Self::InvoiceNumber => FIELD_AGREEMENT_NUMBER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlobKind, SettingKind, StoreKey};

    #[test]
    fn key_strings_are_stable() {
        assert_eq!(StoreKey::FormData.as_str(), "contractData");
        assert_eq!(StoreKey::Specification.as_str(), "loadedSpecification");
        assert_eq!(StoreKey::Signature.as_str(), "loadedSignature");
        assert_eq!(StoreKey::DeliveryTerm.as_str(), "termOfDelivery");
        assert_eq!(StoreKey::InvoiceNumber.as_str(), "invoiceNumber");
    }

    #[test]
    fn reset_keys_exclude_settings() {
        let cleared = StoreKey::cleared_on_reset();
        assert!(!cleared.contains(&SettingKind::DeliveryTerm.store_key()));
        assert!(!cleared.contains(&SettingKind::InvoiceNumber.store_key()));
        assert!(cleared.contains(&BlobKind::Signature.store_key()));
    }
}
