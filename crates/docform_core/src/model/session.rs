//! Per-page session state.
//!
//! Holds what the page has currently loaded in memory. The persistence
//! facade reads and updates it explicitly; nothing here touches the store.

/// Which document the current page renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentKind {
    #[default]
    Contract,
    Invoice,
}

/// In-memory state of one open form page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub document_kind: DocumentKind,
    /// Specification fragment currently active on the page.
    pub loaded_specification: Option<String>,
    /// Signature data URI currently shown on the page.
    pub loaded_signature: Option<String>,
}

impl SessionState {
    pub fn new(document_kind: DocumentKind) -> Self {
        Self {
            document_kind,
            ..Self::default()
        }
    }

    pub fn is_invoice(&self) -> bool {
        self.document_kind == DocumentKind::Invoice
    }
}
