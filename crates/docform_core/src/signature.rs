//! Default signature image fetch and inline encoding.
//!
//! # Responsibility
//! - Fetch the signature image by its fixed relative path with a
//!   cache-busting `?v=<timestamp>` query.
//! - Encode fetched bytes into a self-contained `data:` URI.
//!
//! # Invariants
//! - A fetch either yields a complete data URI or an error; no partial result
//!   is ever stored.
//! - The operation is a single future; dropping it cancels the fetch.

use async_trait::async_trait;
use base64::Engine;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Relative path of the default signature image.
pub const DEFAULT_SIGNATURE_PATH: &str = "./1.png";

/// Raw signature image as returned by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug)]
pub enum SignatureError {
    /// The resource does not exist at the requested path.
    NotFound(String),
    /// The requested path escapes the source root.
    InvalidPath(String),
    Io { path: String, source: io::Error },
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "signature image not found: {path}"),
            Self::InvalidPath(path) => write!(f, "signature path is not allowed: {path}"),
            Self::Io { path, source } => write!(f, "failed to read signature `{path}`: {source}"),
        }
    }
}

impl Error for SignatureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Where the default signature image comes from.
#[async_trait(?Send)]
pub trait SignatureSource {
    /// Fetches the image at `request_path` (which may carry a query string).
    async fn fetch(&self, request_path: &str) -> Result<SignatureImage, SignatureError>;
}

/// Reads signature images from a local asset directory.
///
/// The same-origin analogue: request paths resolve against `base_dir` and
/// the query string is ignored.
#[derive(Debug, Clone)]
pub struct FileSignatureSource {
    base_dir: PathBuf,
}

impl FileSignatureSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, request_path: &str) -> Result<PathBuf, SignatureError> {
        let path_part = strip_query(request_path);
        let relative = Path::new(path_part);
        let mut resolved = self.base_dir.clone();
        for component in relative.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(part) => resolved.push(part),
                _ => return Err(SignatureError::InvalidPath(path_part.to_string())),
            }
        }
        Ok(resolved)
    }
}

#[async_trait(?Send)]
impl SignatureSource for FileSignatureSource {
    async fn fetch(&self, request_path: &str) -> Result<SignatureImage, SignatureError> {
        let path = self.resolve(request_path)?;
        let bytes = tokio::fs::read(&path).await.map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                SignatureError::NotFound(strip_query(request_path).to_string())
            } else {
                SignatureError::Io {
                    path: path.display().to_string(),
                    source: err,
                }
            }
        })?;

        Ok(SignatureImage {
            bytes,
            mime_type: mime_type_for(&path).to_string(),
        })
    }
}

/// Appends the cache-busting query to `path`.
pub fn signature_request_path(path: &str, timestamp_ms: i64) -> String {
    format!("{path}?v={timestamp_ms}")
}

/// Encodes `image` as `data:<mime>;base64,<payload>`.
pub fn to_data_uri(image: &SignatureImage) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
    format!("data:{};base64,{payload}", image.mime_type)
}

/// Fetches the signature at `path` and returns it as a data URI.
pub async fn fetch_signature_data_uri(
    source: &dyn SignatureSource,
    path: &str,
    timestamp_ms: i64,
) -> Result<String, SignatureError> {
    let request_path = signature_request_path(path, timestamp_ms);
    let image = source.fetch(&request_path).await?;
    Ok(to_data_uri(&image))
}

fn strip_query(request_path: &str) -> &str {
    request_path.split('?').next().unwrap_or(request_path)
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
