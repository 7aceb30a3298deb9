//! File loading for classification payloads.
//!
//! Reads a file's raw bytes, determines its size and a best-guess content
//! type from the path extension, and decodes text-like content to a string.
//! Binary payloads (images, audio) pass through untouched for the remote
//! service to interpret.

use bytes::Bytes;
use mime::Mime;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

use crate::errors::{KelnerError, KelnerResult};

/// Content type sent when the MIME type cannot be guessed.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// MIME type guessing capability.
///
/// Isolated behind a trait so the extension-based lookup can be swapped or
/// mocked in tests.
pub trait MimeGuesser: Send + Sync {
    /// Guesses the MIME type for a path, or `None` if it cannot be
    /// determined.
    fn guess(&self, path: &Path) -> Option<Mime>;
}

/// Default guesser backed by the extension lookup table in `mime_guess`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionMimeGuesser;

impl MimeGuesser for ExtensionMimeGuesser {
    fn guess(&self, path: &Path) -> Option<Mime> {
        mime_guess::from_path(path).first()
    }
}

/// A loaded file payload, computed once at load time and immutable after.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// The raw file bytes. Always what gets posted to the service.
    pub data: Bytes,
    /// Decoded text, present only for `text/plain` and `application/json`
    /// payloads.
    pub text: Option<String>,
    /// The guessed MIME type, if one could be determined.
    pub mime: Option<Mime>,
    /// Byte size reported by filesystem metadata.
    pub size: u64,
}

impl FileContent {
    /// Returns the content type to send with the request: the guessed MIME
    /// essence, or `application/octet-stream` when the guess failed.
    pub fn content_type(&self) -> String {
        self.mime
            .as_ref()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
    }

    /// Returns true if the payload was decoded as text.
    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }
}

/// Loads files and prepares them for classification.
#[derive(Clone)]
pub struct FileLoader {
    guesser: Arc<dyn MimeGuesser>,
}

impl FileLoader {
    /// Creates a loader with the default extension-based MIME guesser.
    pub fn new() -> Self {
        Self {
            guesser: Arc::new(ExtensionMimeGuesser),
        }
    }

    /// Creates a loader with a custom MIME guesser.
    pub fn with_guesser(guesser: Arc<dyn MimeGuesser>) -> Self {
        Self { guesser }
    }

    /// Loads a file, guessing its content type and decoding text-like
    /// payloads.
    ///
    /// Fails with [`KelnerError::File`] if the file is missing or
    /// unreadable, and with [`KelnerError::Decode`] if a text-like payload
    /// does not match its declared encoding.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub async fn load(&self, path: impl AsRef<Path>) -> KelnerResult<FileContent> {
        let path = path.as_ref();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| KelnerError::file(path, e.to_string()))?;
        let size = metadata.len();

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| KelnerError::file(path, e.to_string()))?;
        let data = Bytes::from(data);

        let mime = self.guesser.guess(path);
        let text = match &mime {
            Some(m) if is_text_like(m) => Some(decode_text(&data, m, path)?),
            _ => None,
        };

        tracing::debug!(
            size,
            mime = mime.as_ref().map(|m| m.essence_str()).unwrap_or("unknown"),
            decoded = text.is_some(),
            "Loaded file"
        );

        Ok(FileContent {
            data,
            text,
            mime,
            size,
        })
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FileLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLoader").finish()
    }
}

/// Returns true for the MIME types whose payloads are decoded to text.
fn is_text_like(mime: &Mime) -> bool {
    (mime.type_() == mime::TEXT && mime.subtype() == mime::PLAIN)
        || (mime.type_() == mime::APPLICATION && mime.subtype() == mime::JSON)
}

/// Decodes text-like payload bytes, honoring a charset parameter when one
/// is present and defaulting to UTF-8 otherwise.
fn decode_text(data: &Bytes, mime: &Mime, path: &Path) -> KelnerResult<String> {
    let charset = mime
        .get_param(mime::CHARSET)
        .map(|c| c.as_str().to_ascii_lowercase())
        .unwrap_or_else(|| "utf-8".to_string());

    if charset != "utf-8" && charset != "utf8" {
        return Err(KelnerError::decode(
            charset,
            format!("Unsupported charset for {}", path.display()),
        ));
    }

    String::from_utf8(data.to_vec())
        .map_err(|e| KelnerError::decode("utf-8", e.to_string()))
}
