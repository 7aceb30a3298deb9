//! Kelner Classification Client Library
//!
//! A minimal Rust client for a kelner classification server. It reads a
//! local file, posts the raw bytes to an HTTP endpoint, and formats the
//! returned score vector as labeled, sorted output in JSON or YAML.
//!
//! # Features
//!
//! - **File Loading**: size and MIME type from the path, text payloads
//!   decoded, binary payloads passed through untouched
//! - **Labeled Results**: score vectors paired with caller-supplied labels
//!   (or `"#<index>"` placeholders), sorted descending
//! - **Output Formats**: indented JSON or flat YAML rendering
//! - **Type Safety**: typed errors for file, transport, and response
//!   failures
//! - **Async/Await**: built on Tokio and reqwest
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kelner_client::KelnerClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KelnerClient::new()?;
//!
//!     let labels = vec!["cat".to_string(), "dog".to_string()];
//!     let top = client.classify("photo.jpg", &labels, 1).await?;
//!
//!     if let Some(best) = top.first() {
//!         println!("{}: {}", best.label, best.score);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Formatting Example
//!
//! ```rust
//! use kelner_client::{format_response, OutputFormat};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let response = json!([[0.1, 0.9]]);
//! let labels = vec!["cat".to_string(), "dog".to_string()];
//!
//! let yaml = format_response(&response, OutputFormat::Yaml, Some(&labels))?;
//! assert!(yaml.starts_with("dog: 0.900000"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod errors;
pub mod format;
pub mod loader;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{KelnerClient, KelnerClientBuilder};
pub use config::{KelnerConfig, DEFAULT_ENDPOINT};
pub use errors::{KelnerError, KelnerResult};
pub use format::{first_score_vector, format_response, OutputFormat};
pub use loader::{ExtensionMimeGuesser, FileContent, FileLoader, MimeGuesser};
pub use services::ClassificationService;
pub use types::{attach_labels, top_k, LabeledScore, ScoreVector};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
