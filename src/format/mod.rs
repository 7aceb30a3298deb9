//! Output formatting for classification responses.
//!
//! Renders a raw service response either as-is (structural JSON or YAML
//! dump) or as a labeled, descending-sorted list of (label, score) pairs.

use serde_json::Value;

use crate::errors::{KelnerError, KelnerResult};
use crate::types::{attach_labels, LabeledScore, ScoreVector};

#[cfg(windows)]
const LINE_SEP: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEP: &str = "\n";

/// Output representation for formatted results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented JSON (the default).
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Maps a format name to a variant.
    ///
    /// `"yaml"` selects YAML; anything else, including `"json"`, falls back
    /// to JSON.
    pub fn from_name(name: &str) -> Self {
        match name {
            "yaml" => OutputFormat::Yaml,
            _ => OutputFormat::Json,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Extracts the first score vector from a raw service response.
///
/// The response is expected to be a JSON array whose first element is an
/// array of numbers.
pub fn first_score_vector(response: &Value) -> KelnerResult<ScoreVector> {
    let first = response
        .as_array()
        .and_then(|outer| outer.first())
        .ok_or_else(|| KelnerError::response("Expected a non-empty JSON array"))?;

    let values = first
        .as_array()
        .ok_or_else(|| KelnerError::response("Expected the first element to be an array"))?;

    values
        .iter()
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| KelnerError::response(format!("Expected a numeric score, got {}", v)))
        })
        .collect()
}

/// Formats a raw service response.
///
/// With `labels`, the first score vector of the response is labeled and
/// sorted descending, then rendered:
///
/// - JSON: a pretty-printed array of `[label, score]` tuples, order kept.
/// - YAML: one `label: score` line per entry with six-decimal fixed
///   notation, joined by the platform line separator. This is a flat
///   scalar mapping, not a structural YAML list; duplicate labels produce
///   duplicate keys.
///
/// Without `labels`, the raw response is dumped structurally, as a YAML
/// document or indented JSON. No shape validation happens on that path
/// beyond what serialization requires.
pub fn format_response(
    response: &Value,
    format: OutputFormat,
    labels: Option<&[String]>,
) -> KelnerResult<String> {
    match labels {
        Some(labels) => {
            let scores = first_score_vector(response)?;
            let labeled = attach_labels(&scores, labels);
            match format {
                OutputFormat::Yaml => Ok(yaml_lines(&labeled)),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&labeled)?),
            }
        }
        None => match format {
            OutputFormat::Yaml => Ok(serde_yaml::to_string(response)?),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        },
    }
}

/// Renders labeled scores as flat `label: score` lines.
fn yaml_lines(labeled: &[LabeledScore]) -> String {
    labeled
        .iter()
        .map(|entry| format!("{}: {:.6}", entry.label, entry.score))
        .collect::<Vec<_>>()
        .join(LINE_SEP)
}
