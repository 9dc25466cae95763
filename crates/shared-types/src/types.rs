use serde::{Deserialize, Deserializer};

/// One extracted (field, value) pair attributed to a document
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyHighlight {
    pub field: String,
    pub value: String,
}

impl KeyHighlight {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `field: value`, the line format used for copy and edit
    pub fn as_line(&self) -> String {
        format!("{}: {}", self.field, self.value)
    }
}

/// A logical document the classification service found inside the bundle
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub doc_type: String,
    #[serde(default)]
    pub title: String,
    pub page_start: u32, // 1-based, inclusive
    pub page_end: u32,   // 1-based, inclusive
    #[serde(default, deserialize_with = "confidence_or_zero")]
    pub confidence: f64, // 0.0 - 1.0
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_highlights: Vec<KeyHighlight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

fn confidence_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Body of a successful `/process_document` call
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessingResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub total_documents: usize,
    pub documents: Vec<Document>,
}

/// Body of a failed `/process_document` call
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
