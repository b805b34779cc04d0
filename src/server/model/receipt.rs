use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Printer font multiplier.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub(crate) enum FontSize {
    #[default]
    #[display("1")]
    Normal,
    #[display("2")]
    Double,
    #[display("3")]
    Triple,
}

impl FontSize {
    pub fn multiplier(self) -> u8 {
        match self {
            FontSize::Normal => 1,
            FontSize::Double => 2,
            FontSize::Triple => 3,
        }
    }
}

impl TryFrom<u8> for FontSize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Normal),
            2 => Ok(Self::Double),
            3 => Ok(Self::Triple),
            v => Err(format!("Invalid font size: {v}")),
        }
    }
}

impl From<FontSize> for u8 {
    fn from(size: FontSize) -> Self {
        size.multiplier()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrintLine {
    pub id: String,
    pub text: String,
    pub font_size: FontSize,
}

/// Persisted shape; ids and sizes may be missing in older templates.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredPrintLine {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub font_size: Option<FontSize>,
}

/// Receipt template as stored by the backend: the line array as an opaque string.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReceiptTemplate {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReceiptResponse {
    pub lines: Vec<PrintLine>,
    /// free units per line
    pub remaining: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PutReceiptRequest {
    pub lines: Vec<StoredPrintLine>,
}

/// One editor action applied to a document.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum Edit {
    SetText { index: usize, text: String },
    SetFontSize { index: usize, font_size: FontSize },
    InsertAfter { index: usize },
    MergeUp { index: usize },
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostEditRequest {
    pub lines: Vec<StoredPrintLine>,
    pub edit: Edit,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeasureRequest {
    pub text: String,
    #[serde(default)]
    pub font_size: FontSize,
}

#[derive(Debug, Serialize)]
pub(crate) struct MeasureResponse {
    pub width: usize,
    pub capacity: usize,
    pub clamped: String,
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_is_a_number_on_the_wire() {
        assert_eq!(serde_json::to_string(&FontSize::Double).unwrap(), "2");
        assert_eq!(serde_json::from_str::<FontSize>("3").unwrap(), FontSize::Triple);
        assert!(serde_json::from_str::<FontSize>("4").is_err());
    }

    #[test]
    fn print_line_uses_camel_case() {
        let line = PrintLine { id: "a".to_string(), text: "hi".to_string(), font_size: FontSize::Normal };
        assert_eq!(serde_json::to_string(&line).unwrap(), r#"{"id":"a","text":"hi","fontSize":1}"#);
    }

    #[test]
    fn edits_are_tagged() {
        let edit: Edit = serde_json::from_str(r#"{"type":"set_font_size","index":0,"font_size":2}"#).unwrap();
        assert!(matches!(edit, Edit::SetFontSize { index: 0, font_size: FontSize::Double }));
    }
}
