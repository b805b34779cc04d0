use derive_more::{Display, Error};
use log::debug;
use uuid::Uuid;
use crate::server::domain::text_width::{capacity, clamp_by_visual_width, visual_width};
use crate::server::model::receipt::{Edit, FontSize, PrintLine, StoredPrintLine};

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub(crate) enum EditError {
    #[display("line {index} is out of range, document has {len} lines")]
    LineOutOfRange { index: usize, len: usize },
}

fn new_line_id() -> String {
    Uuid::new_v4().to_string()
}

/// Receipt lines being edited. Every line fits its capacity and there is always at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrintDocument {
    lines: Vec<PrintLine>,
}

impl Default for PrintDocument {
    fn default() -> Self {
        Self {
            lines: vec![PrintLine {
                id: new_line_id(),
                text: String::new(),
                font_size: FontSize::Normal,
            }],
        }
    }
}

impl PrintDocument {
    /// Build from stored lines, filling missing ids and sizes and re-clamping text.
    pub fn from_stored(stored: Vec<StoredPrintLine>) -> Self {
        if stored.is_empty() {
            return Self::default();
        }
        let lines = stored
            .into_iter()
            .map(|s| {
                let font_size = s.font_size.unwrap_or_default();
                PrintLine {
                    id: s.id.filter(|id| !id.is_empty()).unwrap_or_else(new_line_id),
                    text: clamp_by_visual_width(&s.text, capacity(font_size)).to_string(),
                    font_size,
                }
            })
            .collect();
        Self { lines }
    }

    /// Parse the persisted template string. Blank content yields a single empty line.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let stored: Vec<StoredPrintLine> = serde_json::from_str(content)?;
        Ok(Self::from_stored(stored))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.lines)
    }

    pub fn lines(&self) -> &[PrintLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<PrintLine> {
        self.lines
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut PrintLine, EditError> {
        let len = self.lines.len();
        self.lines.get_mut(index).ok_or(EditError::LineOutOfRange { index, len })
    }

    /// Replace a line's text, keeping only what fits.
    pub fn set_text(&mut self, index: usize, text: &str) -> Result<(), EditError> {
        let line = self.line_mut(index)?;
        line.text = clamp_by_visual_width(text, capacity(line.font_size)).to_string();
        Ok(())
    }

    /// Change a line's font size, truncating text that no longer fits.
    pub fn set_font_size(&mut self, index: usize, font_size: FontSize) -> Result<(), EditError> {
        let line = self.line_mut(index)?;
        line.font_size = font_size;
        let kept = clamp_by_visual_width(&line.text, capacity(font_size)).len();
        if kept < line.text.len() {
            debug!("line {} truncated to {} bytes after font size change", line.id, kept);
        }
        line.text.truncate(kept);
        Ok(())
    }

    /// Insert an empty size 1 line after `index`, returning the new line's index.
    pub fn insert_after(&mut self, index: usize) -> Result<usize, EditError> {
        self.line_mut(index)?;
        self.lines.insert(index + 1, PrintLine {
            id: new_line_id(),
            text: String::new(),
            font_size: FontSize::Normal,
        });
        Ok(index + 1)
    }

    /// Append line `index` onto the previous one and remove it.
    ///
    /// The previous line's font size governs the merged capacity; overflow is dropped.
    /// Merging the first line is a no-op and returns `false`.
    pub fn merge_up(&mut self, index: usize) -> Result<bool, EditError> {
        self.line_mut(index)?;
        if index == 0 {
            return Ok(false);
        }
        let current = self.lines.remove(index);
        let previous = &mut self.lines[index - 1];
        previous.text.push_str(&current.text);
        let kept = clamp_by_visual_width(&previous.text, capacity(previous.font_size)).len();
        previous.text.truncate(kept);
        Ok(true)
    }

    /// Units still free on line `index`.
    pub fn remaining(&self, index: usize) -> Result<usize, EditError> {
        let line = self.lines.get(index).ok_or(EditError::LineOutOfRange { index, len: self.lines.len() })?;
        Ok(capacity(line.font_size).saturating_sub(visual_width(&line.text)))
    }

    /// Units still free on every line, in order.
    pub fn remaining_units(&self) -> Vec<usize> {
        (0..self.lines.len()).filter_map(|i| self.remaining(i).ok()).collect()
    }

    pub fn apply(&mut self, edit: Edit) -> Result<(), EditError> {
        match edit {
            Edit::SetText { index, text } => self.set_text(index, &text),
            Edit::SetFontSize { index, font_size } => self.set_font_size(index, font_size),
            Edit::InsertAfter { index } => self.insert_after(index).map(|_| ()),
            Edit::MergeUp { index } => self.merge_up(index).map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[(&str, FontSize)]) -> PrintDocument {
        PrintDocument::from_stored(
            lines
                .iter()
                .map(|(text, size)| StoredPrintLine {
                    id: None,
                    text: text.to_string(),
                    font_size: Some(*size),
                })
                .collect(),
        )
    }

    fn assert_fits(doc: &PrintDocument) {
        for line in doc.lines() {
            assert!(visual_width(&line.text) <= capacity(line.font_size), "{line:?}");
        }
    }

    #[test]
    fn starts_with_one_empty_line() {
        let doc = PrintDocument::default();
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.lines()[0].text, "");
        assert_eq!(doc.lines()[0].font_size, FontSize::Normal);
    }

    #[test]
    fn shrinking_font_truncates() {
        let long = "a".repeat(46);
        let mut doc = doc(&[(long.as_str(), FontSize::Normal)]);
        doc.set_font_size(0, FontSize::Double).unwrap();
        assert_eq!(doc.lines()[0].text, "a".repeat(23));
        assert_eq!(doc.lines()[0].font_size, FontSize::Double);
        doc.set_font_size(0, FontSize::Normal).unwrap();
        assert_eq!(doc.lines()[0].text, "a".repeat(23));
    }

    #[test]
    fn merge_up_combines_and_clamps() {
        let xs = "x".repeat(44);
        let mut doc = doc(&[(xs.as_str(), FontSize::Normal), ("abc", FontSize::Normal)]);
        assert!(doc.merge_up(1).unwrap());
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.lines()[0].text, "x".repeat(44) + "ab");
    }

    #[test]
    fn merge_up_uses_previous_line_capacity() {
        let mut doc = doc(&[("あいう", FontSize::Triple), ("えおかきくけ", FontSize::Normal)]);
        doc.merge_up(1).unwrap();
        // capacity 15 at size 3, seven wide characters fit
        assert_eq!(doc.lines()[0].text, "あいうえおかき");
        assert_fits(&doc);
    }

    #[test]
    fn merge_up_on_first_line_is_noop() {
        let mut doc = doc(&[("a", FontSize::Normal), ("b", FontSize::Normal)]);
        assert!(!doc.merge_up(0).unwrap());
        assert_eq!(doc.lines().len(), 2);
    }

    #[test]
    fn insert_after_is_always_size_one_and_empty() {
        let mut doc = doc(&[("big", FontSize::Triple), ("tail", FontSize::Normal)]);
        let idx = doc.insert_after(0).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(doc.lines()[1].text, "");
        assert_eq!(doc.lines()[1].font_size, FontSize::Normal);
        assert_eq!(doc.lines()[2].text, "tail");
        assert_ne!(doc.lines()[0].id, doc.lines()[1].id);
    }

    #[test]
    fn typing_is_clamped() {
        let mut doc = PrintDocument::default();
        doc.set_font_size(0, FontSize::Double).unwrap();
        doc.set_text(0, &"漢".repeat(20)).unwrap();
        assert_eq!(doc.lines()[0].text, "漢".repeat(11));
        assert_eq!(doc.remaining(0).unwrap(), 1);
        doc.insert_after(0).unwrap();
        assert_eq!(doc.remaining_units(), vec![1, 46]);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut doc = PrintDocument::default();
        assert_eq!(doc.set_text(3, "a"), Err(EditError::LineOutOfRange { index: 3, len: 1 }));
        assert!(doc.merge_up(1).is_err());
        assert!(doc.insert_after(1).is_err());
        assert!(doc.remaining(1).is_err());
    }

    #[test]
    fn loads_with_defaults_and_keeps_ids() {
        let doc = PrintDocument::from_json(
            r#"[{"id":"keep","text":"hello","fontSize":2},{"text":"no id"},{"id":"","text":"blank id","fontSize":3}]"#,
        )
        .unwrap();
        let lines = doc.lines();
        assert_eq!(lines[0].id, "keep");
        assert_eq!(lines[0].font_size, FontSize::Double);
        assert_eq!(lines[1].font_size, FontSize::Normal);
        assert!(!lines[1].id.is_empty());
        assert_ne!(lines[2].id, "");
        assert_eq!(lines[2].font_size, FontSize::Triple);
    }

    #[test]
    fn load_reclamps_oversized_text() {
        let content = format!(r#"[{{"text":"{}","fontSize":3}}]"#, "z".repeat(40));
        let doc = PrintDocument::from_json(&content).unwrap();
        assert_eq!(doc.lines()[0].text, "z".repeat(15));
    }

    #[test]
    fn blank_or_empty_template_loads_one_line() {
        assert_eq!(PrintDocument::from_json("").unwrap().lines().len(), 1);
        assert_eq!(PrintDocument::from_json("[]").unwrap().lines().len(), 1);
        assert!(PrintDocument::from_json("{not json").is_err());
    }

    #[test]
    fn json_survives_a_save_and_load() {
        let mut doc = doc(&[("店名", FontSize::Double), ("住所", FontSize::Normal)]);
        doc.insert_after(1).unwrap();
        let loaded = PrintDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn apply_dispatches_edits() {
        let mut doc = PrintDocument::default();
        doc.apply(Edit::SetText { index: 0, text: "abc".to_string() }).unwrap();
        doc.apply(Edit::InsertAfter { index: 0 }).unwrap();
        doc.apply(Edit::SetText { index: 1, text: "def".to_string() }).unwrap();
        doc.apply(Edit::MergeUp { index: 1 }).unwrap();
        doc.apply(Edit::SetFontSize { index: 0, font_size: FontSize::Triple }).unwrap();
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.lines()[0].text, "abcdef");
        assert_fits(&doc);
    }
}
