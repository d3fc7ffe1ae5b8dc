use eframe::egui::Pos2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditFinish {
    Blur,
    Confirm,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineEdit {
    pub node_id: String,
    pub anchor: Pos2,
    pub buffer: String,
    original: String,
}

impl InlineEdit {
    pub fn open(node_id: &str, label: &str, anchor: Pos2) -> Self {
        Self {
            node_id: node_id.to_owned(),
            anchor,
            buffer: label.to_owned(),
            original: label.to_owned(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn finish(self, how: EditFinish) -> Option<String> {
        if how == EditFinish::Cancel {
            return None;
        }
        let label = self.buffer.trim();
        if label.is_empty() || label == self.original {
            return None;
        }
        Some(label.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn editing(buffer: &str) -> InlineEdit {
        let mut edit = InlineEdit::open("a", "Old label", pos2(10.0, 20.0));
        edit.buffer = buffer.to_owned();
        edit
    }

    #[test]
    fn blur_and_confirm_commit_trimmed_text() {
        assert_eq!(
            editing("  New label ").finish(EditFinish::Blur),
            Some("New label".to_owned())
        );
        assert_eq!(
            editing("New label").finish(EditFinish::Confirm),
            Some("New label".to_owned())
        );
    }

    #[test]
    fn cancel_discards() {
        assert_eq!(editing("New label").finish(EditFinish::Cancel), None);
    }

    #[test]
    fn blank_or_unchanged_text_is_ignored() {
        assert_eq!(editing("   ").finish(EditFinish::Confirm), None);
        assert_eq!(editing("Old label").finish(EditFinish::Confirm), None);
    }

    #[test]
    fn open_keeps_anchor_and_label() {
        let edit = InlineEdit::open("a", "Old label", pos2(10.0, 20.0));
        assert_eq!(edit.anchor, pos2(10.0, 20.0));
        assert_eq!(edit.buffer, edit.original());
    }
}
