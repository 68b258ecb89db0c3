//! Constrained name inputs.
//!
//! Each field may only ever show a leading substring of its target name. Only
//! the *length* of a raw edit matters: a longer value advances the prefix by
//! one character, a shorter one retracts it by one, anything else is ignored.
//! Which character the user actually typed is never inspected.

/// Which of the two name fields an edit belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldId {
    Girl,
    Boy,
}

/// One constrained text field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldState {
    target: String,
    matched_len: usize, // in chars, always <= target char count
}

impl FieldState {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            matched_len: 0,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn matched_len(&self) -> usize {
        self.matched_len
    }

    fn target_len(&self) -> usize {
        self.target.chars().count()
    }

    pub fn is_complete(&self) -> bool {
        self.matched_len == self.target_len()
    }

    /// Text the field must display: `target[..matched_len]`.
    pub fn visible(&self) -> &str {
        match self.target.char_indices().nth(self.matched_len) {
            Some((byte_idx, _)) => &self.target[..byte_idx],
            None => &self.target,
        }
    }

    /// Caret index after a rewrite, in UTF-16 code units like the DOM expects.
    pub fn caret(&self) -> u32 {
        self.visible().encode_utf16().count() as u32
    }

    /// Apply a raw edit whose resulting value has `raw_len` UTF-16 units.
    /// Returns `true` when `matched_len` changed.
    pub fn apply_edit(&mut self, raw_len: usize) -> bool {
        let before = self.matched_len;
        // Compare in the same unit the browser reports, not in chars.
        let shown = self.caret() as usize;
        if raw_len > shown {
            self.matched_len = (self.matched_len + 1).min(self.target_len());
        } else if raw_len < shown {
            self.matched_len = self.matched_len.saturating_sub(1);
        }
        self.matched_len != before
    }
}

/// Result of routing one edit through the gate; tells the DOM layer exactly
/// what to write back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub text: String,
    pub caret: u32,
    pub ready: bool,
}

/// Both name fields plus the derived "ready" signal for the trigger button.
#[derive(Clone, Debug)]
pub struct NameGate {
    girl: FieldState,
    boy: FieldState,
}

impl NameGate {
    pub fn new(girl_target: &str, boy_target: &str) -> Self {
        Self {
            girl: FieldState::new(girl_target),
            boy: FieldState::new(boy_target),
        }
    }

    pub fn field(&self, id: FieldId) -> &FieldState {
        match id {
            FieldId::Girl => &self.girl,
            FieldId::Boy => &self.boy,
        }
    }

    fn field_mut(&mut self, id: FieldId) -> &mut FieldState {
        match id {
            FieldId::Girl => &mut self.girl,
            FieldId::Boy => &mut self.boy,
        }
    }

    pub fn ready(&self) -> bool {
        self.girl.is_complete() && self.boy.is_complete()
    }

    /// Feed the raw value the browser produced for `id`.
    pub fn edit(&mut self, id: FieldId, raw_value: &str) -> EditOutcome {
        let raw_len = raw_value.encode_utf16().count();
        let field = self.field_mut(id);
        if field.apply_edit(raw_len) {
            log::trace!("{id:?} field now {}/{}", field.matched_len, field.target_len());
        }
        let field = self.field(id);
        EditOutcome {
            text: field.visible().to_string(),
            caret: field.caret(),
            ready: self.ready(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_one_char_per_edit_regardless_of_content() {
        let mut f = FieldState::new("Shann");
        assert!(f.apply_edit(1));
        assert_eq!(f.visible(), "S");
        // a multi-char insertion still only advances by one
        assert!(f.apply_edit(4));
        assert_eq!(f.visible(), "Sh");
    }

    #[test]
    fn clamps_at_both_ends() {
        let mut f = FieldState::new("Lio");
        assert!(!f.apply_edit(0));
        assert_eq!(f.matched_len(), 0);
        for _ in 0..10 {
            let len = f.matched_len() + 1;
            f.apply_edit(len);
        }
        assert_eq!(f.visible(), "Lio");
        assert!(f.is_complete());
        assert!(!f.apply_edit(4));
        assert_eq!(f.matched_len(), 3);
    }

    #[test]
    fn equal_length_replace_is_noop() {
        let mut f = FieldState::new("Lio");
        f.apply_edit(1);
        f.apply_edit(2);
        assert!(!f.apply_edit(2));
        assert_eq!(f.visible(), "Li");
    }

    #[test]
    fn deleting_everything_only_retracts_one() {
        let mut f = FieldState::new("Lio");
        f.apply_edit(1);
        f.apply_edit(2);
        f.apply_edit(3);
        assert!(f.apply_edit(0));
        assert_eq!(f.visible(), "Li");
    }

    #[test]
    fn non_ascii_target_slices_on_char_boundaries() {
        let mut f = FieldState::new("Zoë❤");
        for n in 1..=4 {
            f.apply_edit(n);
        }
        assert_eq!(f.visible(), "Zoë❤");
        f.apply_edit(0);
        assert_eq!(f.visible(), "Zoë");
        assert_eq!(f.caret(), 3);
    }

    #[test]
    fn astral_char_prefix_can_be_backspaced() {
        let mut gate = NameGate::new("A😀B", "Lio");
        for _ in 0..3 {
            let mut raw = gate.field(FieldId::Girl).visible().to_string();
            raw.push('x');
            gate.edit(FieldId::Girl, &raw);
        }
        assert_eq!(gate.field(FieldId::Girl).visible(), "A😀B");
        assert_eq!(gate.field(FieldId::Girl).caret(), 4);

        // backspace over the trailing B leaves three UTF-16 units
        let out = gate.edit(FieldId::Girl, "A😀");
        assert_eq!(out.text, "A😀");
        assert_eq!(out.caret, 3);
        assert_eq!(gate.field(FieldId::Girl).matched_len(), 2);

        // half a surrogate pair deleted still counts as one step back
        let out = gate.edit(FieldId::Girl, "A\u{FFFD}");
        assert_eq!(out.text, "A");
        assert_eq!(gate.field(FieldId::Girl).matched_len(), 1);

        // typing one unit after the emoji-free prefix advances onto the emoji
        let out = gate.edit(FieldId::Girl, "Ax");
        assert_eq!(out.text, "A😀");
        assert!(!out.ready);
    }

    #[test]
    fn gate_reports_ready_and_regression() {
        let mut gate = NameGate::new("Shann", "Lio");
        for c in "xxxxx".chars() {
            let mut raw = gate.field(FieldId::Girl).visible().to_string();
            raw.push(c);
            gate.edit(FieldId::Girl, &raw);
        }
        assert_eq!(gate.field(FieldId::Girl).visible(), "Shann");
        assert!(!gate.ready());

        let mut last = None;
        for _ in 0..3 {
            let mut raw = gate.field(FieldId::Boy).visible().to_string();
            raw.push('q');
            last = Some(gate.edit(FieldId::Boy, &raw));
        }
        let out = last.unwrap();
        assert_eq!(out.text, "Lio");
        assert_eq!(out.caret, 3);
        assert!(out.ready);

        let out = gate.edit(FieldId::Boy, "Li");
        assert_eq!(out.text, "Li");
        assert!(!out.ready);
    }
}
