use prompter_core::core::{ScrollSpeedController, SpeedInput};

/// Text entry bound to the scroll speed.
///
/// While focused it holds a draft; the draft is committed to the speed
/// controller when the entry loses focus or Enter is pressed.
#[derive(Debug, Clone, Default)]
pub struct SpeedEntry {
    draft: Option<String>,
}

impl SpeedEntry {
    /// Longest draft accepted; anything longer is not a sensible speed.
    const MAX_LEN: usize = 8;

    pub fn is_focused(&self) -> bool {
        self.draft.is_some()
    }

    /// Focuses the entry, starting from the current speed text.
    pub fn focus(&mut self, speed: &ScrollSpeedController) {
        if self.draft.is_none() {
            self.draft = Some(speed.text().to_string());
        }
    }

    pub fn push(&mut self, ch: char) {
        if let Some(draft) = self.draft.as_mut()
            && draft.chars().count() < Self::MAX_LEN
            && !ch.is_control()
        {
            draft.push(ch);
        }
    }

    pub fn pop(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.pop();
        }
    }

    /// Drops focus and applies the draft. `None` if the entry was not focused.
    pub fn commit(&mut self, speed: &mut ScrollSpeedController) -> Option<SpeedInput> {
        let draft = self.draft.take()?;
        Some(speed.set_from_text(&draft))
    }

    /// Text the entry shows: the draft while focused, the stored speed otherwise.
    pub fn shown<'a>(&'a self, speed: &'a ScrollSpeedController) -> &'a str {
        self.draft.as_deref().unwrap_or_else(|| speed.text())
    }
}
