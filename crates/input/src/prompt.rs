//! Single-line text entry for the difficulty and name prompts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Edited,
    Submitted(String),
    Cancelled,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    max_len: usize,
}

impl LineInput {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            max_len,
        }
    }

    /// Start with `initial` already typed (truncated to `max_len`).
    pub fn with_text(max_len: usize, initial: &str) -> Self {
        Self {
            text: initial.chars().take(max_len).collect(),
            max_len,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptEvent {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return match key.code {
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.text.clear();
                    PromptEvent::Edited
                }
                _ => PromptEvent::Ignored,
            };
        }

        match key.code {
            KeyCode::Enter => PromptEvent::Submitted(self.text.clone()),
            KeyCode::Esc => PromptEvent::Cancelled,
            KeyCode::Backspace => {
                if self.text.pop().is_some() {
                    PromptEvent::Edited
                } else {
                    PromptEvent::Ignored
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                if self.text.chars().count() >= self.max_len {
                    return PromptEvent::Ignored;
                }
                self.text.push(c);
                PromptEvent::Edited
            }
            _ => PromptEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut LineInput, s: &str) {
        for c in s.chars() {
            input.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_and_submitting() {
        let mut input = LineInput::new(10);
        type_str(&mut input, "Ana");
        assert_eq!(input.text(), "Ana");
        assert_eq!(
            input.handle_key(KeyEvent::from(KeyCode::Enter)),
            PromptEvent::Submitted("Ana".to_string())
        );
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut input = LineInput::with_text(10, "héé");
        assert_eq!(input.handle_key(KeyEvent::from(KeyCode::Backspace)), PromptEvent::Edited);
        assert_eq!(input.text(), "hé");
        input.clear();
        assert_eq!(input.handle_key(KeyEvent::from(KeyCode::Backspace)), PromptEvent::Ignored);
    }

    #[test]
    fn respects_max_len() {
        let mut input = LineInput::new(3);
        type_str(&mut input, "abcdef");
        assert_eq!(input.text(), "abc");
        assert_eq!(LineInput::with_text(2, "xyz").text(), "xy");
    }

    #[test]
    fn escape_cancels_and_ctrl_u_clears() {
        let mut input = LineInput::with_text(10, "medium");
        assert_eq!(
            input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            PromptEvent::Edited
        );
        assert_eq!(input.text(), "");
        assert_eq!(input.handle_key(KeyEvent::from(KeyCode::Esc)), PromptEvent::Cancelled);
    }

    #[test]
    fn q_is_text_not_quit() {
        let mut input = LineInput::new(10);
        assert_eq!(input.handle_key(KeyEvent::from(KeyCode::Char('q'))), PromptEvent::Edited);
        assert_eq!(input.text(), "q");
    }
}
