use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::leaderboard::{ANONYMOUS, MAX_NAME_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    /// Keep editing
    Editing,
    /// Save the score under this name
    Submit(String),
    Quit,
}

/// Single-line name entry shown after a game ends
#[derive(Debug, Clone, Default)]
pub struct NamePrompt {
    buffer: String,
}

impl NamePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> PromptAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return PromptAction::Quit;
        }

        match key.code {
            KeyCode::Enter if self.buffer.trim().is_empty() => PromptAction::Editing,
            KeyCode::Enter => PromptAction::Submit(std::mem::take(&mut self.buffer)),
            KeyCode::Esc => {
                self.buffer.clear();
                PromptAction::Submit(ANONYMOUS.to_string())
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptAction::Editing
            }
            KeyCode::Char(c) if !c.is_control() && self.buffer.chars().count() < MAX_NAME_LEN => {
                self.buffer.push(c);
                PromptAction::Editing
            }
            _ => PromptAction::Editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(prompt: &mut NamePrompt, text: &str) {
        for c in text.chars() {
            prompt.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn press(prompt: &mut NamePrompt, code: KeyCode) -> PromptAction {
        prompt.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_submit_name() {
        let mut prompt = NamePrompt::new();
        type_text(&mut prompt, "Adaa");
        press(&mut prompt, KeyCode::Backspace);

        assert_eq!(prompt.text(), "Ada");
        assert_eq!(press(&mut prompt, KeyCode::Enter), PromptAction::Submit("Ada".into()));
        assert_eq!(prompt.text(), "");
    }

    #[test]
    fn test_empty_name_needs_skip() {
        let mut prompt = NamePrompt::new();
        type_text(&mut prompt, "  ");

        assert_eq!(press(&mut prompt, KeyCode::Enter), PromptAction::Editing);
        assert_eq!(
            press(&mut prompt, KeyCode::Esc),
            PromptAction::Submit(ANONYMOUS.to_string())
        );
    }

    #[test]
    fn test_length_cap() {
        let mut prompt = NamePrompt::new();
        type_text(&mut prompt, &"z".repeat(30));

        assert_eq!(prompt.text().chars().count(), MAX_NAME_LEN);
    }
}
