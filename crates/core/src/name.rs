//! Validated player names.

use std::fmt;

use crate::error::NameError;
use crate::types::MAX_PLAYER_NAME_LEN;

/// A trimmed, non-empty player name without control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.chars().count() > MAX_PLAYER_NAME_LEN {
            return Err(NameError::TooLong {
                max: MAX_PLAYER_NAME_LEN,
            });
        }
        if let Some(c) = name.chars().find(|c| c.is_control()) {
            return Err(NameError::InvalidCharacter(c));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
