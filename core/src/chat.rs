use serde::{Deserialize, Serialize};

use crate::*;

/// Identity used for clicks and entries made on the local screen.
pub const LOCAL_USER: &str = "User";
pub const LOCAL_COLOR: &str = "#FFFFFF";

/// Names longer than this are shortened for display.
const NAME_TRIM_CUTOFF: usize = 10;
/// Characters kept from a shortened name.
const NAME_KEPT_CHARS: usize = 7;

/// One message delivered by the chat transport, trusted as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEvent {
    pub message: String,
    pub user: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_moderator: bool,
}

impl ChatEvent {
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user: user.into(),
            color: LOCAL_COLOR.to_owned(),
            is_moderator: false,
        }
    }

    /// A message typed into the local entry field, which always carries moderator rights.
    pub fn local(message: impl Into<String>) -> Self {
        Self::new(LOCAL_USER, message).moderator(true)
    }

    pub fn moderator(mut self, is_moderator: bool) -> Self {
        self.is_moderator = is_moderator;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessKind {
    Check,
    Flag,
}

/// An accepted guess, kept for display until the board regenerates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub user: String,
    pub color: String,
    pub kind: GuessKind,
    pub coords: Coord2,
    pub delta: Score,
}

impl ChatEntry {
    /// The guess as a participant would type it, e.g. `B6F`.
    pub fn label(&self) -> String {
        let label = tile_label(self.coords);
        match self.kind {
            GuessKind::Check => label,
            GuessKind::Flag => label + "F",
        }
    }

    pub fn display_name(&self) -> String {
        display_name(&self.user)
    }
}

/// Shortens long names to their first few characters followed by `...`.
pub fn display_name(user: &str) -> String {
    if user.chars().count() <= NAME_TRIM_CUTOFF {
        user.to_owned()
    } else {
        let mut name: String = user.chars().take(NAME_KEPT_CHARS).collect();
        name.push_str("...");
        name
    }
}

/// Accepted guesses of the current board, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
}

impl ChatLog {
    pub fn push(&mut self, entry: ChatEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
