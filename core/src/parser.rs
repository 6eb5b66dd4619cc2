use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    CheckTile(Coord2),
    FlagTile(Coord2),
    ResizeBoard(Coord),
    SetMineCount(CellCount),
    Ignored(IgnoreReason),
}

/// Why an input produced no state change. Never shown to participants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Matches neither grammar.
    Unrecognized,
    /// A guess that names a cell outside the board.
    OutOfBounds,
    /// A command sent by someone without moderator rights.
    NotModerator,
    /// A command whose argument is out of range.
    InvalidArgument,
    /// The sender is still cooling down.
    Throttled,
    /// The targeted cell is already revealed.
    AlreadyRevealed,
}

/// A syntactically valid tile guess, not yet checked against a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Guess {
    /// Zero-based row from the letter.
    pub row: u8,
    /// Column number as typed, one-based.
    pub column: u8,
    pub kind: GuessKind,
}

impl Guess {
    /// The guessed cell, if it lies on a board of side `size`.
    pub fn coords(&self, size: Coord) -> Option<Coord2> {
        let col = self.column.checked_sub(1)?;
        (self.row < size && col < size).then_some((self.row, col))
    }
}

/// A syntactically valid moderator command, not yet range-checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Size(u32),
    Mines(u32),
}

/// Strips whitespace plus the invisible characters chat clients append to repeated messages.
fn trim_padding(message: &str) -> &str {
    message.trim_matches(|c: char| {
        c.is_whitespace()
            || matches!(
                c,
                '\u{034F}' | '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{E0000}'
            )
    })
}

pub fn parse_guess(message: &str) -> Option<Guess> {
    let bytes = trim_padding(message).as_bytes();

    let (&letter, rest) = bytes.split_first()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }

    let (digits, kind) = match rest {
        [digits @ .., b'f' | b'F'] => (digits, GuessKind::Flag),
        digits => (digits, GuessKind::Check),
    };
    if !(1..=2).contains(&digits.len()) || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let column = digits.iter().fold(0, |acc, digit| acc * 10 + (digit - b'0'));
    Some(Guess {
        row: letter.to_ascii_lowercase() - b'a',
        column,
        kind,
    })
}

pub fn parse_command(message: &str) -> Option<Command> {
    let message = trim_padding(message);

    let (name, rest) = message.split_at(message.find(char::is_whitespace)?);
    // exactly one separator, everything after it digits
    let mut chars = rest.chars();
    chars.next();
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // overlong numbers are out of every range anyway
    let value = digits.parse().unwrap_or(u32::MAX);
    match name {
        "!size" => Some(Command::Size(value)),
        "!mines" => Some(Command::Mines(value)),
        _ => None,
    }
}

/// Parses one chat message against a board of side `size`.
///
/// The tile guess grammar is tried first: one letter for the row, a one- or two-digit column
/// number and an optional `f` to flag instead of check (`a3`, `B6f`), case-insensitive. Only
/// when it does not match is the moderator grammar tried, `!size <n>` or `!mines <n>`, and only
/// moderators may use it. Anything else, including well-formed input that does not fit the live
/// board, is [`Action::Ignored`].
pub fn parse_action(message: &str, is_moderator: bool, size: Coord) -> Action {
    if let Some(guess) = parse_guess(message) {
        return match (guess.coords(size), guess.kind) {
            (Some(coords), GuessKind::Check) => Action::CheckTile(coords),
            (Some(coords), GuessKind::Flag) => Action::FlagTile(coords),
            (None, _) => Action::Ignored(IgnoreReason::OutOfBounds),
        };
    }

    let Some(command) = parse_command(message) else {
        return Action::Ignored(IgnoreReason::Unrecognized);
    };
    if !is_moderator {
        return Action::Ignored(IgnoreReason::NotModerator);
    }

    match command {
        Command::Size(value) => match Coord::try_from(value) {
            Ok(new_size) if (MIN_SIZE..=MAX_SIZE).contains(&new_size) => {
                Action::ResizeBoard(new_size)
            }
            _ => Action::Ignored(IgnoreReason::InvalidArgument),
        },
        Command::Mines(value) if is_valid_mine_count(value, size) => {
            // below size², which always fits
            Action::SetMineCount(value as CellCount)
        }
        Command::Mines(_) => Action::Ignored(IgnoreReason::InvalidArgument),
    }
}

/// The label participants type to address `coords`, e.g. `A3` for `(0, 2)`.
pub fn tile_label((row, col): Coord2) -> String {
    let letter = char::from(b'A' + row % 26);
    format!("{}{}", letter, u16::from(col) + 1)
}
