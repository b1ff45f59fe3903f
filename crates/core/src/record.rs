//! Leaderboard line codec.
//!
//! One record per line:
//!
//! ```text
//! playerName,difficulty,moves,YYYY-MM-DD HH:MM:SS
//! ```
//!
//! Player names may contain the field delimiter. Backslash, comma, CR and LF
//! inside a name are written as `\\`, `\,`, `\r` and `\n`. Any other
//! backslash is kept as written, so most files from before escaping existed
//! still load unchanged. A legacy name holding one of those four sequences
//! reads back decoded; one ending in a backslash swallows the following
//! delimiter and the line is rejected.

use chrono::NaiveDateTime;

use crate::error::RecordError;
use crate::score::ScoreEntry;
use crate::types::Difficulty;

/// Timestamp layout used in the leaderboard file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FIELD_COUNT: usize = 4;

pub fn encode_record(entry: &ScoreEntry) -> String {
    let mut line = String::with_capacity(entry.player_name.len() + 32);
    for ch in entry.player_name.chars() {
        match ch {
            '\\' => line.push_str("\\\\"),
            ',' => line.push_str("\\,"),
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            _ => line.push(ch),
        }
    }
    line.push(',');
    line.push_str(entry.difficulty.as_str());
    line.push(',');
    line.push_str(&entry.moves.to_string());
    line.push(',');
    line.push_str(&entry.timestamp.format(TIMESTAMP_FORMAT).to_string());
    line
}

pub fn decode_record(line: &str) -> Result<ScoreEntry, RecordError> {
    let fields = split_fields(line.trim_end_matches(['\r', '\n']));
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::FieldCount(fields.len()));
    }

    let player_name = fields[0].clone();
    if player_name.trim().is_empty() {
        return Err(RecordError::EmptyName);
    }

    let difficulty = Difficulty::from_str(&fields[1])
        .ok_or_else(|| RecordError::Difficulty(fields[1].clone()))?;

    let moves = fields[2]
        .trim()
        .parse::<u32>()
        .map_err(|_| RecordError::Moves(fields[2].clone()))?;

    let timestamp = NaiveDateTime::parse_from_str(fields[3].trim(), TIMESTAMP_FORMAT)
        .map_err(|_| RecordError::Timestamp(fields[3].clone()))?;

    Ok(ScoreEntry {
        player_name,
        difficulty,
        moves,
        timestamp,
    })
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.peek() {
                Some('n') => {
                    chars.next();
                    current.push('\n');
                }
                Some('r') => {
                    chars.next();
                    current.push('\r');
                }
                Some(&escaped @ ('\\' | ',')) => {
                    chars.next();
                    current.push(escaped);
                }
                _ => current.push('\\'),
            },
            ',' => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
