//! Journal notes and the per-day notebook view.
//!
//! A note belongs to a calendar date and may reference the trades it
//! discusses by id.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::error::JournalError;
use super::summary::Summary;
use super::trade::{next_id, Trade};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub trade_ids: Vec<String>,
}

/// A note as written by the user, before it is given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub trade_ids: Vec<String>,
}

impl NewNote {
    pub fn into_note(self, id: impl Into<String>) -> Result<Note, JournalError> {
        let id = id.into();
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(JournalError::invalid_note(&id, "title must not be empty"));
        }
        Ok(Note {
            id,
            title,
            content: self.content,
            date: self.date,
            trade_ids: self
                .trade_ids
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        })
    }
}

pub fn next_note_id(existing: &[Note]) -> String {
    next_id(existing.iter().map(|n| n.id.as_str()))
}

/// Stored form of a note's trade references: ids joined by `;`.
pub fn join_trade_ids(ids: &[String]) -> String {
    ids.join(";")
}

pub fn split_trade_ids(field: &str) -> Vec<String> {
    field
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Notes written on `date`, in stored order.
pub fn notes_on(notes: &[Note], date: NaiveDate) -> Vec<Note> {
    notes.iter().filter(|n| n.date == date).cloned().collect()
}

/// The `limit` most recent notes, newest date first. Notes sharing a date
/// keep stored order.
pub fn recent_notes(notes: &[Note], limit: usize) -> Vec<Note> {
    let mut recent = notes.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(limit);
    recent
}

/// Every date that has notes, newest first, with its note count.
pub fn journal_dates(notes: &[Note]) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for note in notes {
        *counts.entry(note.date).or_default() += 1;
    }
    counts.into_iter().rev().collect()
}

pub fn edit_note(notes: &mut [Note], id: &str, content: String) -> Result<Note, JournalError> {
    let note = notes
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or_else(|| not_found(id))?;
    note.content = content;
    Ok(note.clone())
}

pub fn delete_note(notes: &mut Vec<Note>, id: &str) -> Result<Note, JournalError> {
    let index = notes
        .iter()
        .position(|n| n.id == id)
        .ok_or_else(|| not_found(id))?;
    Ok(notes.remove(index))
}

fn not_found(id: &str) -> JournalError {
    JournalError::NotFound {
        kind: "note",
        id: id.to_string(),
    }
}

/// One day of the journal: its notes, its trades and how those trades did.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyJournal {
    pub date: NaiveDate,
    pub notes: Vec<Note>,
    pub trades: Vec<Trade>,
    pub summary: Summary,
}

impl DailyJournal {
    pub fn compute(notes: &[Note], trades: &[Trade], date: NaiveDate) -> Self {
        let trades: Vec<Trade> = trades.iter().filter(|t| t.date() == date).cloned().collect();
        let summary = Summary::compute(&trades);
        DailyJournal {
            date,
            notes: notes_on(notes, date),
            trades,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::Direction;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn note(id: &str, day: u32) -> Note {
        NewNote {
            title: format!("note {id}"),
            content: String::new(),
            date: d(day),
            trade_ids: Vec::new(),
        }
        .into_note(id)
        .unwrap()
    }

    fn trade(id: &str, day: u32, pnl: f64) -> Trade {
        Trade {
            id: id.into(),
            symbol: "SPY".into(),
            direction: Direction::Buy,
            quantity: 1,
            entry_price: 100.0,
            exit_price: 100.0 + pnl,
            timestamp: d(day).and_hms_opt(14, 0, 0).unwrap(),
            profit_loss: pnl,
            fees: None,
            notes: None,
        }
    }

    #[test]
    fn title_is_required_and_trade_ids_are_cleaned() {
        let blank = NewNote {
            title: "  ".into(),
            content: "body".into(),
            date: d(4),
            trade_ids: Vec::new(),
        };
        assert!(matches!(
            blank.into_note("1"),
            Err(JournalError::InvalidNote { note_id, .. }) if note_id == "1"
        ));

        let ok = NewNote {
            title: " Gap fill ".into(),
            content: "Waited for the open.".into(),
            date: d(4),
            trade_ids: vec!["3".into(), " ".into(), " 7 ".into()],
        }
        .into_note("2")
        .unwrap();
        assert_eq!(ok.title, "Gap fill");
        assert_eq!(ok.trade_ids, vec!["3", "7"]);
    }

    #[test]
    fn trade_id_field_round_trips() {
        let ids = vec!["1".to_string(), "12".to_string()];
        assert_eq!(join_trade_ids(&ids), "1;12");
        assert_eq!(split_trade_ids("1; 12;"), ids);
        assert!(split_trade_ids("").is_empty());
    }

    #[test]
    fn recent_notes_newest_first() {
        let notes = vec![note("1", 2), note("2", 5), note("3", 4), note("4", 5)];
        let ids: Vec<String> = recent_notes(&notes, 3).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["2", "4", "3"]);
    }

    #[test]
    fn journal_dates_count_notes_per_day() {
        let notes = vec![note("1", 2), note("2", 5), note("3", 2)];
        assert_eq!(journal_dates(&notes), vec![(d(5), 1), (d(2), 2)]);
        assert!(journal_dates(&[]).is_empty());
    }

    #[test]
    fn edit_and_delete_by_id() {
        let mut notes = vec![note("1", 2), note("2", 3)];
        let edited = edit_note(&mut notes, "2", "Cut the loser early.".into()).unwrap();
        assert_eq!(edited.content, "Cut the loser early.");
        assert_eq!(notes[1].content, "Cut the loser early.");

        let removed = delete_note(&mut notes, "1").unwrap();
        assert_eq!(removed.id, "1");
        assert_eq!(notes.len(), 1);

        assert!(matches!(
            delete_note(&mut notes, "1"),
            Err(JournalError::NotFound { kind: "note", .. })
        ));
        assert!(edit_note(&mut notes, "9", String::new()).is_err());
    }

    #[test]
    fn daily_journal_summarizes_that_day_only() {
        let notes = vec![note("1", 4), note("2", 5)];
        let trades = vec![
            trade("1", 4, 36.0),
            trade("2", 4, 23.5),
            trade("3", 5, -58.8),
            trade("4", 4, -10.0),
        ];
        let day = DailyJournal::compute(&notes, &trades, d(4));

        assert_eq!(day.notes.len(), 1);
        assert_eq!(day.notes[0].id, "1");
        assert_eq!(day.trades.len(), 3);
        assert!((day.summary.total_profit_loss - 49.5).abs() < 1e-9);
        assert_eq!(day.summary.winning_count, 2);
        assert_eq!(day.summary.losing_count, 1);
        assert_eq!(day.summary.win_rate, 67);
    }

    #[test]
    fn next_id_follows_largest() {
        assert_eq!(next_note_id(&[]), "1");
        assert_eq!(next_note_id(&[note("4", 1), note("x", 1)]), "5");
    }
}
