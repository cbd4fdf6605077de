//! Note storage port trait.

use crate::domain::error::JournalError;
use crate::domain::note::Note;

/// The journal's notes, loaded and saved as a whole collection.
pub trait NoteStore {
    fn load_notes(&self) -> Result<Vec<Note>, JournalError>;

    /// Replace every stored note with `notes`, keeping their order.
    fn save_notes(&self, notes: &[Note]) -> Result<(), JournalError>;
}
