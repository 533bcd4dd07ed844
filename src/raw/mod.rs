//! Raw result extraction: engine stack dictionaries to plain records.

pub mod extract;
