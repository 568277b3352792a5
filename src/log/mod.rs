//! Log parsing: bracket extraction, line classification, label:value pairs,
//! and the session that folds lines into the store.

pub mod extract;
pub mod pairs;
pub mod parse;
pub mod record;

pub use extract::BracketExtractor;
pub use pairs::parse_pairs;
pub use parse::{IngestStats, LineOutcome, LogParser, parse_log_file};
pub use record::{LineRecord, SkipReason, classify};
