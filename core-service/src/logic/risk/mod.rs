//! Risk Module
//!
//! Rule-based severity labeling for synthetic corpus generation.
//! Turns an AttributeRecord into a risk score, then into Minor/Serious/Fatal
//! (or a rejection when the score lands in a dead zone).
//!
//! ## Structure
//! - `types`: Core types (AttributeRecord, SeverityLabel, Verdict, ScoreBreakdown)
//! - `tables`: Categorical risk contributions (single source of truth)
//! - `rules`: Numeric bonuses and label thresholds
//! - `scorer`: Risk score computation
//! - `classifier`: Risk -> label decision
//!
//! ## Usage
//! ```ignore
//! use severity_core::logic::risk::{classify, score, Verdict};
//!
//! match classify(score(&record)) {
//!     Verdict::Accepted(label) => println!("{}", label),
//!     Verdict::Rejected => println!("dead zone, resample"),
//! }
//! ```

pub mod types;
pub mod tables;
pub mod rules;
pub mod scorer;
pub mod classifier;

pub use types::{AttributeRecord, ScoreBreakdown, SeverityLabel, UnknownLabel, Verdict};
pub use tables::{RiskTable, RiskTables};
pub use rules::SeverityThresholds;
pub use scorer::{breakdown, score, score_with_tables};
pub use classifier::{classify, classify_with_thresholds, label_record};
