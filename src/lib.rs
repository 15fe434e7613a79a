// Topic coherence: corpus-based scoring of topic-model word lists
//
// This is the library root. Scoring flows subsets → prob → measures →
// aggregate, wired together by the coherence orchestrator. The corpus, db and
// output modules are the collaborators around that core.

pub mod aggregate;
pub mod coherence;
pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluate;
pub mod measures;
pub mod output;
pub mod prob;
pub mod subsets;

#[cfg(feature = "sqlite")]
pub mod db;
#[cfg(feature = "sqlite")]
pub mod status;

pub use coherence::{Coherence, Preset};
pub use error::{CoherenceError, Result};
