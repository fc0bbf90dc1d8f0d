//! Transcript logger port
//!
//! Observability hook fired after each log commit. Failures here never
//! affect the discussion; adapters are expected to log and move on.

use roundtable_domain::DiscussionEntry;

/// Records committed entries for offline inspection
pub trait TranscriptLogger: Send + Sync {
    fn record(&self, entry: &DiscussionEntry);
}

/// Transcript logger that records nothing
#[derive(Debug, Clone, Default)]
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn record(&self, _entry: &DiscussionEntry) {}
}
