use log::debug;

use crate::subtitle_processor::SubtitleTrack;

// @module: Time-range replacement merge of two subtitle tracks

/// Merge a freshly generated track into an existing one.
///
/// Every entry of the new track fully supersedes any existing entry whose
/// time range it strictly overlaps; touching endpoints do not count as
/// overlap. Non-overlapping existing entries survive unmodified apart from
/// renumbering. Overlapping ones are discarded whole, never trimmed.
///
/// New entries are processed in their original order; the working set is
/// re-sorted by start time and renumbered after each insertion. Track sizes
/// are small, so the repeated sort is not worth optimizing away, and the
/// per-entry order fixes conflict resolution when several new entries
/// contend for the same existing one.
pub fn merge_tracks(existing: &SubtitleTrack, new: &SubtitleTrack) -> SubtitleTrack {
    let mut merged = existing.clone();

    for entry in &new.entries {
        // Drop every existing entry overlapping this one
        merged.entries.retain(|kept| {
            !(kept.start_time_ms < entry.end_time_ms && entry.start_time_ms < kept.end_time_ms)
        });

        merged.entries.push(entry.clone());
        merged.sort_by_start();
        merged.renumber();
    }

    debug!(
        "Merged {} new entries into {} existing ones, result has {} entries",
        new.len(),
        existing.len(),
        merged.len()
    );

    merged
}
