//! Single-pass directory traversal that emits matches as it finds them.

use crossbeam_channel::Sender;
use ignore::WalkBuilder;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::extract;
use crate::matcher::TermMatcher;
use crate::results::MatchRecord;

/// Walks every regular file under the configured root, pushing a
/// [`MatchRecord`] into `sink` for each file the term matches.
///
/// The traversal is single-threaded and makes no ordering guarantee across
/// subdirectories; records arrive in discovery order. Per-file stat or
/// extraction failures are logged and skipped — nothing aborts the walk.
/// The cancellation flag is checked between entries (cooperative: an
/// in-progress read is never interrupted). Returns the number of records
/// emitted.
pub(crate) fn walk(
    config: &SearchConfig,
    sink: &Sender<MatchRecord>,
    cancelled: &AtomicBool,
) -> usize {
    info!(
        "Walking {} for '{}' ({})",
        config.root_path.display(),
        config.term,
        config.mode
    );

    let matcher = TermMatcher::new(config.term.clone(), config.mode);

    // Visit everything reachable from the root: hidden files included, no
    // gitignore semantics. Symlinks are not followed, so a link cycle
    // cannot recurse.
    let walker = WalkBuilder::new(&config.root_path)
        .standard_filters(false)
        .build();

    let mut emitted = 0usize;

    for entry in walker {
        if cancelled.load(Ordering::Relaxed) {
            debug!("Walk cancelled after {} records", emitted);
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let is_match = if matcher.mode().needs_content() {
            matcher.matches_content(&extract::extract(path))
        } else {
            matcher.matches_name(&entry.file_name().to_string_lossy())
        };
        if !is_match {
            continue;
        }

        // Stat info is resolved at emission time; a file that vanished
        // since listing silently drops out of the results.
        match MatchRecord::from_path(path) {
            Ok(record) => {
                if sink.send(record).is_err() {
                    debug!("Result channel closed, stopping walk");
                    break;
                }
                emitted += 1;
            }
            Err(e) => debug!("Dropping candidate {}: {}", path.display(), e),
        }
    }

    info!("Walk complete, {} records emitted", emitted);
    emitted
}
