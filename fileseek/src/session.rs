//! Search session lifecycle: start, poll, stop.
//!
//! A session owns one in-flight search: the walker thread, the FIFO
//! hand-off channel, and the `searching` flag. The flag is single-writer
//! (the walker flips it false exactly once, after its final send) and
//! multi-reader; the channel is the only other state shared between the
//! two threads.
//!
//! The poll contract is a four-state table:
//!
//! | searching | queue     | behavior                                   |
//! |-----------|-----------|--------------------------------------------|
//! | true      | non-empty | dequeue one record, keep polling           |
//! | false     | non-empty | drain everything, terminal                 |
//! | true      | empty     | nothing, keep polling                      |
//! | false     | empty     | nothing, terminal                          |
//!
//! Because `searching` is read before the queue and flips only after the
//! last send, a false reading means the queue already holds every record
//! the walker produced: the terminal drain can never lose one. Terminal
//! states are idempotent — every later poll returns no records and
//! `done = true`.

use crossbeam_channel::{unbounded, Receiver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::results::MatchRecord;
use crate::walk;

/// Process-wide single-flight slot: at most one session at a time.
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// One poll outcome: the drained batch and whether the session is finished.
#[derive(Debug, Default)]
pub struct Poll {
    pub records: Vec<MatchRecord>,
    pub done: bool,
}

/// One in-flight search, owned by the caller.
#[derive(Debug)]
pub struct SearchSession {
    rx: Receiver<MatchRecord>,
    searching: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    walker: Option<JoinHandle<usize>>,
    released: bool,
}

impl SearchSession {
    /// Starts a search, spawning the walker on a background thread.
    ///
    /// Rejections are synchronous and start no background work: an empty
    /// term ([`SearchError::EmptyTerm`]), a root that is not an existing
    /// directory ([`SearchError::RootNotFound`]), or another session still
    /// active ([`SearchError::SessionBusy`]).
    pub fn start(config: SearchConfig) -> SearchResult<SearchSession> {
        if config.term.is_empty() {
            return Err(SearchError::EmptyTerm);
        }
        if !config.root_path.is_dir() {
            return Err(SearchError::root_not_found(&config.root_path));
        }
        if ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SearchError::SessionBusy);
        }

        info!(
            "Session started: '{}' ({}) under {}",
            config.term,
            config.mode,
            config.root_path.display()
        );

        let (tx, rx) = unbounded();
        let searching = Arc::new(AtomicBool::new(true));
        let cancelled = Arc::new(AtomicBool::new(false));

        let walker_searching = Arc::clone(&searching);
        let walker_cancelled = Arc::clone(&cancelled);
        let walker = thread::spawn(move || {
            let emitted = walk::walk(&config, &tx, &walker_cancelled);
            // Flipped only after the final send, so a consumer that reads
            // false is guaranteed the queue is already complete.
            walker_searching.store(false, Ordering::Release);
            emitted
        });

        Ok(SearchSession {
            rx,
            searching,
            cancelled,
            walker: Some(walker),
            released: false,
        })
    }

    /// Latency-bounded poll: never blocks, per the table above.
    pub fn poll(&mut self) -> Poll {
        // Flag before queue; see the module docs for why this ordering
        // makes the terminal drain lossless.
        if self.searching.load(Ordering::Acquire) {
            let records = match self.rx.try_recv() {
                Ok(record) => vec![record],
                Err(_) => Vec::new(),
            };
            Poll {
                records,
                done: false,
            }
        } else {
            let records: Vec<MatchRecord> = self.rx.try_iter().collect();
            self.finish();
            Poll {
                records,
                done: true,
            }
        }
    }

    /// Advisory cancellation: the walker finishes its current entry and
    /// stops emitting. Records already in the queue are still delivered
    /// through the terminal drain.
    pub fn stop(&self) {
        debug!("Session stop requested");
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Joins the finished walker and releases the single-flight slot,
    /// exactly once.
    fn finish(&mut self) {
        if let Some(walker) = self.walker.take() {
            match walker.join() {
                Ok(emitted) => info!("Session complete, {} records emitted", emitted),
                Err(_) => debug!("Walker thread panicked"),
            }
        }
        if !self.released {
            self.released = true;
            ACTIVE.store(false, Ordering::Release);
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        // A session discarded mid-search cancels its walker; the join in
        // finish() is bounded by one file's processing.
        self.cancelled.store(true, Ordering::Relaxed);
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchMode;
    use serial_test::serial;
    use std::fs;
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    /// Polls on a short cadence until the terminal state, with a guard
    /// against a session that never finishes.
    fn drain(session: &mut SearchSession) -> Vec<MatchRecord> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut records = Vec::new();
        loop {
            let poll = session.poll();
            records.extend(poll.records);
            if poll.done {
                return records;
            }
            assert!(Instant::now() < deadline, "session never reported done");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    #[serial]
    fn test_empty_term_is_rejected_before_any_work() {
        let dir = tempdir().unwrap();
        let config = SearchConfig::new(dir.path(), "", MatchMode::NameContains);
        let err = SearchSession::start(config).unwrap_err();
        assert!(matches!(err, SearchError::EmptyTerm));

        // The slot was never taken; a real search can start immediately.
        let config = SearchConfig::new(dir.path(), "x", MatchMode::NameContains);
        let mut session = SearchSession::start(config).unwrap();
        drain(&mut session);
    }

    #[test]
    #[serial]
    fn test_missing_root_is_rejected() {
        let dir = tempdir().unwrap();
        let config = SearchConfig::new(dir.path().join("absent"), "x", MatchMode::NameContains);
        let err = SearchSession::start(config).unwrap_err();
        assert!(matches!(err, SearchError::RootNotFound(_)));
    }

    #[test]
    #[serial]
    fn test_single_flight_rejects_concurrent_start() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("report.csv"), "x").unwrap();

        let config = SearchConfig::new(dir.path(), "report", MatchMode::NameContains);
        let mut session = SearchSession::start(config.clone()).unwrap();

        let err = SearchSession::start(config).unwrap_err();
        assert!(matches!(err, SearchError::SessionBusy));

        // After the terminal poll the slot is free again.
        drain(&mut session);
        let config = SearchConfig::new(dir.path(), "report", MatchMode::NameContains);
        let mut second = SearchSession::start(config).unwrap();
        drain(&mut second);
    }

    #[test]
    #[serial]
    fn test_no_loss_drain_and_terminal_done() {
        let dir = tempdir().unwrap();
        for i in 0..50 {
            fs::write(dir.path().join(format!("match_{i}.txt")), "x").unwrap();
        }
        fs::write(dir.path().join("other.dat"), "x").unwrap();

        let config = SearchConfig::new(dir.path(), "match_", MatchMode::NameContains);
        let mut session = SearchSession::start(config).unwrap();
        let records = drain(&mut session);

        assert_eq!(records.len(), 50);
        // Exactly once each
        let mut names: Vec<&str> = records.iter().map(|r| r.file_name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 50);
    }

    #[test]
    #[serial]
    fn test_terminal_state_is_idempotent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("report.csv"), "x").unwrap();

        let config = SearchConfig::new(dir.path(), "report", MatchMode::NameContains);
        let mut session = SearchSession::start(config).unwrap();
        drain(&mut session);

        for _ in 0..3 {
            let poll = session.poll();
            assert!(poll.done);
            assert!(poll.records.is_empty());
        }
    }

    #[test]
    #[serial]
    fn test_session_and_rejections_are_debug_printable() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("report.csv"), "x").unwrap();

        // `SearchResult<SearchSession>` must support unwrap_err/expect in
        // callers and tests, which needs Debug on both sides.
        let config = SearchConfig::new(dir.path(), "report", MatchMode::NameContains);
        let mut session = SearchSession::start(config.clone()).unwrap();
        assert!(!format!("{session:?}").is_empty());

        let err = SearchSession::start(config).unwrap_err();
        assert!(!format!("{err:?}").is_empty());
        drain(&mut session);
    }

    #[test]
    #[serial]
    fn test_drop_releases_the_slot() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("report.csv"), "x").unwrap();

        let config = SearchConfig::new(dir.path(), "report", MatchMode::NameContains);
        let session = SearchSession::start(config.clone()).unwrap();
        drop(session);

        let mut session = SearchSession::start(config).unwrap();
        drain(&mut session);
    }

    #[test]
    #[serial]
    fn test_stop_still_delivers_in_flight_records() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("report.csv"), "x").unwrap();

        let config = SearchConfig::new(dir.path(), "report", MatchMode::NameContains);
        let mut session = SearchSession::start(config).unwrap();
        session.stop();

        // Whatever was emitted before cancellation took effect is still
        // drained; the session always reaches the terminal state.
        drain(&mut session);
    }
}
