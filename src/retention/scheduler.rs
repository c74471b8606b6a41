//! Retention scheduler: decides, per host trigger, whether to purge.
//!
//! The scheduler never runs on its own. The host calls
//! [`RetentionScheduler::check_and_maybe_purge`] (and, on startup or per
//! trigger, [`RetentionScheduler::check_and_maybe_purge_on_upgrade`]) on
//! whatever cadence it has; each call re-reads fresh retention state and
//! decides independently.

use chrono::{DateTime, Utc};

use super::error::RetentionResult;
use super::purger::{PurgeReport, purge};
use super::status::{RetentionStatus, inspect};
use super::LOG_FILES;
use crate::config::RetentionConfig;
use crate::state::PersistentState;

/// Decides when the fixed log file set is purged.
///
/// Owns nothing durable: retention state lives in the host-supplied
/// [`PersistentState`] store. The host constructs one scheduler and
/// serializes calls into it; redundant purges caused by overlapping host
/// triggers are harmless because the purge is idempotent.
pub struct RetentionScheduler<S> {
    config: RetentionConfig,
    state: S,
}

impl<S: PersistentState> RetentionScheduler<S> {
    pub fn new(config: RetentionConfig, state: S) -> Self {
        Self { config, state }
    }

    /// Age-based check. Purges when no check has ever fired, or when at
    /// least the configured max age has elapsed since the last one.
    /// Returns `None` when nothing was due.
    ///
    /// `last_run` is written before the purge, so a crash mid-purge delays
    /// the retry to the next full interval instead of looping on every
    /// trigger. This also means a persistently missing log directory only
    /// re-checks once per interval.
    pub fn check_and_maybe_purge(
        &mut self,
        now: DateTime<Utc>,
    ) -> RetentionResult<Option<PurgeReport>> {
        if !self.config.enabled {
            tracing::debug!("Retention disabled by configuration");
            return Ok(None);
        }

        let due = match self.state.last_run()? {
            None => true,
            Some(last) => now - last >= self.config.max_age(),
        };
        if !due {
            tracing::debug!("Retention check complete, not due yet");
            return Ok(None);
        }

        self.state.set_last_run(now)?;
        let report = self.purge();
        tracing::info!(
            trigger = "age",
            deleted = report.deleted(),
            "Retention purge complete"
        );
        Ok(Some(report))
    }

    /// Upgrade check. Purges exactly once when the stored schema version is
    /// absent or older than `current_schema`, independent of the age timer.
    /// Returns `None` when the stored version is already current.
    ///
    /// The new version is written before the purge, mirroring the age
    /// check's ordering. Both checks may fire on the same invocation (first
    /// trigger after an upgrade with an expired timer); the double purge is
    /// harmless.
    pub fn check_and_maybe_purge_on_upgrade(
        &mut self,
        current_schema: u32,
    ) -> RetentionResult<Option<PurgeReport>> {
        if !self.config.enabled {
            tracing::debug!("Retention disabled by configuration");
            return Ok(None);
        }

        let outdated = match self.state.schema_version()? {
            None => true,
            Some(stored) => stored < current_schema,
        };
        if !outdated {
            return Ok(None);
        }

        self.state.set_schema_version(current_schema)?;
        let report = self.purge();
        tracing::info!(
            trigger = "upgrade",
            schema = current_schema,
            deleted = report.deleted(),
            "Retention purge complete"
        );
        Ok(Some(report))
    }

    /// Manual trigger, e.g. a "purge now" button on a host settings page.
    /// Resets the age timer, then purges unconditionally. Not gated by the
    /// `enabled` flag: an explicit request always runs.
    pub fn purge_now(&mut self, now: DateTime<Utc>) -> RetentionResult<PurgeReport> {
        self.state.set_last_run(now)?;
        let report = self.purge();
        tracing::info!(
            trigger = "manual",
            deleted = report.deleted(),
            "Retention purge complete"
        );
        Ok(report)
    }

    /// Snapshot of retention state and current file sizes, for display.
    /// Mutates nothing.
    pub fn status(&self) -> RetentionResult<RetentionStatus> {
        Ok(RetentionStatus {
            last_run: self.state.last_run()?,
            max_age_hours: self.config.max_age_hours,
            files: inspect(&self.config.log_dir, &LOG_FILES),
        })
    }

    fn purge(&self) -> PurgeReport {
        purge(&self.config.log_dir, &LOG_FILES)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::state::MemoryState;

    fn scheduler_for(dir: &Path) -> RetentionScheduler<MemoryState> {
        RetentionScheduler::new(RetentionConfig::new(dir), MemoryState::new())
    }

    fn seed_logs(dir: &Path) {
        for name in LOG_FILES {
            fs::write(dir.join(name), b"log data").unwrap();
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_first_check_always_purges() {
        let dir = tempfile::tempdir().unwrap();
        seed_logs(dir.path());
        let mut scheduler = scheduler_for(dir.path());

        let report = scheduler.check_and_maybe_purge(now()).unwrap();
        assert_eq!(report.unwrap().deleted(), 3);
        assert_eq!(scheduler.state.last_run().unwrap(), Some(now()));
    }

    #[rstest]
    // One second short of the threshold: nothing is due.
    #[case(Duration::hours(7 * 24) - Duration::seconds(1), false)]
    // Exactly at the threshold: the purge fires.
    #[case(Duration::hours(7 * 24), true)]
    #[case(Duration::hours(7 * 24) + Duration::seconds(1), true)]
    fn test_age_threshold(#[case] elapsed: Duration, #[case] should_purge: bool) {
        let dir = tempfile::tempdir().unwrap();
        seed_logs(dir.path());
        let mut scheduler = scheduler_for(dir.path());
        scheduler.state.set_last_run(now() - elapsed).unwrap();

        let report = scheduler.check_and_maybe_purge(now()).unwrap();
        assert_eq!(report.is_some(), should_purge);

        let expected_last = if should_purge {
            Some(now())
        } else {
            Some(now() - elapsed)
        };
        assert_eq!(scheduler.state.last_run().unwrap(), expected_last);
    }

    #[test]
    fn test_noop_check_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut scheduler = scheduler_for(dir.path());
        let recent = now() - Duration::hours(1);
        scheduler.state.set_last_run(recent).unwrap();

        assert!(scheduler.check_and_maybe_purge(now()).unwrap().is_none());
        assert_eq!(scheduler.state.last_run().unwrap(), Some(recent));
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(2), true)]
    #[case(Some(3), false)]
    #[case(Some(4), false)]
    fn test_schema_upgrade(#[case] stored: Option<u32>, #[case] should_purge: bool) {
        let dir = tempfile::tempdir().unwrap();
        seed_logs(dir.path());
        let mut scheduler = scheduler_for(dir.path());
        if let Some(v) = stored {
            scheduler.state.set_schema_version(v).unwrap();
        }

        let report = scheduler.check_and_maybe_purge_on_upgrade(3).unwrap();
        assert_eq!(report.is_some(), should_purge);

        let expected = if should_purge { Some(3) } else { stored };
        assert_eq!(scheduler.state.schema_version().unwrap(), expected);
    }

    #[test]
    fn test_upgrade_check_ignores_age_timer() {
        let dir = tempfile::tempdir().unwrap();
        seed_logs(dir.path());
        let mut scheduler = scheduler_for(dir.path());
        // Timer is fresh, but the schema bumped.
        scheduler.state.set_last_run(now()).unwrap();
        scheduler.state.set_schema_version(2).unwrap();

        let report = scheduler.check_and_maybe_purge_on_upgrade(3).unwrap();
        assert_eq!(report.unwrap().deleted(), 3);
    }

    #[test]
    fn test_both_checks_fire_on_same_invocation() {
        let dir = tempfile::tempdir().unwrap();
        seed_logs(dir.path());
        let mut scheduler = scheduler_for(dir.path());

        let by_upgrade = scheduler.check_and_maybe_purge_on_upgrade(3).unwrap();
        assert_eq!(by_upgrade.unwrap().deleted(), 3);

        // Second purge of the same invocation sees everything gone already.
        let by_age = scheduler.check_and_maybe_purge(now()).unwrap().unwrap();
        assert_eq!(by_age.deleted(), 0);
        assert!(
            by_age
                .outcomes
                .iter()
                .all(|(_, o)| *o == crate::retention::FileOutcome::AlreadyAbsent)
        );
    }

    #[test]
    fn test_missing_directory_still_updates_last_run() {
        let mut scheduler = scheduler_for(Path::new("/nonexistent/logsweep-test"));

        let report = scheduler.check_and_maybe_purge(now()).unwrap().unwrap();
        assert!(report.directory_missing);
        assert_eq!(report.deleted(), 0);
        // The timer resets even though nothing could be purged, so a
        // missing directory is re-checked once per interval, not per
        // trigger.
        assert_eq!(scheduler.state.last_run().unwrap(), Some(now()));
    }

    #[test]
    fn test_disabled_config_is_inert() {
        let dir = tempfile::tempdir().unwrap();
        seed_logs(dir.path());
        let mut config = RetentionConfig::new(dir.path());
        config.enabled = false;
        let mut scheduler = RetentionScheduler::new(config, MemoryState::new());

        assert!(scheduler.check_and_maybe_purge(now()).unwrap().is_none());
        assert!(
            scheduler
                .check_and_maybe_purge_on_upgrade(3)
                .unwrap()
                .is_none()
        );
        assert_eq!(scheduler.state.last_run().unwrap(), None);
        assert_eq!(scheduler.state.schema_version().unwrap(), None);
        assert!(dir.path().join(LOG_FILES[0]).exists());
    }

    #[test]
    fn test_purge_now_resets_timer_and_purges() {
        let dir = tempfile::tempdir().unwrap();
        seed_logs(dir.path());
        let mut scheduler = scheduler_for(dir.path());
        scheduler.state.set_last_run(now() - Duration::hours(1)).unwrap();

        let report = scheduler.purge_now(now()).unwrap();
        assert_eq!(report.deleted(), 3);
        assert_eq!(scheduler.state.last_run().unwrap(), Some(now()));
    }

    #[test]
    fn test_status_reports_sizes_and_last_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LOG_FILES[0]), [0u8; 100]).unwrap();
        fs::write(dir.path().join(LOG_FILES[2]), [0u8; 50]).unwrap();
        let mut scheduler = scheduler_for(dir.path());
        scheduler.state.set_last_run(now()).unwrap();

        let status = scheduler.status().unwrap();
        assert_eq!(status.last_run, Some(now()));
        assert_eq!(status.max_age_hours, 168);
        assert_eq!(status.files[0].size_bytes, Some(100));
        assert_eq!(status.files[1].size_bytes, None);
        assert_eq!(status.files[2].size_bytes, Some(50));
    }
}
