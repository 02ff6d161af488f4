//! Visit counter and visit log
//!
//! Two stores, two overwrites per page load: the global counter and the
//! append-only (ip, timestamp) log. Timestamps use the site's historical
//! `YYYY-MM-DD HH:MM:SS` format.

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::StateStore;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Monotonic tally of page loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitCounter {
    pub count: u64,
}

/// One logged page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub ip: String,
    pub time: String,
}

/// Append-only sequence of visit records.
pub type VisitLog = Vec<VisitRecord>;

/// Records page loads against the injected counter and log stores.
pub struct VisitLogger {
    counter_store: Box<dyn StateStore<VisitCounter>>,
    log_store: Box<dyn StateStore<VisitLog>>,
}

impl VisitLogger {
    pub fn new(
        counter_store: Box<dyn StateStore<VisitCounter>>,
        log_store: Box<dyn StateStore<VisitLog>>,
    ) -> Self {
        Self {
            counter_store,
            log_store,
        }
    }

    /// Log one visit: bump the counter, append an (ip, now) record, and
    /// return the new total for display.
    ///
    /// The caller must hold the state write guard; the load-increment-save
    /// here is not atomic on its own.
    pub fn record_visit(&self, ip: &str) -> Result<u64> {
        let mut counter = self.counter_store.load()?;
        counter.count += 1;
        self.counter_store.save(&counter)?;

        let mut log = self.log_store.load()?;
        log.push(VisitRecord {
            ip: ip.to_string(),
            time: Local::now().format(TIME_FORMAT).to_string(),
        });
        self.log_store.save(&log)?;

        tracing::debug!(ip, count = counter.count, "visit recorded");
        Ok(counter.count)
    }

    /// Current total without recording anything.
    pub fn visit_count(&self) -> Result<u64> {
        Ok(self.counter_store.load()?.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStore, MemoryStore};

    fn in_memory_logger() -> VisitLogger {
        VisitLogger::new(
            Box::new(MemoryStore::new(VisitCounter::default())),
            Box::new(MemoryStore::new(VisitLog::default())),
        )
    }

    #[test]
    fn n_sequential_visits_count_n() {
        let logger = in_memory_logger();
        for i in 1..=5u64 {
            assert_eq!(logger.record_visit("10.0.0.1").expect("record"), i);
        }
        assert_eq!(logger.visit_count().expect("count"), 5);
    }

    #[test]
    fn each_visit_appends_the_given_ip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logger = VisitLogger::new(
            Box::new(JsonFileStore::new(dir.path().join("visits.json"))),
            Box::new(JsonFileStore::new(dir.path().join("users.json"))),
        );
        logger.record_visit("1.1.1.1").expect("record");
        logger.record_visit("2.2.2.2").expect("record");

        let log_store: JsonFileStore<VisitLog> = JsonFileStore::new(dir.path().join("users.json"));
        let log = log_store.load().expect("load");
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].ip, "1.1.1.1");
        assert_eq!(log[1].ip, "2.2.2.2");
    }

    #[test]
    fn counter_survives_reload_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let counter_path = dir.path().join("visits.json");

        {
            let logger = VisitLogger::new(
                Box::new(JsonFileStore::new(&counter_path)),
                Box::new(JsonFileStore::new(dir.path().join("users.json"))),
            );
            logger.record_visit("UNKNOWN").expect("record");
            logger.record_visit("UNKNOWN").expect("record");
        }

        let logger = VisitLogger::new(
            Box::new(JsonFileStore::new(&counter_path)),
            Box::new(JsonFileStore::new(dir.path().join("users.json"))),
        );
        assert_eq!(logger.visit_count().expect("count"), 2);
        assert_eq!(logger.record_visit("UNKNOWN").expect("record"), 3);
    }

    #[test]
    fn corrupt_counter_fails_the_visit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let counter_path = dir.path().join("visits.json");
        std::fs::write(&counter_path, "[oops").expect("write");

        let logger = VisitLogger::new(
            Box::new(JsonFileStore::new(&counter_path)),
            Box::new(JsonFileStore::new(dir.path().join("users.json"))),
        );
        assert!(logger.record_visit("1.1.1.1").is_err());
    }

    #[test]
    fn timestamps_use_the_historical_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logger = VisitLogger::new(
            Box::new(JsonFileStore::new(dir.path().join("visits.json"))),
            Box::new(JsonFileStore::new(dir.path().join("users.json"))),
        );
        logger.record_visit("1.1.1.1").expect("record");

        let log_store: JsonFileStore<VisitLog> = JsonFileStore::new(dir.path().join("users.json"));
        let log = log_store.load().expect("load");
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(log[0].time.len(), 19);
        assert_eq!(&log[0].time[4..5], "-");
        assert_eq!(&log[0].time[10..11], " ");
    }
}
