use crate::app_dirs::AppDirs;
use crate::session::Mode;
use crate::settings::{Settings, TrackingMode};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One finished, recorded session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: u64,
    pub mode: Mode,
    pub date: DateTime<Local>,
}

/// Lifetime aggregate plus the append-only session history.
///
/// Only mutated through [`Stats::record`], and only at session completion;
/// nothing here changes while a session is running.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub best_wpm: u32,
    pub avg_accuracy: u32,
    pub tests_taken: u32,
    /// Whole minutes, rounded per session as it is added.
    pub time_typed: u64,
    pub sessions_history: Vec<SessionRecord>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            best_wpm: 0,
            avg_accuracy: 0,
            tests_taken: 0,
            time_typed: 0,
            sessions_history: Vec::new(),
        }
    }
}

/// Whether a finished session should touch the aggregate at all.
/// Practice runs and opted-out devices leave no trace.
pub fn should_record(tracking: TrackingMode, mode: Mode) -> bool {
    tracking == TrackingMode::Local && mode != Mode::Practice
}

impl Stats {
    /// Fold one session result into the aggregate and append its record.
    /// `avg_accuracy` is a running weighted mean over `tests_taken`.
    pub fn record(&mut self, wpm: u32, accuracy: u32, errors: u64, mode: Mode, seconds_used: u32) {
        self.tests_taken += 1;
        self.best_wpm = self.best_wpm.max(wpm);

        let n = self.tests_taken as f64;
        self.avg_accuracy =
            ((self.avg_accuracy as f64 * (n - 1.0) + accuracy as f64) / n).round() as u32;

        self.time_typed += (seconds_used as f64 / 60.0).round() as u64;

        self.sessions_history.push(SessionRecord {
            wpm,
            accuracy,
            errors,
            mode,
            date: Local::now(),
        });
    }
}

pub trait StatsStore {
    fn load(&self) -> Stats;
    fn save(&self, stats: &Stats) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileStatsStore {
    path: PathBuf,
}

impl FileStatsStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::stats_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileStatsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsStore for FileStatsStore {
    fn load(&self) -> Stats {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(stats) = serde_json::from_slice::<Stats>(&bytes) {
                return stats;
            }
        }
        Stats::default()
    }

    fn save(&self, stats: &Stats) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(stats).unwrap_or_default();
        fs::write(&self.path, data)
    }

    fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportBundle<'a> {
    stats: &'a Stats,
    settings: &'a Settings,
    export_date: DateTime<Local>,
}

/// Write the combined stats/settings snapshot to `path` as pretty JSON.
pub fn export_to_file<P: AsRef<Path>>(
    path: P,
    stats: &Stats,
    settings: &Settings,
) -> std::io::Result<()> {
    let bundle = ExportBundle {
        stats,
        settings,
        export_date: Local::now(),
    };
    let data = serde_json::to_vec_pretty(&bundle).unwrap_or_default();
    fs::write(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn record_updates_all_aggregates() {
        let mut stats = Stats::default();
        stats.record(40, 90, 3, Mode::Timed, 60);

        assert_eq!(stats.tests_taken, 1);
        assert_eq!(stats.best_wpm, 40);
        assert_eq!(stats.avg_accuracy, 90);
        assert_eq!(stats.time_typed, 1);
        assert_eq!(stats.sessions_history.len(), 1);
        assert_eq!(stats.sessions_history[0].errors, 3);
        assert_eq!(stats.sessions_history[0].mode, Mode::Timed);
    }

    #[test]
    fn best_wpm_is_a_running_max() {
        let mut stats = Stats::default();
        stats.record(40, 100, 0, Mode::Timed, 60);
        stats.record(30, 100, 0, Mode::Timed, 60);
        assert_eq!(stats.best_wpm, 40);
        stats.record(55, 100, 0, Mode::Timed, 60);
        assert_eq!(stats.best_wpm, 55);
    }

    #[test]
    fn accuracy_is_a_weighted_running_mean() {
        let mut stats = Stats::default();
        stats.record(10, 100, 0, Mode::Timed, 60);
        stats.record(10, 80, 0, Mode::Timed, 60);
        // round((100*1 + 80) / 2) = 90
        assert_eq!(stats.avg_accuracy, 90);
        stats.record(10, 70, 0, Mode::Timed, 60);
        // round((90*2 + 70) / 3) = round(83.33) = 83
        assert_eq!(stats.avg_accuracy, 83);
    }

    #[test]
    fn time_typed_rounds_session_minutes() {
        let mut stats = Stats::default();
        stats.record(10, 100, 0, Mode::Timed, 29); // rounds to 0
        stats.record(10, 100, 0, Mode::Timed, 31); // rounds to 1
        stats.record(10, 100, 0, Mode::Timed, 120); // 2
        assert_eq!(stats.time_typed, 3);
    }

    #[test]
    fn each_finish_appends_exactly_one_record() {
        let mut stats = Stats::default();
        for i in 0..5 {
            stats.record(10 + i, 100, 0, Mode::Timed, 60);
        }
        assert_eq!(stats.sessions_history.len(), 5);
        assert_eq!(stats.tests_taken, 5);
    }

    #[test]
    fn practice_and_opt_out_are_not_recorded() {
        assert!(should_record(TrackingMode::Local, Mode::Timed));
        assert!(!should_record(TrackingMode::Local, Mode::Practice));
        assert!(!should_record(TrackingMode::None, Mode::Timed));
        assert!(!should_record(TrackingMode::None, Mode::Practice));
    }

    #[test]
    fn store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileStatsStore::with_path(dir.path().join("stats.json"));
        let mut stats = Stats::default();
        stats.record(62, 97, 2, Mode::Timed, 60);
        store.save(&stats).unwrap();
        assert_eq!(store.load(), stats);
    }

    #[test]
    fn missing_record_loads_zero_state() {
        let dir = tempdir().unwrap();
        let store = FileStatsStore::with_path(dir.path().join("stats.json"));
        assert_eq!(store.load(), Stats::default());
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let mut stats = Stats::default();
        stats.record(62, 97, 2, Mode::Timed, 60);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"bestWpm\""));
        assert!(json.contains("\"avgAccuracy\""));
        assert!(json.contains("\"testsTaken\""));
        assert!(json.contains("\"timeTyped\""));
        assert!(json.contains("\"sessionsHistory\""));
        assert!(json.contains("\"mode\":\"timed\""));
    }

    #[test]
    fn export_bundle_contains_both_records_and_a_date() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");
        let mut stats = Stats::default();
        stats.record(62, 97, 2, Mode::Timed, 60);

        export_to_file(&path, &stats, &Settings::default()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("stats").is_some());
        assert!(value.get("settings").is_some());
        assert!(value.get("exportDate").is_some());
        assert_eq!(value["stats"]["bestWpm"], 62);
    }

    #[test]
    fn clear_resets_to_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let store = FileStatsStore::with_path(&path);
        store.save(&Stats::default()).unwrap();
        store.clear().unwrap();
        assert!(!path.exists());
        store.clear().unwrap();
    }
}
