//! # File I/O Module
//!
//! Schedule file operations with safety features:
//! - **Atomic saves**: write to .tmp, sync, rename to prevent corruption
//! - **File locking**: prevent concurrent edits on shared drives
//! - **Version validation**: ensure schema compatibility
//!
//! ## File Format
//!
//! Schedules are saved as `.sds` files containing JSON. Lock files use the
//! `.sds.lock` extension and record who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use steel_core::file_io::{save_schedule, load_schedule, FileLock};
//! use steel_core::schedule::DesignSchedule;
//! use std::path::Path;
//!
//! let schedule = DesignSchedule::new("Engineer", "25-001", "Mezzanine");
//! let path = Path::new("mezzanine.sds");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//! save_schedule(&schedule, path).unwrap();
//! drop(lock);
//!
//! let loaded = load_schedule(path).unwrap();
//! assert_eq!(loaded.meta.job_id, "25-001");
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::schedule::{DesignSchedule, SCHEMA_VERSION};

/// Locks older than this are ignored regardless of their holder
const LOCK_TTL_HOURS: i64 = 24;

/// Holder of a schedule lock, stored as JSON in the `.sds.lock` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Email or login of the holder
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: machine_name(),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Expired, or held by a process that no longer runs on this machine
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > Duration::hours(LOCK_TTL_HOURS) {
            return true;
        }
        self.machine == machine_name() && !process_alive(self.pid)
    }

    fn holder(&self) -> String {
        format!("{} ({})", self.user_id, self.machine)
    }
}

fn machine_name() -> String {
    ["HOSTNAME", "COMPUTERNAME", "HOST"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

// Without a process table only the TTL expires a lock
#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive hold on a schedule file. Dropping the guard deletes the lock file.
#[derive(Debug)]
pub struct FileLock {
    schedule_path: PathBuf,
    lock_path: PathBuf,
    // Keeps the OS lock alive
    _file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Lock `path` for `user_id`.
    ///
    /// Fails with `FILE_LOCKED` while another live holder has it; stale
    /// locks are taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> DesignResult<Self> {
        let lock_path = lock_path_for(path);

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(DesignError::file_locked(
                    path.display().to_string(),
                    existing.holder(),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            tracing::info!(path = %lock_path.display(), holder = %existing.holder(), "taking over stale lock");
        }

        let io_err = |op: &str, e: std::io::Error| DesignError::file_error(op, lock_path.display().to_string(), e.to_string());
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| io_err("create lock", e))?;
        file.try_lock_exclusive()
            .map_err(|_| DesignError::file_locked(path.display().to_string(), "another process", "unknown"))?;
        file.set_len(0).map_err(|e| io_err("truncate lock", e))?;

        let info = LockInfo::new(user_id);
        let body = serde_json::to_vec_pretty(&info).map_err(|e| DesignError::serialization(e.to_string()))?;
        file.write_all(&body).map_err(|e| io_err("write lock", e))?;
        file.sync_all().map_err(|e| io_err("sync lock", e))?;

        tracing::debug!(path = %path.display(), user = %info.user_id, "schedule lock acquired");

        Ok(FileLock {
            schedule_path: path.to_path_buf(),
            lock_path,
            _file: file,
            info,
        })
    }

    /// Live lock on `path`, if any
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn schedule_path(&self) -> &Path {
        &self.schedule_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            tracing::warn!(path = %self.lock_path.display(), error = %e, "could not remove lock file");
        }
    }
}

/// `job.sds` locks as `job.sds.lock`
fn lock_path_for(schedule_path: &Path) -> PathBuf {
    let mut name = schedule_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Unreadable or malformed lock files count as absent
fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn read_to_string(path: &Path, operation: &str) -> DesignResult<String> {
    fs::read_to_string(path).map_err(|e| DesignError::file_error(operation, path.display().to_string(), e.to_string()))
}

/// Save a schedule with atomic write semantics.
///
/// Serializes to JSON, writes `<path>.tmp`, syncs it to disk and renames it
/// over `path`.
pub fn save_schedule(schedule: &DesignSchedule, path: &Path) -> DesignResult<()> {
    let json = serde_json::to_string_pretty(schedule).map_err(|e| DesignError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension("sds.tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| DesignError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| DesignError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .sync_all()
        .map_err(|e| DesignError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DesignError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), items = schedule.item_count(), "schedule saved");
    Ok(())
}

/// Load a schedule and check its schema version.
pub fn load_schedule(path: &Path) -> DesignResult<DesignSchedule> {
    let contents = read_to_string(path, "open")?;

    let schedule: DesignSchedule = serde_json::from_str(&contents)
        .map_err(|e| DesignError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&schedule.meta.version)?;

    tracing::info!(path = %path.display(), items = schedule.item_count(), "schedule loaded");
    Ok(schedule)
}

/// Load a schedule together with the live lock held on it, if any.
pub fn load_schedule_with_lock_check(path: &Path) -> DesignResult<(DesignSchedule, Option<LockInfo>)> {
    let schedule = load_schedule(path)?;
    let lock_info = FileLock::check(path);
    Ok((schedule, lock_info))
}

/// The major version must match; in 0.x a newer minor version is rejected.
fn validate_version(file_version: &str) -> DesignResult<()> {
    let mismatch = || DesignError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamMap;
    use crate::schedule::{EntityKind, ScheduleItem};
    use std::env::temp_dir;

    fn temp_schedule_path(name: &str) -> PathBuf {
        temp_dir().join(format!("steel_core_test_{}_{}.sds", name, std::process::id()))
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/jobs/25-001/connections.sds"));
        assert_eq!(lock_path, Path::new("/jobs/25-001/connections.sds.lock"));
    }

    #[test]
    fn test_lock_info_staleness() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(!info.is_stale());

        let expired = LockInfo {
            locked_at: Utc::now() - Duration::hours(LOCK_TTL_HOURS + 1),
            ..info
        };
        assert!(expired.is_stale());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_schedule_path("roundtrip");

        let mut schedule = DesignSchedule::new("Test Engineer", "TEST-001", "Roundtrip");
        schedule.settings.sig_figs = Some(4);
        let id = schedule.add_item(ScheduleItem::new("W-1", EntityKind::Weld, ParamMap::new().with("t_w", 8.0)));
        save_schedule(&schedule, &path).unwrap();

        let loaded = load_schedule(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.settings.sig_figs, Some(4));
        assert_eq!(loaded.get_item(&id), schedule.get_item(&id));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_schedule_path("atomic");
        let tmp_path = path.with_extension("sds.tmp");

        save_schedule(&DesignSchedule::default(), &path).unwrap();
        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_schedule_path("lock");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        assert_eq!(FileLock::check(&path).map(|i| i.pid), Some(std::process::id()));
        assert_eq!(
            FileLock::acquire(&path, "other@example.com").unwrap_err().error_code(),
            "FILE_LOCKED"
        );

        drop(lock);
        assert!(!lock_path.exists());
        assert!(FileLock::check(&path).is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        let err = validate_version("draft").unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let path = temp_schedule_path("invalid");
        fs::write(&path, "{ not a schedule").unwrap();
        let err = load_schedule(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_schedule_path("lock_check");
        save_schedule(&DesignSchedule::new("Test", "TEST", "Lock check"), &path).unwrap();

        let (loaded, lock_info) = load_schedule_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }
}
