/// Trait for reporting pipeline progress.
///
/// The CLI implements this with indicatif spinners; tests run silent.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_local_scan_start(&self) {}
    fn on_local_scan_complete(&self, _items: usize, _duration_secs: f64) {}
    fn on_remote_list_start(&self, _account: &str) {}
    fn on_remote_list_complete(&self, _items: usize, _duration_secs: f64) {}
    fn on_merge_complete(&self, _entries: usize, _duration_secs: f64) {}
    fn on_export_complete(&self, _rows: usize, _path: &str) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
