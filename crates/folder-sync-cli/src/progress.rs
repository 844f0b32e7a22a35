use folder_sync_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI progress reporter using indicatif spinners.
///
/// Every phase has an unknown total up front (directory walk, remote
/// listing), so each one renders as a spinner with a running message.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }

    fn spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    }
}

impl ProgressReporter for CliReporter {
    fn on_local_scan_start(&self) {
        self.set_bar(Self::spinner("Scanning local folders...".to_string()));
    }

    fn on_local_scan_complete(&self, items: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Local scan complete: {} items in {:.2}s",
            items, duration_secs
        );
    }

    fn on_remote_list_start(&self, account: &str) {
        self.set_bar(Self::spinner(format!(
            "Listing Mega account {}...",
            account
        )));
    }

    fn on_remote_list_complete(&self, items: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Mega listing complete: {} items in {:.2}s",
            items, duration_secs
        );
    }

    fn on_merge_complete(&self, entries: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Merge complete: {} rows in {:.2}s",
            entries, duration_secs
        );
    }

    fn on_export_complete(&self, rows: usize, path: &str) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Report written: {} rows to {}",
            rows, path
        );
    }
}
