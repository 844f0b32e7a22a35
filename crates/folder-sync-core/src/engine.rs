use crate::config::{self, AppConfig};
use crate::error::Error;
use crate::inventory::{InventoryEntry, LocalAttrs, RemoteAttrs};
use crate::progress::ProgressReporter;
use crate::reconcile;
use crate::remote;
use crate::scanner;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Orchestrates one reconciliation run over the configured folders and
/// accounts.
pub struct SyncEngine {
    config: AppConfig,
}

/// Outcome of a run: the fully-classified report plus phase accounting.
#[derive(Debug)]
pub struct SyncResult {
    pub local_duration: Duration,
    pub remote_duration: Duration,
    pub merge_duration: Duration,
    pub local_items: usize,
    pub remote_items: usize,
    pub entries: Vec<InventoryEntry>,
}

impl SyncEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the full reconciliation pipeline:
    /// 1. Walk the configured local folders (sequential, last wins on key collision)
    /// 2. List the configured Mega accounts (failures degrade to an empty side)
    /// 3. Merge both inventories into the sorted, classified report
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<SyncResult, Error> {
        let folders = config::non_overlapping_folders(self.config.local_folders.clone());

        reporter.on_local_scan_start();
        let local_start = Instant::now();
        let mut local: HashMap<String, LocalAttrs> = HashMap::new();
        for folder in &folders {
            info!("Scanning local folder \"{}\"...", folder.path);
            match scanner::build_local_inventory(folder, &self.config.ignore_patterns) {
                Ok(found) => {
                    // Later folders overwrite earlier ones on collision.
                    local.extend(found);
                    info!("Items found: {}", local.len());
                }
                Err(err) => {
                    error!("Can't scan \"{}\": {}", folder.path, err);
                }
            }
        }
        let local_duration = local_start.elapsed();
        reporter.on_local_scan_complete(local.len(), local_duration.as_secs_f64());

        let remote_start = Instant::now();
        let mut mega: HashMap<String, RemoteAttrs> = HashMap::new();
        for account in &self.config.mega_accounts {
            reporter.on_remote_list_start(&account.login);
            info!("Listing Mega account \"{}\"...", account.login);
            match remote::list_remote_inventory(account) {
                Ok(found) => {
                    mega.extend(found);
                    info!("Items found: {}", mega.len());
                }
                Err(err) => {
                    // The failed account contributes nothing; its paths
                    // surface as "Local only".
                    error!("Can't list Mega account \"{}\": {}", account.login, err);
                }
            }
        }
        let remote_duration = remote_start.elapsed();
        reporter.on_remote_list_complete(mega.len(), remote_duration.as_secs_f64());

        info!("Merging local and Mega inventories...");
        let merge_start = Instant::now();
        let local_items = local.len();
        let remote_items = mega.len();
        let entries = reconcile::merge_inventories(&local, &mega);
        let merge_duration = merge_start.elapsed();
        debug!(
            "Merge completed in {:.2}s — {} local, {} Mega, {} merged rows",
            merge_duration.as_secs_f64(),
            local_items,
            remote_items,
            entries.len(),
        );
        reporter.on_merge_complete(entries.len(), merge_duration.as_secs_f64());

        Ok(SyncResult {
            local_duration,
            remote_duration,
            merge_duration,
            local_items,
            remote_items,
            entries,
        })
    }
}
