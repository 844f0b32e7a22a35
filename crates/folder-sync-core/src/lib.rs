pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod inventory;
pub mod path;
pub mod progress;
pub mod reconcile;
pub mod remote;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{SyncEngine, SyncResult};
pub use error::Error;
pub use inventory::{
    InventoryEntry, LocalAttrs, PathType, RemoteAttrs, SharedStatus, SyncStatus,
};
pub use progress::{ProgressReporter, SilentReporter};
