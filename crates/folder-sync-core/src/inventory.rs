use chrono::{DateTime, Utc};

/// Kind of filesystem item a side reported for a path.
///
/// `Unknown` is the default sentinel and never appears inside a populated
/// side; it renders as an empty cell in the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathType {
    #[default]
    Unknown,
    File,
    Folder,
}

/// Whether a remote item is exposed through a public share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharedStatus {
    #[default]
    Unknown,
    NotShared,
    Shared,
}

/// Classification of one logical path after merging both inventories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    LocalOnly,
    MegaOnly,
    Synced,
    DifferentSize,
    DifferentType,
}

impl SyncStatus {
    /// Report literal. Downstream consumers match on these exact strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::LocalOnly => "Local only",
            SyncStatus::MegaOnly => "Mega only",
            SyncStatus::Synced => "Synced",
            SyncStatus::DifferentSize => "Different size",
            SyncStatus::DifferentType => "Different type",
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local-side attributes of an inventory entry. The scanner populates all of
/// these together; a path with no local match carries `None` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalAttrs {
    pub label: String,
    pub path_type: PathType,
    pub full_path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Remote-side attributes of an inventory entry. `link` is the public share
/// URL, empty when the item is not shared or the link cannot be determined
/// (always empty for folders).
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteAttrs {
    pub account: String,
    pub path_type: PathType,
    pub full_path: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub shared: SharedStatus,
    pub link: String,
}

/// One fully-classified row of the reconciliation report, keyed by the
/// normalized logical path. Entries are built fresh per run and discarded
/// after export.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    pub name: String,
    pub local: Option<LocalAttrs>,
    pub remote: Option<RemoteAttrs>,
    pub status: SyncStatus,
}
