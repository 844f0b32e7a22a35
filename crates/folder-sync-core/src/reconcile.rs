use crate::inventory::{InventoryEntry, LocalAttrs, RemoteAttrs, SyncStatus};
use std::collections::{HashMap, HashSet};

/// Merge the local and Mega inventories into one fully-classified report.
///
/// Both maps are keyed by normalized logical path with at most one entry per
/// path; that is the collectors' contract, not a condition handled here.
/// The result covers the union of both keyspaces, with every observed path
/// appearing exactly once, and is sorted ascending by name with plain byte
/// ordering, so the output is identical no matter how the input maps happen
/// to iterate.
pub fn merge_inventories(
    local: &HashMap<String, LocalAttrs>,
    remote: &HashMap<String, RemoteAttrs>,
) -> Vec<InventoryEntry> {
    let all_keys: HashSet<&String> = local.keys().chain(remote.keys()).collect();

    let mut merged: Vec<InventoryEntry> = all_keys
        .into_iter()
        .map(|name| {
            let local_attrs = local.get(name).cloned();
            let remote_attrs = remote.get(name).cloned();
            let status = classify(local_attrs.as_ref(), remote_attrs.as_ref());
            InventoryEntry {
                name: name.clone(),
                local: local_attrs,
                remote: remote_attrs,
                status,
            }
        })
        .collect();

    merged.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}

/// Status is a pure function of which sides are present and, when both are,
/// of size and path-type equality. The size check takes precedence: a pair
/// differing in both size and type reports `DifferentSize`. Folder size is
/// always 0, so a folder-vs-file pair with matching sizes still lands on
/// `DifferentType`. Timestamps never participate.
fn classify(local: Option<&LocalAttrs>, remote: Option<&RemoteAttrs>) -> SyncStatus {
    match (local, remote) {
        (Some(_), None) => SyncStatus::LocalOnly,
        (None, Some(_)) => SyncStatus::MegaOnly,
        (Some(local), Some(remote)) => {
            if local.size != remote.size {
                SyncStatus::DifferentSize
            } else if local.path_type != remote.path_type {
                SyncStatus::DifferentType
            } else {
                SyncStatus::Synced
            }
        }
        (None, None) => unreachable!("key taken from the union of both maps"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::PathType;
    use chrono::DateTime;

    fn local(size: u64, path_type: PathType) -> LocalAttrs {
        LocalAttrs {
            label: "backup".to_string(),
            path_type,
            full_path: "/data/backup/x".to_string(),
            size,
            modified: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn remote(size: u64, path_type: PathType) -> RemoteAttrs {
        RemoteAttrs {
            account: "user@example.com".to_string(),
            path_type,
            full_path: "/Cloud Drive/x".to_string(),
            size,
            modified: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            shared: crate::inventory::SharedStatus::NotShared,
            link: String::new(),
        }
    }

    #[test]
    fn test_classify_single_side() {
        assert_eq!(
            classify(Some(&local(5, PathType::File)), None),
            SyncStatus::LocalOnly
        );
        assert_eq!(
            classify(None, Some(&remote(5, PathType::File))),
            SyncStatus::MegaOnly
        );
    }

    #[test]
    fn test_classify_equal_size_and_type_is_synced() {
        assert_eq!(
            classify(
                Some(&local(5, PathType::File)),
                Some(&remote(5, PathType::File))
            ),
            SyncStatus::Synced
        );
    }

    #[test]
    fn test_classify_size_difference() {
        assert_eq!(
            classify(
                Some(&local(5, PathType::File)),
                Some(&remote(7, PathType::File))
            ),
            SyncStatus::DifferentSize
        );
    }

    #[test]
    fn test_classify_type_difference_with_equal_sizes() {
        // Folder size is defined as 0, so a 0-byte file collides on size.
        assert_eq!(
            classify(
                Some(&local(0, PathType::Folder)),
                Some(&remote(0, PathType::File))
            ),
            SyncStatus::DifferentType
        );
    }

    #[test]
    fn test_classify_size_check_takes_precedence_over_type() {
        assert_eq!(
            classify(
                Some(&local(0, PathType::Folder)),
                Some(&remote(7, PathType::File))
            ),
            SyncStatus::DifferentSize
        );
    }

    #[test]
    fn test_timestamps_do_not_affect_status() {
        let mut newer = remote(5, PathType::File);
        newer.modified = DateTime::from_timestamp(1_800_000_000, 0).unwrap();
        assert_eq!(
            classify(Some(&local(5, PathType::File)), Some(&newer)),
            SyncStatus::Synced
        );
    }

    #[test]
    fn test_merge_of_empty_inputs_is_empty() {
        let merged = merge_inventories(&HashMap::new(), &HashMap::new());
        assert!(merged.is_empty());
    }
}
