use crate::error::Error;
use crate::inventory::{InventoryEntry, PathType, SharedStatus};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Report columns, in the order downstream tooling depends on. This order
/// is stable across versions.
pub const REPORT_FIELDS: [&str; 14] = [
    "name",
    "local_label",
    "local_path_type",
    "local_full_path",
    "local_size",
    "local_date",
    "mega_account",
    "mega_path_type",
    "mega_full_path",
    "mega_size",
    "mega_date",
    "mega_shared",
    "mega_link",
    "status",
];

/// Write the reconciled report as semicolon-delimited CSV, one row per
/// entry. An absent side renders as empty cells for all its columns.
pub fn write_csv(entries: &[InventoryEntry], output: &Path) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(output)?;

    writer.write_record(REPORT_FIELDS)?;
    for entry in entries {
        writer.write_record(entry_record(entry))?;
    }
    writer.flush()?;

    Ok(())
}

fn entry_record(entry: &InventoryEntry) -> Vec<String> {
    let mut record = Vec::with_capacity(REPORT_FIELDS.len());
    record.push(entry.name.clone());

    match &entry.local {
        Some(local) => {
            record.push(local.label.clone());
            record.push(path_type_cell(local.path_type).to_string());
            record.push(local.full_path.clone());
            record.push(local.size.to_string());
            record.push(date_cell(&local.modified));
        }
        None => record.extend(std::iter::repeat(String::new()).take(5)),
    }

    match &entry.remote {
        Some(remote) => {
            record.push(remote.account.clone());
            record.push(path_type_cell(remote.path_type).to_string());
            record.push(remote.full_path.clone());
            record.push(remote.size.to_string());
            record.push(date_cell(&remote.modified));
            record.push(shared_cell(remote.shared).to_string());
            record.push(remote.link.clone());
        }
        None => record.extend(std::iter::repeat(String::new()).take(7)),
    }

    record.push(entry.status.to_string());
    record
}

// Presentation of the sentinel enums lives here, not on the types; the
// `Unknown` defaults render as empty cells.

fn path_type_cell(path_type: PathType) -> &'static str {
    match path_type {
        PathType::Unknown => "",
        PathType::File => "FILE",
        PathType::Folder => "FOLDER",
    }
}

fn shared_cell(shared: SharedStatus) -> &'static str {
    match shared {
        SharedStatus::Unknown => "",
        SharedStatus::NotShared => "NOT_SHARED",
        SharedStatus::Shared => "SHARED",
    }
}

fn date_cell(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{LocalAttrs, RemoteAttrs, SyncStatus};
    use std::fs;

    fn local_entry(name: &str) -> InventoryEntry {
        InventoryEntry {
            name: name.to_string(),
            local: Some(LocalAttrs {
                label: "backup".to_string(),
                path_type: PathType::File,
                full_path: format!("/data/{}", name),
                size: 10,
                modified: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            }),
            remote: None,
            status: SyncStatus::LocalOnly,
        }
    }

    fn remote_entry(name: &str) -> InventoryEntry {
        InventoryEntry {
            name: name.to_string(),
            local: None,
            remote: Some(RemoteAttrs {
                account: "user@example.com".to_string(),
                path_type: PathType::Folder,
                full_path: format!("//{}", name),
                size: 0,
                modified: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
                shared: SharedStatus::NotShared,
                link: String::new(),
            }),
            status: SyncStatus::MegaOnly,
        }
    }

    #[test]
    fn test_csv_header_and_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("report.csv");

        write_csv(&[local_entry("a.txt"), remote_entry("b")], &output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), REPORT_FIELDS.join(";"));

        let local_row = lines.next().unwrap();
        assert_eq!(
            local_row,
            "a.txt;backup;FILE;/data/a.txt;10;2023-11-14 22:13:20;;;;;;;;Local only"
        );

        let remote_row = lines.next().unwrap();
        assert_eq!(
            remote_row,
            "b;;;;;;user@example.com;FOLDER;//b;0;2023-11-14 22:13:20;NOT_SHARED;;Mega only"
        );

        assert!(lines.next().is_none());
    }

    #[test]
    fn test_unknown_sentinels_render_empty() {
        assert_eq!(path_type_cell(PathType::Unknown), "");
        assert_eq!(shared_cell(SharedStatus::Unknown), "");
    }
}
