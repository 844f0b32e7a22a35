use crate::config::LocalFolder;
use crate::inventory::{LocalAttrs, PathType};
use crate::path;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use glob::Pattern;
use rayon::prelude::*;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::error;

/// Parallel directory traversal. Builds a map of logical name → local
/// attributes covering every file and folder under the root, filtering by
/// glob ignore patterns. Skips symlinks. Unreadable directories are logged
/// and skipped rather than aborting the walk.
pub fn build_local_inventory(
    folder: &LocalFolder,
    ignore_globs: &[String],
) -> io::Result<DashMap<String, LocalAttrs>> {
    let map: DashMap<String, LocalAttrs> = DashMap::new();

    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let root = Path::new(&folder.path);
    visit_dirs(root, root, folder.label(), &map, &ignore_patterns)?;

    Ok(map)
}

fn visit_dirs(
    dir: &Path,
    root: &Path,
    label: &str,
    map: &DashMap<String, LocalAttrs>,
    ignore_patterns: &[Pattern],
) -> io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    if ignore_patterns
        .iter()
        .any(|pattern| pattern.matches_path(dir))
    {
        return Ok(());
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            if err.kind() == io::ErrorKind::PermissionDenied {
                error!(
                    "Access denied reading directory {}: {}",
                    dir.display(),
                    err
                );
                return Ok(());
            } else {
                return Err(io::Error::new(
                    err.kind(),
                    format!("Error reading directory {}: {}", dir.display(), err),
                ));
            }
        }
    };

    entries.par_bridge().try_for_each(|entry_result| {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                return Err(io::Error::new(
                    err.kind(),
                    format!(
                        "Error reading entry in directory {}: {}",
                        dir.display(),
                        err
                    ),
                ));
            }
        };

        let entry_path = entry.path();
        let metadata = match fs::symlink_metadata(&entry_path) {
            Ok(metadata) => metadata,
            Err(err) => {
                error!(
                    "Error getting metadata for {}: {}",
                    entry_path.display(),
                    err
                );
                return Ok(());
            }
        };

        if metadata.file_type().is_symlink() {
            return Ok(());
        }

        if ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(&entry_path))
        {
            return Ok(());
        }

        if metadata.is_dir() {
            record(&entry_path, root, label, PathType::Folder, 0, &metadata, map);
            visit_dirs(&entry_path, root, label, map, ignore_patterns)?;
        } else {
            record(
                &entry_path,
                root,
                label,
                PathType::File,
                metadata.len(),
                &metadata,
                map,
            );
        }
        Ok(())
    })?;

    Ok(())
}

/// Insert one item under its normalized logical name. The root itself
/// reduces to an empty name and is never recorded.
fn record(
    item: &Path,
    root: &Path,
    label: &str,
    path_type: PathType,
    size: u64,
    metadata: &Metadata,
    map: &DashMap<String, LocalAttrs>,
) {
    let relative = item.strip_prefix(root).unwrap_or(item);
    let name = path::normalize(&relative.to_string_lossy());
    if name.is_empty() {
        return;
    }

    // Whole-second resolution; timestamps are informational only.
    let modified = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| DateTime::from_timestamp(d.as_secs() as i64, 0))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    map.insert(
        name,
        LocalAttrs {
            label: label.to_string(),
            path_type,
            full_path: item.to_string_lossy().into_owned(),
            size,
            modified,
        },
    );
}
