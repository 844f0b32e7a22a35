use crate::inventory::{PathType, RemoteAttrs, SharedStatus};
use crate::path;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

const SHARE_LINK_BASE: &str = "https://mega.nz";

/// Placeholder segment used when a parent chain cannot be followed.
const BROKEN_CHAIN_SEGMENT: &str = "???";

/// Node kinds as reported by the `t` field of the file listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
    CloudDrive,
    Inbox,
    RubbishBin,
    Other,
}

impl From<u8> for NodeKind {
    fn from(raw: u8) -> Self {
        match raw {
            0 => NodeKind::File,
            1 => NodeKind::Folder,
            2 => NodeKind::CloudDrive,
            3 => NodeKind::Inbox,
            4 => NodeKind::RubbishBin,
            _ => NodeKind::Other,
        }
    }
}

/// Decoded attribute payload of a node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeAttrs {
    #[serde(rename = "n", default)]
    pub name: String,
}

/// One node of a Mega file listing, keyed by its handle in the node table.
/// Container nodes (cloud drive root, inbox, rubbish bin) carry no
/// attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteNode {
    #[serde(rename = "h")]
    pub handle: String,
    #[serde(rename = "p", default)]
    pub parent: String,
    #[serde(rename = "t")]
    pub kind_raw: u8,
    #[serde(rename = "a", default)]
    pub attrs: Option<NodeAttrs>,
    #[serde(rename = "s", default)]
    pub size: u64,
    #[serde(rename = "ts", default)]
    pub timestamp: i64,
    #[serde(rename = "shared", default)]
    pub public_handle: Option<String>,
    #[serde(rename = "k", default)]
    pub key: Option<String>,
}

impl RemoteNode {
    pub fn kind(&self) -> NodeKind {
        NodeKind::from(self.kind_raw)
    }

    fn name(&self) -> &str {
        self.attrs.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }
}

/// Resolve a node's full remote path by walking parent handles up to a root
/// container, concatenating names leaf to root and reversing.
///
/// A chain that passes through the rubbish bin resolves to the empty string;
/// the caller drops such nodes entirely. A missing parent handle ends the
/// walk with literal `???/???` placeholder segments instead of failing the
/// whole listing, and a handle seen twice (malformed parent cycle) is
/// treated the same way, so the walk always terminates.
pub fn resolve_node_path(handle: &str, nodes: &HashMap<String, RemoteNode>) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut cursor = handle;

    while !cursor.is_empty() {
        if !seen.insert(cursor) {
            segments.push(BROKEN_CHAIN_SEGMENT);
            break;
        }
        let Some(node) = nodes.get(cursor) else {
            segments.push(BROKEN_CHAIN_SEGMENT);
            segments.push(BROKEN_CHAIN_SEGMENT);
            break;
        };
        if node.kind() == NodeKind::RubbishBin {
            return String::new();
        }
        segments.push(node.name());
        cursor = &node.parent;
    }

    segments.reverse();
    format!("/{}", segments.join("/"))
}

/// Build the `name → RemoteAttrs` mapping for one account from its node
/// table, keeping only files and folders whose resolved path lies under
/// `subtree` (case-insensitive prefix, stripped from the logical name).
pub fn build_remote_inventory(
    account: &str,
    nodes: &HashMap<String, RemoteNode>,
    subtree: &str,
) -> HashMap<String, RemoteAttrs> {
    let subtree = subtree.trim_start_matches(['/', '\\']);
    let subtree_lower = subtree.to_lowercase();

    let mut inventory = HashMap::new();

    for node in nodes.values() {
        let path_type = match node.kind() {
            NodeKind::File => PathType::File,
            NodeKind::Folder => PathType::Folder,
            _ => continue,
        };

        let full_path = resolve_node_path(&node.handle, nodes);
        if full_path.is_empty() {
            continue;
        }

        // Drop the leading slash and the root container segment; what
        // remains is the path inside the cloud drive.
        let in_drive = full_path
            .split('/')
            .skip(2)
            .collect::<Vec<_>>()
            .join("/");
        if !in_drive.to_lowercase().starts_with(&subtree_lower) {
            continue;
        }
        let name = path::normalize(in_drive.get(subtree.len()..).unwrap_or(""));
        if name.is_empty() {
            continue;
        }

        let size = match path_type {
            PathType::File => node.size,
            _ => 0,
        };
        let modified = DateTime::from_timestamp(node.timestamp, 0)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        let (shared, link) = match (&node.public_handle, &node.key) {
            (Some(handle), Some(key)) if path_type == PathType::File => (
                SharedStatus::Shared,
                format!("{}/#!{}!{}", SHARE_LINK_BASE, handle, key),
            ),
            // Shared folder links need a folder key we cannot determine.
            (Some(_), _) => (SharedStatus::Shared, String::new()),
            _ => (SharedStatus::NotShared, String::new()),
        };

        inventory.insert(
            name,
            RemoteAttrs {
                account: account.to_string(),
                path_type,
                full_path,
                size,
                modified,
                shared,
                link,
            },
        );
    }

    inventory
}
