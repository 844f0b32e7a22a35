pub mod client;
pub mod nodes;

pub use client::MegaClient;
pub use nodes::{build_remote_inventory, resolve_node_path, NodeKind, RemoteNode};

use crate::config::MegaAccount;
use crate::error::Error;
use crate::inventory::RemoteAttrs;
use std::collections::HashMap;

/// Authenticate to one Mega account and build its `name → RemoteAttrs`
/// inventory, restricted to the account's configured subtree.
pub fn list_remote_inventory(
    account: &MegaAccount,
) -> Result<HashMap<String, RemoteAttrs>, Error> {
    let mut client = MegaClient::new();
    client.login(&account.login, &account.password)?;
    let nodes = client.fetch_nodes()?;
    Ok(build_remote_inventory(&account.login, &nodes, &account.path))
}
