//! Resource resolution with uniqueness discipline.
//!
//! Every lookup follows the same contract: zero matches is reported to the
//! caller (who decides whether that is acceptable), exactly one match is
//! returned, and more than one match is always a fatal ambiguity, never
//! auto-disambiguated.

use crate::error::{CloudError, ResourceKind, Result};
use crate::provider::{Image, Inventory, Network, Snapshot};

fn unique<T>(mut matches: Vec<T>, kind: ResourceKind, filter: &str) -> Result<Option<T>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => Err(CloudError::AmbiguousResource {
            kind,
            filter: filter.to_string(),
        }),
    }
}

/// Resolve the AMI by name. `None` means "not found": the caller exits via
/// the guided path, not with an error.
pub async fn resolve_image(inventory: &dyn Inventory, ami_name: &str) -> Result<Option<Image>> {
    let images = inventory.list_images(ami_name).await?;
    unique(images, ResourceKind::Image, ami_name)
}

/// Resolve the snapshot by its Name tag. `None` is a valid outcome (a new
/// empty volume will be created) as long as the volume spec carries a size;
/// that constraint is enforced by the assembler.
pub async fn resolve_snapshot(
    inventory: &dyn Inventory,
    snapshot_name: &str,
) -> Result<Option<Snapshot>> {
    let snapshots = inventory.list_snapshots(snapshot_name).await?;
    unique(snapshots, ResourceKind::Snapshot, snapshot_name)
}

/// Resolve the region's default network. Absence is fatal: Spotty does not
/// create networks.
pub async fn resolve_default_network(inventory: &dyn Inventory) -> Result<Network> {
    let networks = inventory.list_default_networks().await?;
    unique(networks, ResourceKind::Network, "default")?.ok_or(CloudError::NoDefaultNetwork)
}
