//! Volume definition.

use serde::{Deserialize, Serialize};

/// Durable block-storage volume, optionally seeded from a prior snapshot.
///
/// Invariant (enforced at template assembly, when the snapshot lookup has
/// happened): if no snapshot named `snapshot_name` exists, `size` is
/// required; if both exist, `size` must be at least the snapshot size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSpec {
    /// Name tag of the snapshot to seed the volume from. Also becomes the
    /// Name tag of the new volume.
    pub snapshot_name: String,

    /// Volume size in GiB.
    #[serde(default)]
    pub size: Option<u32>,

    /// Mount point on the instance.
    #[serde(default)]
    pub directory: Option<String>,

    /// When true the volume is deleted together with the stack; when false
    /// (the default) it outlives the stack for reuse.
    #[serde(default)]
    pub delete_on_termination: bool,
}
