//! Template assembly.
//!
//! Pure transformation of the base template from the user configuration and
//! the already-resolved external state. Mutation order matters: the key-pair
//! removal must happen before the parameter list is built, and the snapshot
//! binding decides whether a size is mandatory.

use crate::error::{CloudError, Result};
use crate::provider::{OutputWriter, Parameter, Snapshot};
use crate::template::Template;
use spotty_core::SpottyConfig;
use std::collections::BTreeSet;

/// External state resolved ahead of assembly. Resolution failures
/// (ambiguity, missing default network) have already been raised by then.
#[derive(Debug, Clone)]
pub struct ResolvedInputs {
    pub image_id: String,
    pub snapshot: Option<Snapshot>,
    pub network_id: String,
    pub bucket_name: String,
}

/// Assemble the final template and its ordered parameter list.
pub fn assemble(
    mut template: Template,
    config: &SpottyConfig,
    resolved: &ResolvedInputs,
    output: &dyn OutputWriter,
) -> Result<(Template, Vec<Parameter>)> {
    let instance = &config.instance;
    let volume = &instance.volume;

    // Key pair: declaration and launch-spec reference go together.
    if instance.key_name().is_none() {
        template.remove_key_pair()?;
    }

    // Volume seeding and size constraints.
    match &resolved.snapshot {
        None => {
            if volume.size.is_none() {
                return Err(CloudError::MissingVolumeSize {
                    snapshot_name: volume.snapshot_name.clone(),
                });
            }
        }
        Some(snapshot) => {
            template.bind_volume_snapshot(&snapshot.id)?;

            // The volume is re-snapshotted under the same name when the
            // stack goes away, so the source snapshot becomes redundant
            // and is scheduled for deletion.
            if !volume.delete_on_termination {
                template.bind_delete_snapshot(&snapshot.id)?;
            }

            if let Some(size) = volume.size {
                if size < snapshot.size_gb {
                    return Err(CloudError::VolumeTooSmall {
                        requested: size,
                        snapshot: snapshot.size_gb,
                    });
                }
                if size > snapshot.size_gb {
                    output.write(&format!(
                        "Size of the volume will be increased from {}GB to {}GB.",
                        snapshot.size_gb, size
                    ));
                }
            }
        }
    }

    if let Some(size) = volume.size {
        template.set_volume_size(size)?;
    }

    if volume.delete_on_termination {
        template.set_volume_deletion_policy_delete()?;
    }

    template.tag_volume(&volume.snapshot_name)?;

    // Ingress rules. The set drops duplicate config entries; 22 is already
    // in the base template.
    let ports: BTreeSet<u16> = instance.ports.iter().copied().collect();
    for port in ports {
        if port != 22 {
            template.add_ingress_port(port)?;
        }
    }

    let docker = &instance.docker;
    let mut parameters = vec![
        Parameter::new("VpcId", &resolved.network_id),
        Parameter::new("InstanceType", &instance.instance_type),
        Parameter::new("ImageId", &resolved.image_id),
        Parameter::new(
            "VolumeMountDirectory",
            volume.directory.as_deref().unwrap_or(""),
        ),
        Parameter::new(
            "DockerDataRootDirectory",
            docker.data_root.as_deref().unwrap_or(""),
        ),
        Parameter::new("DockerImage", docker.image.as_deref().unwrap_or("")),
        Parameter::new("DockerfilePath", docker.file.as_deref().unwrap_or("")),
        Parameter::new("ProjectS3Bucket", &resolved.bucket_name),
        Parameter::new("ProjectDirectory", config.project.remote_dir_trimmed()),
    ];
    if let Some(key_name) = instance.key_name() {
        parameters.push(Parameter::new("KeyName", key_name));
    }

    template.validate()?;
    Ok((template, parameters))
}
