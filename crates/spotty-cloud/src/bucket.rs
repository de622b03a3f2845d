//! Project bucket provisioning.
//!
//! Same uniqueness discipline as the resolver, plus a creation side effect:
//! the project bucket is found by its deterministic prefix and region
//! suffix, created with a fresh random token when absent, reused silently
//! when present, and rejected when the account somehow holds several.

use crate::error::{CloudError, ResourceKind, Result};
use crate::provider::{BucketAcl, Inventory, OutputWriter};
use rand::Rng;

const TOKEN_LEN: usize = 12;

/// Deterministic bucket name prefix for a project.
pub fn bucket_prefix(project_name: &str) -> String {
    format!("spotty-{}", project_name.to_lowercase())
}

fn random_token(len: usize) -> String {
    // S3 bucket names are lowercase; stick to a-z0-9.
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

fn bucket_name(prefix: &str, token: &str, region: &str) -> String {
    [prefix, token, region].join("-")
}

/// Ensure the project bucket for this region exists and return its name.
pub async fn ensure_project_bucket(
    inventory: &dyn Inventory,
    output: &dyn OutputWriter,
    project_name: &str,
    region: &str,
) -> Result<String> {
    let prefix = bucket_prefix(project_name);

    let matches: Vec<String> = inventory
        .list_buckets()
        .await?
        .into_iter()
        .filter(|name| name.starts_with(&prefix) && name.ends_with(region))
        .collect();

    match matches.as_slice() {
        [] => {
            let name = bucket_name(&prefix, &random_token(TOKEN_LEN), region);
            inventory.create_bucket(&name, BucketAcl::Private).await?;
            tracing::info!(bucket = %name, region = %region, "Created project bucket");
            output.write(&format!("Bucket \"{}\" was created.", name));
            Ok(name)
        }
        [existing] => Ok(existing.clone()),
        _ => Err(CloudError::AmbiguousResource {
            kind: ResourceKind::Bucket,
            filter: prefix,
        }),
    }
}
