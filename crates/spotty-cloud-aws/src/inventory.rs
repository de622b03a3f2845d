//! EC2 and S3 backed inventory.

use crate::AwsContext;
use async_trait::async_trait;
use aws_sdk_ec2::types::Filter;
use aws_sdk_s3::types::{BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration};
use spotty_cloud::{BucketAcl, CloudError, Image, Inventory, Network, Result, Snapshot};

/// Inventory over the EC2 and S3 APIs of a single region.
pub struct AwsInventory {
    ec2: aws_sdk_ec2::Client,
    s3: aws_sdk_s3::Client,
    region: String,
}

impl AwsInventory {
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            ec2: ctx.ec2_client(),
            s3: ctx.s3_client(),
            region: ctx.region().to_string(),
        }
    }
}

fn api_error(err: impl std::fmt::Display) -> CloudError {
    CloudError::Api(err.to_string())
}

#[async_trait]
impl Inventory for AwsInventory {
    async fn list_images(&self, name: &str) -> Result<Vec<Image>> {
        let response = self
            .ec2
            .describe_images()
            .filters(Filter::builder().name("name").values(name).build())
            .send()
            .await
            .map_err(api_error)?;

        let images = response
            .images()
            .iter()
            .filter_map(|image| {
                Some(Image {
                    id: image.image_id()?.to_string(),
                    name: image.name()?.to_string(),
                })
            })
            .collect();

        tracing::debug!(name = %name, "Listed images");
        Ok(images)
    }

    async fn list_snapshots(&self, name_tag: &str) -> Result<Vec<Snapshot>> {
        let response = self
            .ec2
            .describe_snapshots()
            .filters(Filter::builder().name("tag:Name").values(name_tag).build())
            .send()
            .await
            .map_err(api_error)?;

        let snapshots = response
            .snapshots()
            .iter()
            .filter_map(|snapshot| {
                Some(Snapshot {
                    id: snapshot.snapshot_id()?.to_string(),
                    size_gb: snapshot.volume_size()?.max(0) as u32,
                })
            })
            .collect();

        Ok(snapshots)
    }

    async fn list_default_networks(&self) -> Result<Vec<Network>> {
        let response = self
            .ec2
            .describe_vpcs()
            .filters(Filter::builder().name("isDefault").values("true").build())
            .send()
            .await
            .map_err(api_error)?;

        let networks = response
            .vpcs()
            .iter()
            .filter_map(|vpc| {
                Some(Network {
                    id: vpc.vpc_id()?.to_string(),
                })
            })
            .collect();

        Ok(networks)
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        let response = self.s3.list_buckets().send().await.map_err(api_error)?;

        Ok(response
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_string))
            .collect())
    }

    async fn create_bucket(&self, name: &str, acl: BucketAcl) -> Result<()> {
        let canned_acl = match acl {
            BucketAcl::Private => BucketCannedAcl::Private,
            BucketAcl::PublicRead => BucketCannedAcl::PublicRead,
        };

        let location = CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
            .build();

        self.s3
            .create_bucket()
            .bucket(name)
            .acl(canned_acl)
            .create_bucket_configuration(location)
            .send()
            .await
            .map_err(api_error)?;

        tracing::info!(bucket = %name, region = %self.region, "Created bucket");
        Ok(())
    }
}
