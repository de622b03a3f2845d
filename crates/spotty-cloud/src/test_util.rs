//! In-memory collaborator fakes shared by the unit tests.

use crate::error::Result;
use crate::provider::{
    BucketAcl, Clock, FileSync, Image, Inventory, Network, OutputWriter, Provisioner, Snapshot,
    StackRequest, StackStatus, TemplateStore,
};
use crate::template::Template;
use async_trait::async_trait;
use spotty_core::{
    DockerConfig, InstanceConfig, ProjectConfig, SpottyConfig, SyncFilter, VolumeSpec,
};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Structurally faithful miniature of the shipped base template.
pub const TEST_TEMPLATE: &str = r#"
Parameters:
  VpcId: { Type: String }
  InstanceType: { Type: String }
  ImageId: { Type: String }
  VolumeMountDirectory: { Type: String, Default: '' }
  DockerDataRootDirectory: { Type: String, Default: '' }
  DockerImage: { Type: String, Default: '' }
  DockerfilePath: { Type: String, Default: '' }
  ProjectS3Bucket: { Type: String }
  ProjectDirectory: { Type: String }
  KeyName: { Type: 'AWS::EC2::KeyPair::KeyName' }
Resources:
  InstanceSecurityGroup:
    Type: 'AWS::EC2::SecurityGroup'
    Properties:
      GroupDescription: Spotty instance security group
      SecurityGroupIngress:
        - { CidrIp: 0.0.0.0/0, IpProtocol: tcp, FromPort: 22, ToPort: 22 }
        - { CidrIpv6: '::/0', IpProtocol: tcp, FromPort: 22, ToPort: 22 }
  Volume1:
    Type: 'AWS::EC2::Volume'
    DeletionPolicy: Retain
    Properties:
      AvailabilityZone: eu-west-1a
  DeleteSnapshot:
    Type: 'Custom::SnapshotDeletion'
    Properties:
      ServiceToken: 'arn:aws:lambda:::function:fake'
  SpotFleet:
    Type: 'AWS::EC2::SpotFleet'
    Properties:
      SpotFleetRequestConfigData:
        TargetCapacity: 1
        LaunchSpecifications:
          - ImageId: { Ref: ImageId }
            InstanceType: { Ref: InstanceType }
            KeyName: { Ref: KeyName }
Outputs:
  InstanceIpAddress:
    Value: placeholder
"#;

/// Config matching the mock inventory defaults.
pub fn sample_config() -> SpottyConfig {
    SpottyConfig {
        project: ProjectConfig {
            name: "demo".to_string(),
            remote_dir: "/workspace/demo/".to_string(),
            sync_filters: Vec::new(),
        },
        instance: InstanceConfig {
            region: "eu-west-1".to_string(),
            instance_type: "p2.xlarge".to_string(),
            key_name: Some("spotty-key".to_string()),
            ami_name: "SpottyAMI".to_string(),
            ports: vec![8888, 6006],
            docker: DockerConfig {
                image: Some("tensorflow/tensorflow:latest-gpu".to_string()),
                file: None,
                data_root: None,
            },
            volume: VolumeSpec {
                snapshot_name: "demo-data".to_string(),
                size: Some(100),
                directory: Some("/workspace".to_string()),
                delete_on_termination: false,
            },
        },
    }
}

#[derive(Default)]
pub struct MockInventory {
    images: Vec<Image>,
    snapshots: Vec<Snapshot>,
    networks: Vec<Network>,
    buckets: Mutex<Vec<String>>,
    created: Mutex<Vec<String>>,
}

impl MockInventory {
    pub fn with_image(mut self, id: &str, name: &str) -> Self {
        self.images.push(Image {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_snapshot(mut self, id: &str, size_gb: u32) -> Self {
        self.snapshots.push(Snapshot {
            id: id.to_string(),
            size_gb,
        });
        self
    }

    pub fn with_network(mut self, id: &str) -> Self {
        self.networks.push(Network { id: id.to_string() });
        self
    }

    pub fn with_bucket(self, name: &str) -> Self {
        self.buckets.lock().unwrap().push(name.to_string());
        self
    }

    pub fn created_buckets(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl Inventory for MockInventory {
    async fn list_images(&self, name: &str) -> Result<Vec<Image>> {
        Ok(self
            .images
            .iter()
            .filter(|image| image.name == name)
            .cloned()
            .collect())
    }

    async fn list_snapshots(&self, _name_tag: &str) -> Result<Vec<Snapshot>> {
        Ok(self.snapshots.clone())
    }

    async fn list_default_networks(&self) -> Result<Vec<Network>> {
        Ok(self.networks.clone())
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(self.buckets.lock().unwrap().clone())
    }

    async fn create_bucket(&self, name: &str, _acl: BucketAcl) -> Result<()> {
        self.buckets.lock().unwrap().push(name.to_string());
        self.created.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockProvisioner {
    existing_stack: bool,
    statuses: Mutex<VecDeque<(StackStatus, HashMap<String, String>)>>,
    created: Mutex<Vec<StackRequest>>,
}

impl MockProvisioner {
    pub fn with_existing_stack(mut self) -> Self {
        self.existing_stack = true;
        self
    }

    /// Queue a status observation. The final one repeats forever.
    pub fn with_status(self, status: StackStatus, outputs: HashMap<String, String>) -> Self {
        self.statuses.lock().unwrap().push_back((status, outputs));
        self
    }

    pub fn created(&self) -> Vec<StackRequest> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provisioner for MockProvisioner {
    async fn stack_exists(&self, _name: &str) -> Result<bool> {
        Ok(self.existing_stack)
    }

    async fn create_stack(&self, request: &StackRequest) -> Result<String> {
        self.created.lock().unwrap().push(request.clone());
        Ok("stack-1".to_string())
    }

    async fn stack_status(
        &self,
        _stack_id: &str,
    ) -> Result<(StackStatus, HashMap<String, String>)> {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            Ok(statuses.pop_front().expect("checked length"))
        } else {
            Ok(statuses.front().cloned().expect("status queue is empty"))
        }
    }
}

pub struct StaticTemplates {
    source: String,
}

impl Default for StaticTemplates {
    fn default() -> Self {
        Self {
            source: TEST_TEMPLATE.to_string(),
        }
    }
}

#[async_trait]
impl TemplateStore for StaticTemplates {
    async fn load_template(&self, _id: &str) -> Result<Template> {
        Template::from_yaml(&self.source)
    }
}

#[derive(Debug, Clone)]
pub struct SyncCall {
    pub local_dir: PathBuf,
    pub remote_uri: String,
    pub delete: bool,
    pub filters: Vec<SyncFilter>,
}

#[derive(Default)]
pub struct RecordingSync {
    calls: Mutex<Vec<SyncCall>>,
}

impl RecordingSync {
    pub fn calls(&self) -> Vec<SyncCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSync for RecordingSync {
    async fn sync(
        &self,
        local_dir: &Path,
        remote_uri: &str,
        delete: bool,
        filters: &[SyncFilter],
    ) -> Result<()> {
        self.calls.lock().unwrap().push(SyncCall {
            local_dir: local_dir.to_path_buf(),
            remote_uri: remote_uri.to_string(),
            delete,
            filters: filters.to_vec(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOutput {
    messages: Mutex<Vec<String>>,
}

impl RecordingOutput {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl OutputWriter for RecordingOutput {
    fn write(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct InstantClock {
    sleeps: AtomicUsize,
}

impl InstantClock {
    pub fn sleeps(&self) -> usize {
        self.sleeps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, _duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
    }
}
