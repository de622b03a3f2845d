//! Typed builder over the CloudFormation template tree.
//!
//! The template is loaded once, mutated only through the named accessors
//! below, and serialized exactly once before submission. The accessors pin
//! the handful of template locations the engine is allowed to touch; any
//! structural mismatch surfaces as `InvalidTemplate` instead of a silent
//! no-op.

use crate::error::{CloudError, Result};
use serde_yaml::{Mapping, Value};

// Well-known names in the base template.
const RESOURCE_SPOT_FLEET: &str = "SpotFleet";
const RESOURCE_VOLUME: &str = "Volume1";
const RESOURCE_DELETE_SNAPSHOT: &str = "DeleteSnapshot";
const RESOURCE_SECURITY_GROUP: &str = "InstanceSecurityGroup";
const PARAM_KEY_NAME: &str = "KeyName";

/// In-memory CloudFormation template.
#[derive(Debug, Clone)]
pub struct Template {
    root: Value,
}

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

fn ingress_rule(cidr_key: &str, cidr: &str, port: u16) -> Value {
    let mut rule = Mapping::new();
    rule.insert(key(cidr_key), Value::String(cidr.to_string()));
    rule.insert(key("IpProtocol"), Value::String("tcp".to_string()));
    rule.insert(key("FromPort"), Value::Number(port.into()));
    rule.insert(key("ToPort"), Value::Number(port.into()));
    Value::Mapping(rule)
}

impl Template {
    /// Parse a template from its YAML source. The tree must at least carry
    /// `Parameters` and `Resources` mappings.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(source)?;
        let template = Self { root };
        template.parameters()?;
        template.resources()?;
        Ok(template)
    }

    /// Serialize the assembled template for submission.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    fn parameters(&self) -> Result<&Mapping> {
        self.root
            .get("Parameters")
            .and_then(Value::as_mapping)
            .ok_or_else(|| CloudError::InvalidTemplate("missing 'Parameters' mapping".to_string()))
    }

    fn resources(&self) -> Result<&Mapping> {
        self.root
            .get("Resources")
            .and_then(Value::as_mapping)
            .ok_or_else(|| CloudError::InvalidTemplate("missing 'Resources' mapping".to_string()))
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.root
            .get("Parameters")
            .and_then(|params| params.get(name))
            .is_some()
    }

    fn resource_mut(&mut self, name: &str) -> Result<&mut Value> {
        self.root
            .get_mut("Resources")
            .and_then(|resources| resources.get_mut(name))
            .ok_or_else(|| CloudError::InvalidTemplate(format!("resource '{}' not found", name)))
    }

    fn resource_properties_mut(&mut self, name: &str) -> Result<&mut Mapping> {
        self.resource_mut(name)?
            .get_mut("Properties")
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| {
                CloudError::InvalidTemplate(format!("resource '{}' has no 'Properties'", name))
            })
    }

    fn launch_spec_mut(&mut self) -> Result<&mut Mapping> {
        self.resource_properties_mut(RESOURCE_SPOT_FLEET)?
            .get_mut(key("SpotFleetRequestConfigData"))
            .and_then(|config| config.get_mut("LaunchSpecifications"))
            .and_then(|specs| specs.get_mut(0))
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| {
                CloudError::InvalidTemplate("spot fleet launch specification not found".to_string())
            })
    }

    fn launch_spec_references_key_pair(&self) -> bool {
        self.root
            .get("Resources")
            .and_then(|r| r.get(RESOURCE_SPOT_FLEET))
            .and_then(|fleet| fleet.get("Properties"))
            .and_then(|props| props.get("SpotFleetRequestConfigData"))
            .and_then(|config| config.get("LaunchSpecifications"))
            .and_then(|specs| specs.get(0))
            .and_then(|spec| spec.get(PARAM_KEY_NAME))
            .is_some()
    }

    /// Drop the key-pair parameter declaration and its reference in the
    /// launch specification. Both must go together: the provider rejects
    /// templates referencing undeclared parameters.
    pub fn remove_key_pair(&mut self) -> Result<()> {
        if let Some(params) = self
            .root
            .get_mut("Parameters")
            .and_then(Value::as_mapping_mut)
        {
            params.remove(key(PARAM_KEY_NAME));
        }
        self.launch_spec_mut()?.remove(key(PARAM_KEY_NAME));
        Ok(())
    }

    /// Seed the volume from an existing snapshot.
    pub fn bind_volume_snapshot(&mut self, snapshot_id: &str) -> Result<()> {
        self.resource_properties_mut(RESOURCE_VOLUME)?
            .insert(key("SnapshotId"), Value::String(snapshot_id.to_string()));
        Ok(())
    }

    /// Point the snapshot-deletion resource at the source snapshot, so it
    /// is removed once the derived volume exists. The volume itself is
    /// re-snapshotted under the same name on stack deletion.
    pub fn bind_delete_snapshot(&mut self, snapshot_id: &str) -> Result<()> {
        self.resource_properties_mut(RESOURCE_DELETE_SNAPSHOT)?
            .insert(key("SnapshotId"), Value::String(snapshot_id.to_string()));
        Ok(())
    }

    pub fn set_volume_size(&mut self, size_gb: u32) -> Result<()> {
        self.resource_properties_mut(RESOURCE_VOLUME)?
            .insert(key("Size"), Value::Number(size_gb.into()));
        Ok(())
    }

    /// Tie the volume lifetime to the stack.
    pub fn set_volume_deletion_policy_delete(&mut self) -> Result<()> {
        self.resource_mut(RESOURCE_VOLUME)?
            .as_mapping_mut()
            .ok_or_else(|| {
                CloudError::InvalidTemplate(format!("resource '{}' is not a mapping", RESOURCE_VOLUME))
            })?
            .insert(key("DeletionPolicy"), Value::String("Delete".to_string()));
        Ok(())
    }

    /// Tag the volume with its logical (snapshot) name so a later run can
    /// discover it.
    pub fn tag_volume(&mut self, name: &str) -> Result<()> {
        let mut tag = Mapping::new();
        tag.insert(key("Key"), Value::String("Name".to_string()));
        tag.insert(key("Value"), Value::String(name.to_string()));

        self.resource_properties_mut(RESOURCE_VOLUME)?
            .insert(key("Tags"), Value::Sequence(vec![Value::Mapping(tag)]));
        Ok(())
    }

    /// Append an IPv4 + IPv6 ingress pair for a TCP port to the security
    /// group.
    pub fn add_ingress_port(&mut self, port: u16) -> Result<()> {
        let ingress = self
            .resource_properties_mut(RESOURCE_SECURITY_GROUP)?
            .get_mut(key("SecurityGroupIngress"))
            .and_then(Value::as_sequence_mut)
            .ok_or_else(|| {
                CloudError::InvalidTemplate(
                    "security group has no 'SecurityGroupIngress' list".to_string(),
                )
            })?;

        ingress.push(ingress_rule("CidrIp", "0.0.0.0/0", port));
        ingress.push(ingress_rule("CidrIpv6", "::/0", port));
        Ok(())
    }

    /// Count ingress rules matching a port, for tests and validation.
    pub fn ingress_rules_for_port(&self, port: u16) -> usize {
        self.root
            .get("Resources")
            .and_then(|r| r.get(RESOURCE_SECURITY_GROUP))
            .and_then(|sg| sg.get("Properties"))
            .and_then(|props| props.get("SecurityGroupIngress"))
            .and_then(Value::as_sequence)
            .map(|rules| {
                rules
                    .iter()
                    .filter(|rule| {
                        rule.get("FromPort").and_then(Value::as_u64) == Some(u64::from(port))
                    })
                    .count()
            })
            .unwrap_or(0)
    }

    /// Structural consistency check, run once at assembly completion.
    pub fn validate(&self) -> Result<()> {
        let declared = self.has_parameter(PARAM_KEY_NAME);
        let referenced = self.launch_spec_references_key_pair();
        if declared != referenced {
            return Err(CloudError::InvalidTemplate(format!(
                "key pair parameter declared={} but referenced={}",
                declared, referenced
            )));
        }
        Ok(())
    }

    /// Read access for tests: value at a `/`-separated path.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('/') {
            current = match segment.parse::<usize>() {
                Ok(index) => current.get(index)?,
                Err(_) => current.get(segment)?,
            };
        }
        Some(current)
    }
}
