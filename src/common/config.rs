//! Configuration for the rendezkv index server

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Index server configuration
///
/// The volume set, replica count and subvolume count are fixed for the
/// lifetime of the process; changing the volume set invalidates existing
/// mappings and is not reconciled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Bind address for the HTTP API
    pub bind_addr: SocketAddr,

    /// RocksDB path for the key → volume mapping
    pub db_path: PathBuf,

    /// Volume server addresses (host:port)
    pub volumes: Vec<String>,

    /// Number of replica targets computed per key
    #[serde(default = "default_replicas")]
    pub replicas: usize,

    /// Number of subvolume partitions per volume server
    #[serde(default = "default_subvolumes")]
    pub subvolumes: u32,
}

fn default_replicas() -> usize {
    3
}
fn default_subvolumes() -> u32 {
    10
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".parse().unwrap(),
            db_path: PathBuf::from("./index-data"),
            volumes: Vec::new(),
            replicas: default_replicas(),
            subvolumes: default_subvolumes(),
        }
    }
}

impl IndexConfig {
    /// Validate startup preconditions.
    ///
    /// Placement configuration errors surface here, once, never per-request.
    pub fn validate(&self) -> crate::Result<()> {
        if self.volumes.is_empty() {
            return Err(crate::Error::NoVolumes);
        }
        if self.replicas == 0 {
            return Err(crate::Error::InvalidConfig(
                "replicas must be at least 1".into(),
            ));
        }
        if self.replicas > self.volumes.len() {
            return Err(crate::Error::InsufficientReplicas {
                needed: self.replicas,
                available: self.volumes.len(),
            });
        }
        if self.subvolumes == 0 {
            return Err(crate::Error::InvalidConfig(
                "subvolumes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(volumes: &[&str], replicas: usize, subvolumes: u32) -> IndexConfig {
        IndexConfig {
            volumes: volumes.iter().map(|v| v.to_string()).collect(),
            replicas,
            subvolumes,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config_with(&["v1", "v2", "v3"], 3, 10).validate().is_ok());
        assert!(config_with(&["v1"], 1, 1).validate().is_ok());
    }

    #[test]
    fn test_no_volumes() {
        assert!(config_with(&[], 1, 1).validate().is_err());
    }

    #[test]
    fn test_replicas_exceed_volumes() {
        let err = config_with(&["v1", "v2"], 3, 10).validate().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InsufficientReplicas {
                needed: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_zero_counts_rejected() {
        assert!(config_with(&["v1"], 0, 10).validate().is_err());
        assert!(config_with(&["v1"], 1, 0).validate().is_err());
    }
}
