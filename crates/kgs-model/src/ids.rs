#![deny(unsafe_code)]

use std::fmt;

use sha2::{Digest, Sha256};

use crate::ModelError;

/// Returns the uuid part of an instance id.
///
/// Knowledge graph ids are IRIs such as `https://kg.ebrains.eu/api/instances/<uuid>`;
/// the uuid is the last path segment. Ids without a `/` are returned unchanged.
pub fn instance_uuid(id: &str) -> &str {
    let trimmed = id.trim().trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// A deterministic hierarchy node key.
///
/// Derived from the uuid of the instance a node shows and the position of the node in the
/// emission order, so the same specimen shown in two branches gets two distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey([u8; 16]);

impl NodeKey {
    pub fn derive(instance_uuid: &str, sequence: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(instance_uuid.as_bytes());
        hasher.update(b"\0");
        hasher.update(sequence.to_be_bytes());
        let digest = hasher.finalize();
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let bytes = hex::decode(value).map_err(|_| ModelError::InvalidNodeKey(value.into()))?;
        if bytes.len() != 16 {
            return Err(ModelError::InvalidNodeKey(value.to_string()));
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl serde::Serialize for NodeKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for NodeKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
