use crate::errors::StoreError;
use crate::grant::DeviceGrant;

/// Converts a logical grant to and from its opaque stored payload.
///
/// Implementations must round-trip every field exactly, including subject
/// claims. Swappable so callers can wrap the payload, e.g. with encryption.
pub trait GrantSerializer: Send + Sync {
    fn serialize(&self, grant: &DeviceGrant) -> Result<String, StoreError>;
    fn deserialize(&self, data: &str) -> Result<DeviceGrant, StoreError>;
}

/// Default serializer, storing the grant as a JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonGrantSerializer;

impl GrantSerializer for JsonGrantSerializer {
    fn serialize(&self, grant: &DeviceGrant) -> Result<String, StoreError> {
        Ok(serde_json::to_string(grant)?)
    }

    fn deserialize(&self, data: &str) -> Result<DeviceGrant, StoreError> {
        Ok(serde_json::from_str(data)?)
    }
}
