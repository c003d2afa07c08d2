//! Apsis - persistence for the OAuth 2.0 Device Authorization Grant (RFC 8628)
//!
//! This library stores, retrieves, updates and removes device-flow grant
//! records for an authorization server. One logical record is reachable by
//! two unique keys: the device code the client polls with and the user code
//! the end user enters. The full grant lives in an opaque serialized payload;
//! a handful of indexed columns form a queryable projection of it.

pub mod codes;
pub mod entities;
pub mod errors;
pub mod grant;
pub mod repository;
pub mod serializer;
pub mod settings;
pub mod store;

pub use errors::StoreError;
pub use grant::{DeviceGrant, GrantStatus, GrantSubject};
pub use repository::{connect, GrantRepository, GrantRow, SeaOrmGrantRepository, WriteOutcome};
pub use serializer::{GrantSerializer, JsonGrantSerializer};
pub use store::DeviceGrantStore;
