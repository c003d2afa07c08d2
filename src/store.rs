use crate::errors::StoreError;
use crate::grant::DeviceGrant;
use crate::repository::{GrantRepository, GrantRow, WriteOutcome};
use crate::serializer::{GrantSerializer, JsonGrantSerializer};
use chrono::Utc;

/// Durable CRUD over device-flow grant records, keyed by two distinct unique
/// strings, with transparent serialization of the logical grant.
///
/// The store holds no in-process mutable state; all coordination is pushed to
/// the backend's conditional writes. Racing updates or removes against the
/// same record are resolved last-write-wins: the loser is logged and dropped,
/// never retried and never surfaced to its caller.
///
/// Expiry is advisory metadata only. Lookups return expired records as-is;
/// the authorization server checks `expiration` on every use, and a periodic
/// [`remove_expired`](DeviceGrantStore::remove_expired) sweep reclaims them.
pub struct DeviceGrantStore<R: GrantRepository> {
    repo: R,
    serializer: Box<dyn GrantSerializer>,
}

impl<R: GrantRepository> DeviceGrantStore<R> {
    pub fn new(repo: R, serializer: Box<dyn GrantSerializer>) -> Self {
        Self { repo, serializer }
    }

    /// Store with the default JSON payload serializer.
    pub fn with_json(repo: R) -> Self {
        Self::new(repo, Box::new(JsonGrantSerializer))
    }

    /// Inserts a new grant record. Both codes must be unused; a duplicate of
    /// either yields [`StoreError::Conflict`] and leaves no partial record.
    pub async fn store(
        &self,
        device_code: &str,
        user_code: &str,
        grant: &DeviceGrant,
    ) -> Result<(), StoreError> {
        let row = self.to_row(device_code, user_code, grant)?;
        self.repo.insert(row).await?;

        tracing::debug!(device_code, user_code, "stored device grant");
        Ok(())
    }

    /// Exact-match lookup by user code; `None` when absent.
    pub async fn find_by_user_code(
        &self,
        user_code: &str,
    ) -> Result<Option<DeviceGrant>, StoreError> {
        let row = self.repo.find_by_user_code(user_code).await?;
        tracing::debug!(user_code, found = row.is_some(), "device grant lookup");

        row.map(|r| self.serializer.deserialize(&r.data)).transpose()
    }

    /// Exact-match lookup by device code; `None` when absent. This is the
    /// polling path, read-only and side-effect free.
    pub async fn find_by_device_code(
        &self,
        device_code: &str,
    ) -> Result<Option<DeviceGrant>, StoreError> {
        let row = self.repo.find_by_device_code(device_code).await?;
        tracing::debug!(device_code, found = row.is_some(), "device grant lookup");

        row.map(|r| self.serializer.deserialize(&r.data)).transpose()
    }

    /// Re-serializes `grant` and overwrites the payload and `subject_id` of
    /// the record matching `user_code`. The device code and creation time are
    /// immutable and preserved from the existing row; expiry is re-derived
    /// from the preserved creation time and the grant's lifetime.
    ///
    /// Fails with [`StoreError::NotFound`] when no record matches. A racing
    /// write against the same record drops this update silently: callers must
    /// not assume strict linearizability of updates to one record.
    pub async fn update_by_user_code(
        &self,
        user_code: &str,
        grant: &DeviceGrant,
    ) -> Result<(), StoreError> {
        let Some(existing) = self.repo.find_by_user_code(user_code).await? else {
            tracing::error!(user_code, "device grant not found for update");
            return Err(StoreError::NotFound {
                user_code: user_code.to_string(),
            });
        };
        tracing::debug!(user_code, "updating device grant");

        let mut row = self.to_row(&existing.device_code, user_code, grant)?;
        row.created_at = existing.created_at;
        row.expires_at = existing.created_at + grant.lifetime;

        match self.repo.update(row, existing.row_version).await? {
            WriteOutcome::Applied => Ok(()),
            WriteOutcome::Conflict => {
                tracing::warn!(user_code, "dropping concurrently-modified grant update");
                Ok(())
            }
        }
    }

    /// Deletes the record for `device_code` if present; absent records and
    /// concurrent deletions are no-ops, so this is idempotent.
    pub async fn remove_by_device_code(&self, device_code: &str) -> Result<(), StoreError> {
        if self.repo.find_by_device_code(device_code).await?.is_none() {
            tracing::debug!(device_code, "no device grant to remove");
            return Ok(());
        }

        tracing::debug!(device_code, "removing device grant");
        if let WriteOutcome::Conflict = self.repo.delete(device_code).await? {
            tracing::debug!(device_code, "device grant already removed");
        }

        Ok(())
    }

    /// Deletes all records past their expiry; returns the number removed.
    /// Intended for a caller-driven background sweep.
    pub async fn remove_expired(&self) -> Result<u64, StoreError> {
        let now = Utc::now().timestamp();
        let removed = self.repo.delete_expired(now).await?;

        if removed > 0 {
            tracing::debug!(removed, "removed expired device grants");
        }
        Ok(removed)
    }

    fn to_row(
        &self,
        device_code: &str,
        user_code: &str,
        grant: &DeviceGrant,
    ) -> Result<GrantRow, StoreError> {
        Ok(GrantRow {
            device_code: device_code.to_string(),
            user_code: user_code.to_string(),
            client_id: grant.client_id.clone(),
            subject_id: grant.subject_id().map(str::to_string),
            created_at: grant.creation_time,
            expires_at: grant.expiration(),
            row_version: 0,
            data: self.serializer.serialize(grant)?,
        })
    }
}
