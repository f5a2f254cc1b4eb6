use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, RwLock,
};

use crate::{adapters, model};

struct StoredVersion {
    id: String,
    body: Vec<u8>,
}

/// In-memory bucket with B2-style version semantics: uploading to an
/// existing name stacks a new version, deleting removes only the newest one,
/// and listing reports the newest version of each name in name order.
///
/// Clones share the same store, so a test can keep a handle to the state it
/// hands the adapter.
#[derive(Clone)]
pub struct MemoryClient {
    objects: Arc<RwLock<BTreeMap<String, Vec<StoredVersion>>>>,
    next_id: Arc<AtomicU64>,
    authorized: bool,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            authorized: true,
        }
    }

    /// A client that never authorized against an account; every call fails.
    pub fn unauthorized() -> Self {
        Self {
            authorized: false,
            ..Self::new()
        }
    }

    fn ensure_authorized(&self) -> Result<(), model::b2::ClientError> {
        if self.authorized {
            Ok(())
        } else {
            Err(model::b2::ClientError {
                message: "client is not authorized against an account".to_string(),
            })
        }
    }

    fn next_version_id(&self) -> String {
        format!("4_z{:08}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn kind_of(key: &str) -> String {
        if key.ends_with('/') {
            "folder".to_string()
        } else {
            "file".to_string()
        }
    }

    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.objects
            .read()
            .expect("lock poisoned")
            .contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn version_count(&self, key: &str) -> usize {
        self.objects
            .read()
            .expect("lock poisoned")
            .get(key)
            .map_or(0, |versions| versions.len())
    }
}

impl Default for MemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl adapters::BucketClient for MemoryClient {
    fn b2_upload(
        &self,
        _bucket: &model::b2::BucketIdentity,
        key: &str,
        body: Vec<u8>,
    ) -> Result<model::b2::NativeObject, model::b2::ClientError> {
        self.ensure_authorized()?;

        let id = self.next_version_id();
        let size = body.len() as u64;

        let mut objects = self.objects.write().expect("lock poisoned");
        objects
            .entry(key.to_string())
            .or_default()
            .push(StoredVersion {
                id: id.clone(),
                body,
            });

        Ok(model::b2::NativeObject {
            name: Some(key.to_string()),
            id: Some(id),
            size: Some(size),
            kind: Some(Self::kind_of(key)),
        })
    }

    fn b2_get_object(
        &self,
        _bucket: &model::b2::BucketIdentity,
        key: &str,
    ) -> Result<Option<model::b2::RawObject>, model::b2::ClientError> {
        self.ensure_authorized()?;

        let objects = self.objects.read().expect("lock poisoned");

        let newest = match objects.get(key).and_then(|versions| versions.last()) {
            None => return Ok(None),
            Some(version) => version,
        };

        Ok(Some(model::b2::RawObject {
            name: key.to_string(),
            id: Some(newest.id.clone()),
            content_type: None,
            body: newest.body.clone(),
        }))
    }

    fn b2_delete_object(
        &self,
        _bucket: &model::b2::BucketIdentity,
        key: &str,
    ) -> Result<(), model::b2::ClientError> {
        self.ensure_authorized()?;

        let mut objects = self.objects.write().expect("lock poisoned");

        if let Some(versions) = objects.get_mut(key) {
            versions.pop();
            if versions.is_empty() {
                objects.remove(key);
            }
        }

        Ok(())
    }

    fn b2_list_objects(
        &self,
        _bucket: &model::b2::BucketIdentity,
    ) -> Result<Vec<model::b2::NativeObject>, model::b2::ClientError> {
        self.ensure_authorized()?;

        let objects = self.objects.read().expect("lock poisoned");

        let mut listing = Vec::new();
        for (key, versions) in objects.iter() {
            let newest = match versions.last() {
                None => continue,
                Some(version) => version,
            };

            listing.push(model::b2::NativeObject {
                name: Some(key.clone()),
                id: Some(newest.id.clone()),
                size: Some(newest.body.len() as u64),
                kind: Some(Self::kind_of(key)),
            });
        }

        Ok(listing)
    }

    fn b2_resolve_bucket_id(
        &self,
        bucket_name: &str,
    ) -> Result<String, model::b2::ClientError> {
        self.ensure_authorized()?;

        Ok(format!("b2-{}", bucket_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BucketClient;

    fn bucket() -> model::b2::BucketIdentity {
        model::b2::BucketIdentity {
            name: "dummy-bucket".to_string(),
            id: "b2-dummy-bucket".to_string(),
        }
    }

    #[test]
    fn test_upload_stacks_versions() {
        let client = MemoryClient::new();

        client.b2_upload(&bucket(), "file", b"one".to_vec()).unwrap();
        client.b2_upload(&bucket(), "file", b"two".to_vec()).unwrap();

        assert_eq!(client.version_count("file"), 2);

        let raw = client.b2_get_object(&bucket(), "file").unwrap().unwrap();
        assert_eq!(raw.body, b"two".to_vec());
    }

    #[test]
    fn test_delete_removes_newest_version_only() {
        let client = MemoryClient::new();

        client.b2_upload(&bucket(), "file", b"one".to_vec()).unwrap();
        client.b2_upload(&bucket(), "file", b"two".to_vec()).unwrap();

        client.b2_delete_object(&bucket(), "file").unwrap();

        let raw = client.b2_get_object(&bucket(), "file").unwrap().unwrap();
        assert_eq!(raw.body, b"one".to_vec());

        client.b2_delete_object(&bucket(), "file").unwrap();
        assert!(client.b2_get_object(&bucket(), "file").unwrap().is_none());
        assert!(!client.contains_key("file"));
    }

    #[test]
    fn test_delete_absent_object_acks() {
        let client = MemoryClient::new();

        let result = client.b2_delete_object(&bucket(), "missing");
        assert!(result.is_ok());
    }

    #[test]
    fn test_list_is_name_ordered_newest_versions() {
        let client = MemoryClient::new();

        client.b2_upload(&bucket(), "b/file", b"bb".to_vec()).unwrap();
        client.b2_upload(&bucket(), "a/file", b"a".to_vec()).unwrap();
        client.b2_upload(&bucket(), "a/file", b"aaa".to_vec()).unwrap();

        let listing = client.b2_list_objects(&bucket()).unwrap();

        let names: Vec<_> = listing.iter().map(|o| o.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["a/file".to_string(), "b/file".to_string()]);
        assert_eq!(listing[0].size, Some(3));
        assert_eq!(listing[1].size, Some(2));
    }

    #[test]
    fn test_unauthorized_client_fails_every_call() {
        let client = MemoryClient::unauthorized();

        assert!(client.b2_resolve_bucket_id("dummy-bucket").is_err());
        assert!(client.b2_list_objects(&bucket()).is_err());
        assert!(client.b2_get_object(&bucket(), "file").is_err());
    }

    #[test]
    fn test_clones_share_state() {
        let client = MemoryClient::new();
        let handle = client.clone();

        client.b2_upload(&bucket(), "file", b"body".to_vec()).unwrap();

        assert!(handle.contains_key("file"));
    }
}
