use crate::{adapters, model};

/// Canned-response client for tests. The knobs produce the failure shapes
/// the memory client cannot: probe calls that fail at the transport/format
/// level, and listing records with no name.
#[derive(Default)]
pub struct MockClient {
    pub fail_get: bool,
    pub nameless_listing: bool,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl adapters::BucketClient for MockClient {
    fn b2_upload(
        &self,
        _bucket: &model::b2::BucketIdentity,
        key: &str,
        body: Vec<u8>,
    ) -> Result<model::b2::NativeObject, model::b2::ClientError> {
        Ok(model::b2::NativeObject {
            name: Some(key.to_string()),
            id: Some("4_zmock0001".to_string()),
            size: Some(body.len() as u64),
            kind: Some(if key.ends_with('/') {
                "folder".to_string()
            } else {
                "file".to_string()
            }),
        })
    }

    fn b2_get_object(
        &self,
        _bucket: &model::b2::BucketIdentity,
        key: &str,
    ) -> Result<Option<model::b2::RawObject>, model::b2::ClientError> {
        if self.fail_get {
            return Err(model::b2::ClientError {
                message: format!("bad request: failed to parse response for: {}", key),
            });
        }

        Ok(Some(model::b2::RawObject {
            name: key.to_string(),
            id: Some("4_zmock0001".to_string()),
            content_type: None,
            body: Vec::new(),
        }))
    }

    fn b2_delete_object(
        &self,
        _bucket: &model::b2::BucketIdentity,
        _key: &str,
    ) -> Result<(), model::b2::ClientError> {
        Ok(())
    }

    fn b2_list_objects(
        &self,
        _bucket: &model::b2::BucketIdentity,
    ) -> Result<Vec<model::b2::NativeObject>, model::b2::ClientError> {
        if self.nameless_listing {
            return Ok(vec![model::b2::NativeObject {
                name: None,
                id: Some("4_zmock0001".to_string()),
                size: Some(0),
                kind: Some("file".to_string()),
            }]);
        }

        Ok(Vec::new())
    }

    fn b2_resolve_bucket_id(
        &self,
        bucket_name: &str,
    ) -> Result<String, model::b2::ClientError> {
        Ok(format!("b2-{}", bucket_name))
    }
}
