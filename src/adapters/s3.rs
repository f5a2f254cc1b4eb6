use aws_sdk_s3::primitives::ByteStream;

use crate::{adapters, model, util};

fn object_kind(key: &str) -> &'static str {
    if key.ends_with('/') {
        "folder"
    } else {
        "file"
    }
}

fn trim_etag(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}

/// B2 exposes an S3-compatible endpoint, so the SDK client is the bound
/// collaborator. The surface exposes no native bucket or file ids; ETags
/// stand in for object ids and the bucket name for the bucket id.
impl adapters::BucketClient for aws_sdk_s3::Client {
    fn b2_upload(
        &self,
        bucket: &model::b2::BucketIdentity,
        key: &str,
        body: Vec<u8>,
    ) -> Result<model::b2::NativeObject, model::b2::ClientError> {
        let size = body.len() as u64;
        let req = self
            .put_object()
            .bucket(&bucket.name)
            .key(key)
            .body(ByteStream::from(body));

        let po = util::block::block_on(req.send()).map_err(|err| model::b2::ClientError {
            message: format!("failed to put_object at: {}, {}", key, err),
        })?;

        Ok(model::b2::NativeObject {
            name: Some(key.to_string()),
            id: po.e_tag().map(trim_etag),
            size: Some(size),
            kind: Some(object_kind(key).to_string()),
        })
    }

    fn b2_get_object(
        &self,
        bucket: &model::b2::BucketIdentity,
        key: &str,
    ) -> Result<Option<model::b2::RawObject>, model::b2::ClientError> {
        let req = self.get_object().bucket(&bucket.name).key(key);

        let o = match util::block::block_on(req.send()) {
            Err(err) => {
                if let Some(svc_err) = err.as_service_error() {
                    if svc_err.is_no_such_key() {
                        return Ok(None);
                    }
                }

                return Err(model::b2::ClientError {
                    message: format!("failed to get_object: {}, {}", key, err),
                });
            }
            Ok(o) => o,
        };

        let id = o.e_tag().map(trim_etag);
        let content_type = o.content_type().map(|ct| ct.to_string());

        let bytes = util::block::block_on(o.body.collect()).map_err(|err| {
            model::b2::ClientError {
                message: format!("failed to collect body: {}, {}", key, err),
            }
        })?;

        Ok(Some(model::b2::RawObject {
            name: key.to_string(),
            id,
            content_type,
            body: bytes.into_bytes().to_vec(),
        }))
    }

    fn b2_delete_object(
        &self,
        bucket: &model::b2::BucketIdentity,
        key: &str,
    ) -> Result<(), model::b2::ClientError> {
        let req = self.delete_object().bucket(&bucket.name).key(key);

        util::block::block_on(req.send()).map_err(|err| model::b2::ClientError {
            message: format!("failed to delete_object at: {}, {}", key, err),
        })?;

        Ok(())
    }

    fn b2_list_objects(
        &self,
        bucket: &model::b2::BucketIdentity,
    ) -> Result<Vec<model::b2::NativeObject>, model::b2::ClientError> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = self.list_objects_v2().bucket(&bucket.name);

            if let Some(tok) = continuation_token {
                req = req.continuation_token(tok);
            }

            let lo = util::block::block_on(req.send()).map_err(|err| {
                model::b2::ClientError {
                    message: format!("failed to list_objects in: {}, {}", bucket.name, err),
                }
            })?;

            for o in lo.contents() {
                objects.push(model::b2::NativeObject {
                    name: o.key().map(|k| k.to_string()),
                    id: o.e_tag().map(trim_etag),
                    size: o.size().map(|s| s as u64),
                    kind: o.key().map(|k| object_kind(k).to_string()),
                });
            }

            continuation_token = lo.next_continuation_token().map(|tok| tok.to_string());
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(objects)
    }

    fn b2_resolve_bucket_id(
        &self,
        bucket_name: &str,
    ) -> Result<String, model::b2::ClientError> {
        let req = self.head_bucket().bucket(bucket_name);

        util::block::block_on(req.send()).map_err(|err| model::b2::ClientError {
            message: format!("failed to head_bucket: {}, {}", bucket_name, err),
        })?;

        Ok(bucket_name.to_string())
    }
}
