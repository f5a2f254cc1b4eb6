use crate::model;

pub mod memory;
pub mod mock;
pub mod s3;

/// Client bound to one B2-style account, addressed per call with a bucket
/// identity. Implementations own transport, credentials, and retries; the
/// adapter owns nothing but translation.
///
/// Methods are `b2_`-prefixed to stay clear of the inherent methods of SDK
/// clients the trait is implemented on.
pub trait BucketClient: Send + Sync {
    /// Upload `body` under `key`, unconditionally. On a versioned backend an
    /// existing name gains a new version.
    fn b2_upload(
        &self,
        bucket: &model::b2::BucketIdentity,
        key: &str,
        body: Vec<u8>,
    ) -> Result<model::b2::NativeObject, model::b2::ClientError>;

    /// Fetch an object by exact name. `Ok(None)` means the backend reports
    /// no such object; `Err` is a transport or format failure.
    fn b2_get_object(
        &self,
        bucket: &model::b2::BucketIdentity,
        key: &str,
    ) -> Result<Option<model::b2::RawObject>, model::b2::ClientError>;

    /// Delete the current version of `key`. Deleting an absent object acks.
    fn b2_delete_object(
        &self,
        bucket: &model::b2::BucketIdentity,
        key: &str,
    ) -> Result<(), model::b2::ClientError>;

    /// List every object in the bucket. The capability is bucket-wide;
    /// scoping to a directory is the adapter's job.
    fn b2_list_objects(
        &self,
        bucket: &model::b2::BucketIdentity,
    ) -> Result<Vec<model::b2::NativeObject>, model::b2::ClientError>;

    /// Resolve a bucket name to its id. Used once, at adapter construction;
    /// failure there means the client is not usable for this bucket.
    fn b2_resolve_bucket_id(&self, bucket_name: &str)
        -> Result<String, model::b2::ClientError>;
}
