/// A bucket as the backend addresses it. The id is resolved once through the
/// client when the adapter is built and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketIdentity {
    pub name: String,
    pub id: String,
}

/// One record of a bucket listing, exactly as the backend reported it.
/// Fields the backend omitted stay `None`; normalization decides what that
/// means, not this type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NativeObject {
    pub name: Option<String>,
    pub id: Option<String>,
    pub size: Option<u64>,
    pub kind: Option<String>,
}

/// The undecoded result of fetching an object. Decoding the body is the
/// caller's responsibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawObject {
    pub name: String,
    pub id: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Failure reported by a [`crate::adapters::BucketClient`] implementation.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    pub message: String,
}
