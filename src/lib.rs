//! Filesystem-style operations over a B2-style bucket.

pub mod adapters;
pub mod fs;
pub mod model;
pub mod util;

pub use adapters::BucketClient;
pub use fs::B2Fs;
pub use model::b2::{BucketIdentity, ClientError, NativeObject, RawObject};
pub use model::fs::{FsError, ObjectKind, ObjectMeta, WriteConfig};
