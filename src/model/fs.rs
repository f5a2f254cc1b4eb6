use std::collections::HashMap;
use std::fmt;

use crate::model::b2::{ClientError, NativeObject};

/// What a stored object represents. Directory markers are ordinary objects
/// whose name ends with `/`; this tag is the single place that convention is
/// decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    File,
    Directory,
}

impl ObjectKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "file" => Some(ObjectKind::File),
            "folder" => Some(ObjectKind::Directory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::File => "file",
            ObjectKind::Directory => "folder",
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, ObjectKind::Directory)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized object metadata.
///
/// Field map from the native listing record: `path` <- name, `size` <- size,
/// `kind` <- type, `id` <- id. `path` is always the backend name, never
/// re-prefixed or stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectMeta {
    pub path: String,
    pub size: u64,
    pub kind: ObjectKind,
    pub id: String,
}

impl ObjectMeta {
    /// A record missing any mapped field fails loudly rather than defaulting.
    pub fn from_native(native: &NativeObject) -> Result<Self, FsError> {
        let path = native
            .name
            .clone()
            .ok_or(FsError::Normalization { field: "name" })?;
        let id = native
            .id
            .clone()
            .ok_or(FsError::Normalization { field: "id" })?;
        let size = native.size.ok_or(FsError::Normalization { field: "size" })?;
        let kind = native
            .kind
            .as_deref()
            .and_then(ObjectKind::parse)
            .ok_or(FsError::Normalization { field: "type" })?;

        Ok(Self {
            path,
            size,
            kind,
            id,
        })
    }
}

/// Per-call write options. Recognized keys are backend-specific; everything
/// is carried verbatim and never forwarded, since the client upload
/// capability takes no options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteConfig {
    pub settings: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("client is not bound to an account: {message}")]
    Configuration { message: String },

    #[error("no object found at: {path}")]
    NotFound { path: String },

    #[error("failed to upload object at: {path}, {message}")]
    Upload { path: String, message: String },

    #[error("failed to delete object at: {path}, {message}")]
    Delete { path: String, message: String },

    /// Declared by the capability surface but not implemented by this
    /// adapter. Distinct from silent success so callers can tell the two
    /// apart.
    #[error("operation is not supported: {operation}")]
    Unsupported { operation: &'static str },

    #[error("listing record is missing field: {field}")]
    Normalization { field: &'static str },

    #[error(transparent)]
    Client(#[from] ClientError),
}
