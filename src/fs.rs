use std::collections::{HashMap, HashSet};
use std::io::Read;

use tracing::{debug, error, info, span, Level};

use crate::{adapters, model, util};

/// Filesystem-style operations over one bucket of a B2-style object store.
///
/// The adapter holds no mutable state and caches nothing; every operation is
/// a fresh round trip through the bound client. Directories exist only as
/// zero-length marker objects whose name ends with `/`.
pub struct B2Fs {
    client: Box<dyn adapters::BucketClient>,
    bucket: model::b2::BucketIdentity,
    prefix: util::path::PathPrefix,
    options: HashMap<String, String>,
}

impl B2Fs {
    /// Bind the adapter to `bucket` through an already-authorized client.
    /// The bucket id is resolved here, once; a client that cannot resolve it
    /// is not usable and construction fails.
    pub fn new(
        client: Box<dyn adapters::BucketClient>,
        bucket: &str,
        prefix: &str,
        options: HashMap<String, String>,
    ) -> Result<Self, model::fs::FsError> {
        let span = span!(Level::INFO, "new", context = "new");
        let _e = span.enter();
        info!(bucket = bucket, prefix = prefix, "called");

        let bucket_id = client.b2_resolve_bucket_id(bucket).map_err(|err| {
            error!(error_message=%err, error_group="resolve_bucket_id");
            model::fs::FsError::Configuration {
                message: err.to_string(),
            }
        })?;

        Ok(Self {
            client,
            bucket: model::b2::BucketIdentity {
                name: bucket.to_string(),
                id: bucket_id,
            },
            prefix: util::path::PathPrefix::new(prefix),
            options,
        })
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket.name
    }

    pub fn bucket_id(&self) -> &str {
        &self.bucket.id
    }

    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    /// Write `contents` under `path`. The upload is unconditional: on a
    /// versioned backend an existing name gains a new version rather than
    /// failing.
    pub fn write(
        &self,
        path: &str,
        contents: &[u8],
        config: &model::fs::WriteConfig,
    ) -> Result<model::fs::ObjectMeta, model::fs::FsError> {
        let span = span!(Level::INFO, "write", context = "write");
        let _e = span.enter();
        info!(path = path, size = contents.len(), "called");

        self.upload(path, contents, config)
    }

    /// Drain `contents` and write the bytes under `path`.
    pub fn write_stream(
        &self,
        path: &str,
        contents: &mut dyn Read,
        config: &model::fs::WriteConfig,
    ) -> Result<model::fs::ObjectMeta, model::fs::FsError> {
        let span = span!(Level::INFO, "write_stream", context = "write_stream");
        let _e = span.enter();
        info!(path = path, "called");

        let mut body = Vec::new();
        contents.read_to_end(&mut body).map_err(|err| {
            error!(error_message=%err, error_group="read_to_end");
            model::fs::FsError::Upload {
                path: path.to_string(),
                message: err.to_string(),
            }
        })?;

        self.upload(path, &body, config)
    }

    /// Fetch the object at `path`, undecoded.
    pub fn read(&self, path: &str) -> Result<model::b2::RawObject, model::fs::FsError> {
        let span = span!(Level::INFO, "read", context = "read");
        let _e = span.enter();
        info!(path = path, "called");

        let key = self.prefix.apply(path);

        match self.client.b2_get_object(&self.bucket, &key) {
            Ok(Some(raw)) => Ok(raw),
            Ok(None) => Err(model::fs::FsError::NotFound { path: key }),
            Err(err) => {
                error!(error_message=%err, error_group="get_object");
                Err(model::fs::FsError::Client(err))
            }
        }
    }

    /// Delete the object at `path` and report whether a follow-up probe
    /// finds nothing. One delete removes one version; the probe, not the
    /// delete call, decides success.
    pub fn delete(&self, path: &str) -> Result<bool, model::fs::FsError> {
        let span = span!(Level::INFO, "delete", context = "delete");
        let _e = span.enter();
        info!(path = path, "called");

        let key = self.prefix.apply(path);

        self.client
            .b2_delete_object(&self.bucket, &key)
            .map_err(|err| {
                error!(error_message=%err, error_group="delete_object");
                model::fs::FsError::Delete {
                    path: key.clone(),
                    message: err.to_string(),
                }
            })?;

        Ok(!self.has(path))
    }

    /// List the objects under `directory`. The client capability is
    /// bucket-wide, so scoping happens here; the directory's own marker is
    /// not part of its contents. With `recursive` set, each directory marker
    /// met in the listing is re-queried in turn and unseen entries merged,
    /// in the backend's listing order.
    pub fn list_contents(
        &self,
        directory: &str,
        recursive: bool,
    ) -> Result<Vec<model::fs::ObjectMeta>, model::fs::FsError> {
        let span = span!(Level::INFO, "list_contents", context = "list_contents");
        let _e = span.enter();
        info!(directory = directory, recursive = recursive, "called");

        let dir_key = util::path::as_directory(&self.prefix.apply(directory));
        let mut seen = HashSet::new();

        self.list_under(&dir_key, recursive, &mut seen)
    }

    fn list_under(
        &self,
        dir_key: &str,
        recursive: bool,
        seen: &mut HashSet<String>,
    ) -> Result<Vec<model::fs::ObjectMeta>, model::fs::FsError> {
        let natives = self
            .client
            .b2_list_objects(&self.bucket)
            .map_err(|err| {
                error!(error_message=%err, error_group="list_objects");
                model::fs::FsError::Client(err)
            })?;

        let mut listing = Vec::new();
        for native in &natives {
            let meta = model::fs::ObjectMeta::from_native(native)?;

            if !meta.path.starts_with(dir_key) || meta.path == dir_key {
                continue;
            }
            if !seen.insert(meta.path.clone()) {
                continue;
            }

            let descend = recursive && meta.kind.is_directory();
            let marker = meta.path.clone();
            listing.push(meta);

            if descend {
                listing.extend(self.list_under(&marker, true, seen)?);
            }
        }

        Ok(listing)
    }

    /// Delete the marker for `path`. Absent directories ack immediately;
    /// like [`B2Fs::delete`], success is the post-delete probe.
    pub fn delete_dir(&self, path: &str) -> Result<bool, model::fs::FsError> {
        let span = span!(Level::INFO, "delete_dir", context = "delete_dir");
        let _e = span.enter();
        info!(path = path, "called");

        if self.has(path) {
            let marker = util::path::as_directory(&self.prefix.apply(path));

            self.client
                .b2_delete_object(&self.bucket, &marker)
                .map_err(|err| {
                    error!(error_message=%err, error_group="delete_object");
                    model::fs::FsError::Delete {
                        path: marker.clone(),
                        message: err.to_string(),
                    }
                })?;
        }

        Ok(!self.has(path))
    }

    /// Create the marker object for `dirname`.
    pub fn create_dir(
        &self,
        dirname: &str,
        config: &model::fs::WriteConfig,
    ) -> Result<model::fs::ObjectMeta, model::fs::FsError> {
        let span = span!(Level::INFO, "create_dir", context = "create_dir");
        let _e = span.enter();
        info!(dirname = dirname, "called");

        let marker = format!("{}/", dirname.trim_end_matches('/'));

        self.upload(&marker, &[], config)
    }

    /// Whether anything is stored at `path`: the exact name, or its
    /// directory marker. Probe failures of any kind read as absent; this
    /// check never fails outward.
    pub fn has(&self, path: &str) -> bool {
        let span = span!(Level::INFO, "has", context = "has");
        let _e = span.enter();
        info!(path = path, "called");

        let key = self.prefix.apply(path);

        if self.probe(&key) {
            return true;
        }
        if key.ends_with('/') {
            return false;
        }

        let marker = util::path::as_directory(&key);
        !marker.is_empty() && self.probe(&marker)
    }

    fn probe(&self, key: &str) -> bool {
        match self.client.b2_get_object(&self.bucket, key) {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(err) => {
                debug!(error_message=%err, error_group="get_object", "probe downgraded to absent");
                false
            }
        }
    }

    fn upload(
        &self,
        path: &str,
        body: &[u8],
        config: &model::fs::WriteConfig,
    ) -> Result<model::fs::ObjectMeta, model::fs::FsError> {
        let key = self.prefix.apply(path);
        debug!(key = %key, config = ?config, "upload");

        let native = self
            .client
            .b2_upload(&self.bucket, &key, body.to_vec())
            .map_err(|err| {
                error!(error_message=%err, error_group="upload");
                model::fs::FsError::Upload {
                    path: key.clone(),
                    message: err.to_string(),
                }
            })?;

        model::fs::ObjectMeta::from_native(&native)
    }

    // Declared capabilities with no B2 translation. Each reports itself as
    // unsupported so callers can tell "unsupported" from "succeeded with no
    // effect".

    pub fn update_stream(
        &self,
        _path: &str,
        _contents: &mut dyn Read,
        _config: &model::fs::WriteConfig,
    ) -> Result<model::fs::ObjectMeta, model::fs::FsError> {
        Err(model::fs::FsError::Unsupported {
            operation: "update_stream",
        })
    }

    pub fn get_metadata(&self, _path: &str) -> Result<model::fs::ObjectMeta, model::fs::FsError> {
        Err(model::fs::FsError::Unsupported {
            operation: "get_metadata",
        })
    }

    pub fn get_mimetype(&self, _path: &str) -> Result<String, model::fs::FsError> {
        Err(model::fs::FsError::Unsupported {
            operation: "get_mimetype",
        })
    }

    pub fn get_timestamp(&self, _path: &str) -> Result<u64, model::fs::FsError> {
        Err(model::fs::FsError::Unsupported {
            operation: "get_timestamp",
        })
    }

    pub fn get_visibility(&self, _path: &str) -> Result<String, model::fs::FsError> {
        Err(model::fs::FsError::Unsupported {
            operation: "get_visibility",
        })
    }

    pub fn get_size(&self, _path: &str) -> Result<u64, model::fs::FsError> {
        Err(model::fs::FsError::Unsupported {
            operation: "get_size",
        })
    }

    pub fn copy(&self, _path: &str, _newpath: &str) -> Result<(), model::fs::FsError> {
        Err(model::fs::FsError::Unsupported { operation: "copy" })
    }

    pub fn read_stream(&self, _path: &str) -> Result<Box<dyn Read>, model::fs::FsError> {
        Err(model::fs::FsError::Unsupported {
            operation: "read_stream",
        })
    }

    pub fn set_visibility(
        &self,
        _path: &str,
        _visibility: &str,
    ) -> Result<(), model::fs::FsError> {
        Err(model::fs::FsError::Unsupported {
            operation: "set_visibility",
        })
    }

    pub fn update(
        &self,
        _path: &str,
        _contents: &[u8],
        _config: &model::fs::WriteConfig,
    ) -> Result<model::fs::ObjectMeta, model::fs::FsError> {
        Err(model::fs::FsError::Unsupported { operation: "update" })
    }

    pub fn rename(&self, _from: &str, _to: &str) -> Result<(), model::fs::FsError> {
        Err(model::fs::FsError::Unsupported { operation: "rename" })
    }
}
