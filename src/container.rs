//! Container: where applications are installed, and how their paths and
//! resources resolve.
//!
//! Relative paths resolve against the container's base path. Absolute paths
//! pass through unchanged. A reference with a scheme is a URI, not a path, and
//! must go through [`Container::resolve_uri`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

use url::{Position, Url};

use crate::error::{Error, Result};

/// An application installed in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    pub name: String,
    /// Path of the application relative to the container base path.
    pub base_path: String,
}

/// Resolution of paths and URIs, and access to resources.
pub trait Container: Send + Sync {
    /// Absolute URI of the container, ending in `/`.
    fn base_uri(&self) -> &Url;

    /// Absolute path of the container, ending in `/`.
    fn base_path(&self) -> &str {
        self.base_uri().path()
    }

    /// Resolve a path against the base path. Fails with
    /// [`Error::InvalidArgument`] if `path` has a scheme or authority.
    fn resolve_path(&self, path: &str) -> Result<String>;

    /// Resolve a URI reference. URIs with a scheme and absolute paths are
    /// returned unchanged; relative paths resolve as by `resolve_path`.
    fn resolve_uri(&self, uri: &str) -> Result<String>;

    /// A reader for the resource at `uri`, or `None` if there is none.
    fn input_stream(&self, uri: &str) -> Result<Option<Box<dyn Read + Send>>>;

    fn applications(&self) -> &[ApplicationInfo];
}

/// Whether a reference starts with `scheme:`.
fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// ---------------------------------------------------------------------------
// StaticContainer
// ---------------------------------------------------------------------------

/// A container with a fixed base URI, in-memory resources and a fixed list
/// of applications. `file:` URIs are read from the filesystem.
#[derive(Debug, Clone)]
pub struct StaticContainer {
    base_uri: Url,
    resources: HashMap<String, Arc<[u8]>>,
    applications: Vec<ApplicationInfo>,
}

impl StaticContainer {
    pub fn new(base_uri: &str) -> Result<Self> {
        let base_uri = Url::parse(base_uri)
            .map_err(|err| Error::invalid_argument(format!("base uri {base_uri:?}: {err}")))?;
        if base_uri.cannot_be_a_base() || !base_uri.path().ends_with('/') {
            return Err(Error::invalid_argument(format!(
                "base uri {base_uri} must be hierarchical and end in '/'"
            )));
        }
        Ok(Self {
            base_uri,
            resources: HashMap::new(),
            applications: Vec::new(),
        })
    }

    /// Serve `data` for the resource at `uri`, resolved like
    /// [`Container::resolve_uri`].
    pub fn with_resource(mut self, uri: &str, data: impl Into<Arc<[u8]>>) -> Result<Self> {
        let key = self.resolve_uri(uri)?;
        self.resources.insert(key, data.into());
        Ok(self)
    }

    pub fn with_application(mut self, name: impl Into<String>, base_path: impl Into<String>) -> Self {
        self.applications.push(ApplicationInfo {
            name: name.into(),
            base_path: base_path.into(),
        });
        self
    }
}

impl Container for StaticContainer {
    fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    fn resolve_path(&self, path: &str) -> Result<String> {
        if has_scheme(path) || path.starts_with("//") {
            return Err(Error::invalid_argument(format!(
                "{path:?} is a URI, not a path"
            )));
        }
        if path.starts_with('/') {
            return Ok(path.to_owned());
        }
        let joined = self
            .base_uri
            .join(path)
            .map_err(|err| Error::invalid_argument(format!("path {path:?}: {err}")))?;
        let resolved = joined[Position::BeforePath..].to_owned();
        tracing::trace!(target: "guise::container", path, %resolved, "resolved path");
        Ok(resolved)
    }

    fn resolve_uri(&self, uri: &str) -> Result<String> {
        if has_scheme(uri) {
            Url::parse(uri).map_err(|err| Error::invalid_argument(format!("uri {uri:?}: {err}")))?;
            return Ok(uri.to_owned());
        }
        if uri.starts_with("//") {
            let joined = self
                .base_uri
                .join(uri)
                .map_err(|err| Error::invalid_argument(format!("uri {uri:?}: {err}")))?;
            return Ok(joined.into());
        }
        self.resolve_path(uri)
    }

    fn input_stream(&self, uri: &str) -> Result<Option<Box<dyn Read + Send>>> {
        let resolved = self.resolve_uri(uri)?;
        if let Some(data) = self.resources.get(&resolved) {
            return Ok(Some(Box::new(Cursor::new(Arc::clone(data)))));
        }
        let Ok(url) = Url::parse(&resolved) else {
            return Ok(None);
        };
        if url.scheme() != "file" {
            return Ok(None);
        }
        let path = url
            .to_file_path()
            .map_err(|()| Error::invalid_argument(format!("{resolved} is not a local file")))?;
        match File::open(&path) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(target: "guise::container", path = %path.display(), "resource not found");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn applications(&self) -> &[ApplicationInfo] {
        &self.applications
    }
}
