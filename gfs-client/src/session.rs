use std::sync::Arc;

use ahash::AHashMap;
use faststr::FastStr;

use crate::{
    backend,
    error::GridError,
    file::{GridFile, GridFileSystem},
    path::GridPath,
    uri::GridUri,
    GridResult,
};

/// Builder for a [`Session`]: which backings are mounted under which scheme,
/// which of those is the default, and the home path relative targets resolve
/// against.
pub struct SessionBuilder {
    default_scheme: FastStr,
    home: GridPath,
    mounts: Vec<(FastStr, Arc<dyn GridFileSystem>)>,
}

impl SessionBuilder {
    pub fn new() -> SessionBuilder {
        SessionBuilder {
            default_scheme: FastStr::from_static_str(backend::cfg::LOCAL_SCHEME),
            home: GridPath::root(),
            mounts: Vec::new(),
        }
    }

    pub fn mount<F>(mut self, scheme: &str, fs: F) -> SessionBuilder
    where
        F: GridFileSystem + 'static,
    {
        self.mounts
            .push((FastStr::from_string(scheme.to_string()), Arc::new(fs)));
        self
    }

    pub fn default_scheme(mut self, scheme: &str) -> SessionBuilder {
        self.default_scheme = FastStr::from_string(scheme.to_string());
        self
    }

    pub fn home(mut self, home: GridPath) -> SessionBuilder {
        self.home = home;
        self
    }

    /// Validate the mount table, then connect every mounted backing. Any
    /// fault here is fatal to the run; validation failures connect nothing.
    pub async fn connect(self) -> GridResult<Session> {
        if !self
            .mounts
            .iter()
            .any(|(scheme, _)| *scheme == self.default_scheme)
        {
            return Err(GridError::UnknownScheme(self.default_scheme));
        }

        let mut mounts = AHashMap::with_capacity(self.mounts.len());
        for (scheme, fs) in self.mounts {
            fs.connect().await?;
            mounts.insert(scheme, fs);
        }

        tracing::debug!(
            default_scheme = %self.default_scheme,
            mounts = mounts.len(),
            "grid session opened"
        );

        Ok(Session {
            default_scheme: self.default_scheme,
            home: self.home,
            mounts,
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> SessionBuilder {
        SessionBuilder::new()
    }
}

/// A connected grid session: the explicit context every target resolution
/// goes through. One session is opened per run and closed at the end.
pub struct Session {
    default_scheme: FastStr,
    home: GridPath,
    mounts: AHashMap<FastStr, Arc<dyn GridFileSystem>>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn home(&self) -> &GridPath {
        &self.home
    }

    /// Handle for a plain path target on the default backing. Relative
    /// targets resolve against the session home.
    pub async fn open_path(&self, target: &str) -> GridResult<Box<dyn GridFile>> {
        let path = GridPath::resolve(&self.home, target)?;
        self.default_fs()?.open(path).await
    }

    /// Handle for a top-level container on the default backing.
    pub async fn open_container(&self, name: &str) -> GridResult<Box<dyn GridFile>> {
        if name.is_empty() || name.contains('/') {
            return Err(GridError::InvalidPath(name.to_string().into()));
        }
        self.default_fs()?.container(name).await
    }

    /// Handle resolved through a URI; the scheme picks the mounted backing.
    pub async fn open_uri(&self, raw: &str) -> GridResult<Box<dyn GridFile>> {
        let uri = GridUri::parse(raw)?;
        let Some(fs) = self.mounts.get(&uri.scheme) else {
            return Err(GridError::UnknownScheme(uri.scheme));
        };
        fs.open(uri.path).await
    }

    /// Close every mounted backing. The session is gone afterwards either
    /// way; the first close fault is the one reported.
    pub async fn close(self) -> GridResult<()> {
        let mut result = Ok(());
        for (scheme, fs) in &self.mounts {
            if let Err(err) = fs.close().await {
                tracing::warn!(scheme = %scheme, error = %err, "backing close failed");
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        tracing::debug!("grid session closed");
        result
    }

    fn default_fs(&self) -> GridResult<&Arc<dyn GridFileSystem>> {
        self.mounts
            .get(&self.default_scheme)
            .ok_or_else(|| GridError::UnknownScheme(self.default_scheme.clone()))
    }
}
