use faststr::FastStr;
use url::Url;

use crate::{error::GridError, path::GridPath, GridResult};

/// Parsed form of a URI-style target, e.g. `mem:///projects/run1`.
///
/// Only the scheme and the path take part in target resolution: the scheme
/// selects a mounted filesystem and the path names a node on it. Authority
/// parts (userinfo, host, port) describe connection endpoints, which are
/// fixed at mount time, so they carry no routing information here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridUri {
    pub scheme: FastStr,
    pub path: GridPath,
}

impl GridUri {
    pub fn parse(raw: &str) -> GridResult<GridUri> {
        let url = Url::parse(raw).map_err(|_| GridError::InvalidUri(raw.to_string().into()))?;

        let path = GridPath::parse(url.path())
            .map_err(|_| GridError::InvalidUri(raw.to_string().into()))?;

        Ok(GridUri {
            scheme: url.scheme().to_string().into(),
            path,
        })
    }
}
