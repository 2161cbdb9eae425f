use faststr::FastStr;

use crate::{error::GridError, GridResult};

const SEPARATOR: char = '/';

/// Normalized absolute path inside a grid namespace: always starts with the
/// separator, no repeated or trailing separators (the root is the single
/// exception), `.` and `..` already collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridPath {
    src: FastStr,
}

impl GridPath {
    pub fn root() -> GridPath {
        GridPath {
            src: FastStr::from_static_str("/"),
        }
    }

    /// Parse an absolute path. Relative input goes through [`GridPath::resolve`].
    pub fn parse(src: &str) -> GridResult<GridPath> {
        if !src.starts_with(SEPARATOR) {
            return Err(GridError::InvalidPath(src.to_string().into()));
        }
        GridPath::resolve(&GridPath::root(), src)
    }

    /// Resolve a target the way a shell resolves an argument: absolute input
    /// replaces `base`, relative input appends to it, `.` and `..` collapse.
    /// Walking `..` above the root is an error.
    pub fn resolve(base: &GridPath, target: &str) -> GridResult<GridPath> {
        if target.is_empty() {
            return Err(GridError::InvalidPath(FastStr::empty()));
        }

        let mut stack: Vec<&str> = if target.starts_with(SEPARATOR) {
            Vec::new()
        } else {
            base.components().collect()
        };

        for comp in target.split(SEPARATOR) {
            match comp {
                "" | "." => {}
                ".." => {
                    if stack.pop().is_none() {
                        return Err(GridError::InvalidPath(target.to_string().into()));
                    }
                }
                _ => stack.push(comp),
            }
        }

        if stack.is_empty() {
            return Ok(GridPath::root());
        }

        let mut normalized = String::with_capacity(target.len() + base.src.len());
        for comp in stack {
            normalized.push(SEPARATOR);
            normalized.push_str(comp);
        }

        Ok(GridPath {
            src: normalized.into(),
        })
    }

    pub fn is_root(&self) -> bool {
        self.src.len() == 1
    }

    pub fn as_str(&self) -> &str {
        &self.src
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.src.split(SEPARATOR).filter(|comp| !comp.is_empty())
    }

    pub fn parent(&self) -> Option<GridPath> {
        if self.is_root() {
            return None;
        }
        self.src.rfind(SEPARATOR).map(|index| {
            if index == 0 {
                GridPath::root()
            } else {
                GridPath {
                    src: self.src[..index].to_string().into(),
                }
            }
        })
    }

    /// Final component, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.src.rfind(SEPARATOR).map(|index| &self.src[index + 1..])
    }

    /// Append a single bare component. Names containing separators belong in
    /// [`GridPath::resolve`] instead.
    pub fn join(&self, name: &str) -> GridPath {
        let mut joined = String::with_capacity(self.src.len() + name.len() + 1);
        if !self.is_root() {
            joined.push_str(&self.src);
        }
        joined.push(SEPARATOR);
        joined.push_str(name);
        GridPath {
            src: joined.into(),
        }
    }
}

impl std::fmt::Display for GridPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.src.fmt(f)
    }
}
