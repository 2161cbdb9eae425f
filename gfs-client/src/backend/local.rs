use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    file::{GridFile, GridFileSystem},
    path::GridPath,
    GridResult,
};

/// Grid backing over the local filesystem.
///
/// Grid paths map onto the disk below `root` (`/` by default, which makes
/// grid paths and OS paths coincide). Symlinks are never followed: a link
/// deletes as a leaf, whatever it points at.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new() -> LocalFs {
        LocalFs {
            root: PathBuf::from("/"),
        }
    }

    pub fn with_root<P: AsRef<Path>>(root: P) -> LocalFs {
        LocalFs {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn os_path(&self, path: &GridPath) -> PathBuf {
        let mut os_path = self.root.clone();
        for comp in path.components() {
            os_path.push(comp);
        }
        os_path
    }
}

impl Default for LocalFs {
    fn default() -> LocalFs {
        LocalFs::new()
    }
}

#[async_trait]
impl GridFileSystem for LocalFs {
    async fn open(&self, path: GridPath) -> GridResult<Box<dyn GridFile>> {
        Ok(Box::new(LocalFile {
            os_path: self.os_path(&path),
            path,
        }))
    }

    async fn container(&self, name: &str) -> GridResult<Box<dyn GridFile>> {
        self.open(GridPath::root().join(name)).await
    }
}

struct LocalFile {
    os_path: PathBuf,
    path: GridPath,
}

#[async_trait]
impl GridFile for LocalFile {
    fn path(&self) -> &GridPath {
        &self.path
    }

    async fn is_container(&self) -> GridResult<bool> {
        let meta = tokio::fs::symlink_metadata(&self.os_path).await?;
        Ok(meta.file_type().is_dir())
    }

    async fn list_children(&self) -> GridResult<Vec<Box<dyn GridFile>>> {
        let mut entries = tokio::fs::read_dir(&self.os_path).await?;
        let mut children: Vec<Box<dyn GridFile>> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            children.push(Box::new(LocalFile {
                os_path: entry.path(),
                path: self.path.join(&name.to_string_lossy()),
            }));
        }
        Ok(children)
    }

    async fn delete(&self) -> GridResult<()> {
        let meta = tokio::fs::symlink_metadata(&self.os_path).await?;
        if meta.file_type().is_dir() {
            tokio::fs::remove_dir(&self.os_path).await?;
        } else {
            tokio::fs::remove_file(&self.os_path).await?;
        }
        Ok(())
    }
}
