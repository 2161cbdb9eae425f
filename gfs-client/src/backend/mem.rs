use std::sync::{Arc, Mutex};

use ahash::AHashMap;
use async_trait::async_trait;

use crate::{
    error::GridError,
    file::{GridFile, GridFileSystem},
    path::GridPath,
    GridResult,
};

/// Which kind of node a grid entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Container,
}

#[derive(Debug, Clone)]
struct MemNode {
    kind: NodeKind,
    protected: bool,
}

/// In-memory grid filesystem.
///
/// Cloning yields another handle onto the same store, which is how tests and
/// demo sessions observe what a delete run left behind. The root container
/// `/` always exists and refuses deletion; `protect` marks any other node as
/// undeletable to stand in for remote-side faults.
#[derive(Debug, Clone)]
pub struct MemFs {
    nodes: Arc<Mutex<AHashMap<GridPath, MemNode>>>,
}

impl MemFs {
    pub fn new() -> MemFs {
        let mut nodes = AHashMap::new();
        nodes.insert(
            GridPath::root(),
            MemNode {
                kind: NodeKind::Container,
                protected: true,
            },
        );
        MemFs {
            nodes: Arc::new(Mutex::new(nodes)),
        }
    }

    /// Create a node under an existing container.
    pub fn create(&self, path: &GridPath, kind: NodeKind) -> GridResult<()> {
        let Some(parent) = path.parent() else {
            return Err(GridError::AlreadyExists);
        };

        let mut nodes = self.nodes.lock().unwrap();
        match nodes.get(&parent) {
            Some(node) if node.kind == NodeKind::Container => {}
            _ => return Err(GridError::NotFound),
        }
        if nodes.contains_key(path) {
            return Err(GridError::AlreadyExists);
        }

        nodes.insert(
            path.clone(),
            MemNode {
                kind,
                protected: false,
            },
        );
        Ok(())
    }

    /// Mark the node undeletable, simulating a remote-side refusal.
    pub fn protect(&self, path: &GridPath) -> GridResult<()> {
        let mut nodes = self.nodes.lock().unwrap();
        match nodes.get_mut(path) {
            Some(node) => {
                node.protected = true;
                Ok(())
            }
            None => Err(GridError::NotFound),
        }
    }

    pub fn contains(&self, path: &GridPath) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }

    /// Number of nodes in the store, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.lock().unwrap().len()
    }

    fn kind_of(&self, path: &GridPath) -> Option<NodeKind> {
        self.nodes.lock().unwrap().get(path).map(|node| node.kind)
    }

    fn children_of(&self, path: &GridPath) -> Vec<GridPath> {
        let nodes = self.nodes.lock().unwrap();
        let mut children: Vec<GridPath> = nodes
            .keys()
            .filter(|candidate| candidate.parent().as_ref() == Some(path))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        children
    }

    fn remove(&self, path: &GridPath) -> GridResult<()> {
        let mut nodes = self.nodes.lock().unwrap();

        let Some(node) = nodes.get(path) else {
            return Err(GridError::NotFound);
        };
        if node.protected {
            return Err(GridError::PermissionDenied);
        }
        if node.kind == NodeKind::Container {
            let occupied = nodes
                .keys()
                .any(|candidate| candidate.parent().as_ref() == Some(path));
            if occupied {
                return Err(GridError::NotEmpty);
            }
        }

        nodes.remove(path);
        Ok(())
    }
}

impl Default for MemFs {
    fn default() -> MemFs {
        MemFs::new()
    }
}

#[async_trait]
impl GridFileSystem for MemFs {
    async fn open(&self, path: GridPath) -> GridResult<Box<dyn GridFile>> {
        Ok(Box::new(MemFile {
            fs: self.clone(),
            path,
        }))
    }

    async fn container(&self, name: &str) -> GridResult<Box<dyn GridFile>> {
        self.open(GridPath::root().join(name)).await
    }
}

struct MemFile {
    fs: MemFs,
    path: GridPath,
}

#[async_trait]
impl GridFile for MemFile {
    fn path(&self) -> &GridPath {
        &self.path
    }

    async fn is_container(&self) -> GridResult<bool> {
        match self.fs.kind_of(&self.path) {
            Some(kind) => Ok(kind == NodeKind::Container),
            None => Err(GridError::NotFound),
        }
    }

    async fn list_children(&self) -> GridResult<Vec<Box<dyn GridFile>>> {
        if self.fs.kind_of(&self.path) != Some(NodeKind::Container) {
            return Err(GridError::NotFound);
        }
        Ok(self
            .fs
            .children_of(&self.path)
            .into_iter()
            .map(|child| {
                Box::new(MemFile {
                    fs: self.fs.clone(),
                    path: child,
                }) as Box<dyn GridFile>
            })
            .collect())
    }

    async fn delete(&self) -> GridResult<()> {
        self.fs.remove(&self.path)
    }
}
