use async_trait::async_trait;

use crate::{path::GridPath, GridResult};

/// One node in a grid namespace, file or container alike.
///
/// A handle is a lazy reference: building one touches nothing remote, and it
/// may point at a node that no longer exists. Every query reports faults
/// through [`GridResult`] and leaves the caller to decide how far to degrade.
#[async_trait]
pub trait GridFile: Send + Sync {
    /// Absolute path of the node inside its filesystem.
    fn path(&self) -> &GridPath;

    /// Whether the node currently denotes a container.
    async fn is_container(&self) -> GridResult<bool>;

    /// Direct children of the node, in whatever order the backing yields.
    async fn list_children(&self) -> GridResult<Vec<Box<dyn GridFile>>>;

    /// Remove this node only. Removing a non-empty container is expected to
    /// fail; emptying it first is the caller's job.
    async fn delete(&self) -> GridResult<()>;
}

/// A mountable grid filesystem: hands out [`GridFile`] handles and owns the
/// remote connection lifecycle. Reference backings keep `connect` and `close`
/// as no-ops; a networked client opens and releases its link here.
#[async_trait]
pub trait GridFileSystem: Send + Sync {
    async fn connect(&self) -> GridResult<()> {
        Ok(())
    }

    async fn close(&self) -> GridResult<()> {
        Ok(())
    }

    /// Handle for the node at `path`.
    async fn open(&self, path: GridPath) -> GridResult<Box<dyn GridFile>>;

    /// Handle for a top-level container, addressed by bare name.
    async fn container(&self, name: &str) -> GridResult<Box<dyn GridFile>>;
}
