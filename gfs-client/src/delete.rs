use async_recursion::async_recursion;

use crate::file::GridFile;

/// How a container folds child outcomes into its own success flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessPolicy {
    /// A container counts as deleted only if every child did. The default.
    RequireAll,
    /// Each child outcome overwrites the flag, so only the last sibling
    /// counts. Reproduces the historical behavior of the tool for runs that
    /// need to stay byte-compatible with it.
    LastChild,
}

impl SuccessPolicy {
    fn fold(&self, acc: bool, child: bool) -> bool {
        match self {
            SuccessPolicy::RequireAll => acc && child,
            SuccessPolicy::LastChild => child,
        }
    }
}

/// Best-effort deepest-first deletion over [`GridFile`] handles.
///
/// The walk never stops early: every reachable node gets exactly one delete
/// attempt, and collaborator faults degrade to a `false` result at the node
/// where they happened instead of aborting the run.
#[derive(Debug, Clone, Copy)]
pub struct RecursiveDeleter {
    policy: SuccessPolicy,
}

impl RecursiveDeleter {
    pub fn new(policy: SuccessPolicy) -> RecursiveDeleter {
        RecursiveDeleter { policy }
    }

    /// Delete `file` and, if it is a container, all of its descendants first.
    ///
    /// Returns whether the subtree rooted at `file` is gone, judged under the
    /// configured [`SuccessPolicy`]. The node's own delete attempt always
    /// runs, but once the child fold has failed the subtree result stays
    /// `false` whatever that attempt reports.
    #[async_recursion]
    pub async fn delete(&self, file: &dyn GridFile) -> bool {
        let mut success = true;

        if self.is_container(file).await {
            match file.list_children().await {
                Ok(children) => {
                    for child in &children {
                        let removed = self.delete(child.as_ref()).await;
                        success = self.policy.fold(success, removed);
                    }
                }
                Err(err) => {
                    // No listing, no recursion. The self-delete below still runs.
                    tracing::debug!(path = %file.path(), error = %err, "child listing unavailable");
                }
            }
        }

        let removed = self.delete_node(file).await;
        if success {
            removed
        } else {
            false
        }
    }

    async fn is_container(&self, file: &dyn GridFile) -> bool {
        match file.is_container().await {
            Ok(container) => container,
            Err(err) => {
                tracing::debug!(path = %file.path(), error = %err, "container query failed, treating as leaf");
                false
            }
        }
    }

    async fn delete_node(&self, file: &dyn GridFile) -> bool {
        match file.delete().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(path = %file.path(), error = %err, "delete failed");
                false
            }
        }
    }
}

impl Default for RecursiveDeleter {
    fn default() -> RecursiveDeleter {
        RecursiveDeleter::new(SuccessPolicy::RequireAll)
    }
}

/// [`RecursiveDeleter`] under [`SuccessPolicy::RequireAll`], for callers
/// without a configuration surface.
pub async fn delete_recursive(file: &dyn GridFile) -> bool {
    RecursiveDeleter::default().delete(file).await
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::{delete_recursive, RecursiveDeleter, SuccessPolicy};
    use crate::{error::GridError, file::GridFile, path::GridPath, GridResult};

    type EventLog = Arc<Mutex<Vec<String>>>;

    #[derive(Clone)]
    struct FakeFile {
        path: GridPath,
        container: bool,
        children: Vec<FakeFile>,
        fail_delete: bool,
        fail_listing: bool,
        fail_container_query: bool,
        log: EventLog,
    }

    impl FakeFile {
        fn leaf(path: &str, log: &EventLog) -> FakeFile {
            FakeFile {
                path: GridPath::parse(path).unwrap(),
                container: false,
                children: vec![],
                fail_delete: false,
                fail_listing: false,
                fail_container_query: false,
                log: log.clone(),
            }
        }

        fn container(path: &str, children: Vec<FakeFile>, log: &EventLog) -> FakeFile {
            FakeFile {
                container: true,
                children,
                ..FakeFile::leaf(path, log)
            }
        }

        fn undeletable(mut self) -> FakeFile {
            self.fail_delete = true;
            self
        }
    }

    #[async_trait]
    impl GridFile for FakeFile {
        fn path(&self) -> &GridPath {
            &self.path
        }

        async fn is_container(&self) -> GridResult<bool> {
            if self.fail_container_query {
                return Err(GridError::NotFound);
            }
            Ok(self.container)
        }

        async fn list_children(&self) -> GridResult<Vec<Box<dyn GridFile>>> {
            if self.fail_listing {
                return Err(GridError::PermissionDenied);
            }
            Ok(self
                .children
                .iter()
                .cloned()
                .map(|child| Box::new(child) as Box<dyn GridFile>)
                .collect())
        }

        async fn delete(&self) -> GridResult<()> {
            self.log.lock().unwrap().push(self.path.as_str().to_string());
            if self.fail_delete {
                return Err(GridError::PermissionDenied);
            }
            Ok(())
        }
    }

    fn log() -> EventLog {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn deletions(log: &EventLog) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn leaf_deleted_exactly_once() {
        let log = log();
        let file = FakeFile::leaf("/a/x", &log);

        assert!(delete_recursive(&file).await);
        assert_eq!(vec!["/a/x"], deletions(&log));
    }

    #[tokio::test]
    async fn leaf_failure_reports_false() {
        let log = log();
        let file = FakeFile::leaf("/a/x", &log).undeletable();

        assert!(!delete_recursive(&file).await);
        assert_eq!(vec!["/a/x"], deletions(&log));
    }

    #[tokio::test]
    async fn container_deleted_deepest_first() {
        let log = log();
        let root = FakeFile::container(
            "/a",
            vec![FakeFile::leaf("/a/x", &log), FakeFile::leaf("/a/y", &log)],
            &log,
        );

        assert!(delete_recursive(&root).await);
        assert_eq!(vec!["/a/x", "/a/y", "/a"], deletions(&log));
    }

    #[tokio::test]
    async fn nested_branches_bottom_up() {
        let log = log();
        let root = FakeFile::container(
            "/a",
            vec![
                FakeFile::container(
                    "/a/b",
                    vec![FakeFile::leaf("/a/b/c", &log), FakeFile::leaf("/a/b/d", &log)],
                    &log,
                ),
                FakeFile::leaf("/a/e", &log),
            ],
            &log,
        );

        assert!(delete_recursive(&root).await);
        assert_eq!(vec!["/a/b/c", "/a/b/d", "/a/b", "/a/e", "/a"], deletions(&log));
    }

    #[tokio::test]
    async fn sibling_failure_does_not_stop_the_walk() {
        let log = log();
        let root = FakeFile::container(
            "/b",
            vec![
                FakeFile::leaf("/b/x", &log),
                FakeFile::leaf("/b/y", &log).undeletable(),
            ],
            &log,
        );

        assert!(!delete_recursive(&root).await);
        // y failed, but x was removed and b itself still got its attempt
        assert_eq!(vec!["/b/x", "/b/y", "/b"], deletions(&log));
    }

    #[tokio::test]
    async fn policies_diverge_on_early_failure() {
        // children [fail, succeed]: the legacy flag only remembers the last one
        let strict_log = log();
        let root = FakeFile::container(
            "/a",
            vec![
                FakeFile::leaf("/a/x", &strict_log).undeletable(),
                FakeFile::leaf("/a/y", &strict_log),
            ],
            &strict_log,
        );
        assert!(!RecursiveDeleter::new(SuccessPolicy::RequireAll).delete(&root).await);
        assert_eq!(vec!["/a/x", "/a/y", "/a"], deletions(&strict_log));

        let legacy_log = log();
        let root = FakeFile::container(
            "/a",
            vec![
                FakeFile::leaf("/a/x", &legacy_log).undeletable(),
                FakeFile::leaf("/a/y", &legacy_log),
            ],
            &legacy_log,
        );
        assert!(RecursiveDeleter::new(SuccessPolicy::LastChild).delete(&root).await);
        assert_eq!(vec!["/a/x", "/a/y", "/a"], deletions(&legacy_log));
    }

    #[tokio::test]
    async fn both_policies_fail_on_last_child_failure() {
        for policy in [SuccessPolicy::RequireAll, SuccessPolicy::LastChild] {
            let log = log();
            let root = FakeFile::container(
                "/a",
                vec![
                    FakeFile::leaf("/a/x", &log),
                    FakeFile::leaf("/a/y", &log).undeletable(),
                ],
                &log,
            );
            assert!(!RecursiveDeleter::new(policy).delete(&root).await);
            assert_eq!(vec!["/a/x", "/a/y", "/a"], deletions(&log));
        }
    }

    #[tokio::test]
    async fn listing_fault_skips_recursion_only() {
        let log = log();
        let mut root = FakeFile::container("/a", vec![FakeFile::leaf("/a/x", &log)], &log);
        root.fail_listing = true;

        // children unreachable, so only the node itself is attempted and its
        // own outcome decides
        assert!(delete_recursive(&root).await);
        assert_eq!(vec!["/a"], deletions(&log));
    }

    #[tokio::test]
    async fn container_query_fault_degrades_to_leaf() {
        let log = log();
        let mut root = FakeFile::container("/a", vec![FakeFile::leaf("/a/x", &log)], &log);
        root.fail_container_query = true;

        assert!(delete_recursive(&root).await);
        assert_eq!(vec!["/a"], deletions(&log));
    }

    #[tokio::test]
    async fn empty_container_is_just_deleted() {
        let log = log();
        let root = FakeFile::container("/empty", vec![], &log);

        assert!(delete_recursive(&root).await);
        assert_eq!(vec!["/empty"], deletions(&log));
    }
}
