use gfs_client::{delete::RecursiveDeleter, session::Session, GridResult};

/// What one command-line target resolves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Path,
    Container,
    Uri,
}

/// Resolve one target against the session and run the deleter over it.
///
/// `Ok(false)` is the reportable per-target failure; `Err` is a resolution
/// fault, which callers treat as fatal to the whole batch.
pub async fn delete_target(
    session: &Session,
    deleter: &RecursiveDeleter,
    kind: TargetKind,
    target: &str,
) -> GridResult<bool> {
    let handle = match kind {
        TargetKind::Path => session.open_path(target).await?,
        TargetKind::Container => session.open_container(target).await?,
        TargetKind::Uri => session.open_uri(target).await?,
    };

    Ok(deleter.delete(handle.as_ref()).await)
}
