mod local;
mod mem;

pub use local::LocalFs;
pub use mem::{MemFs, NodeKind};

pub mod cfg {
    /// Scheme the local disk backing mounts under.
    pub const LOCAL_SCHEME: &str = "file";

    /// Scheme the in-memory reference backing mounts under.
    pub const MEM_SCHEME: &str = "mem";
}
