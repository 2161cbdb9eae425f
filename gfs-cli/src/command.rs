use clap::{Parser, ValueEnum};
use gfs_client::delete::SuccessPolicy;

#[derive(Debug, Parser)]
#[command(
    name = "gfs-delete",
    version,
    about = "Recursively delete grid files, directories and containers"
)]
pub struct DeleteCommand {
    /// treat every target as a top-level container name
    #[arg(short, long)]
    pub container: bool,

    /// resolve a single target through a URI; its scheme picks the backing filesystem
    #[arg(short, long, conflicts_with = "container")]
    pub uri: Option<String>,

    /// how sibling failures fold into a container's result
    #[arg(long, value_enum, default_value_t = PolicyArg::RequireAll)]
    pub policy: PolicyArg,

    /// paths (or container names with -c) to delete
    #[arg(required_unless_present = "uri", conflicts_with = "uri")]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// every child must delete for a container to count as deleted
    RequireAll,
    /// only the last child's outcome counts (legacy behavior)
    LastChild,
}

impl From<PolicyArg> for SuccessPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::RequireAll => SuccessPolicy::RequireAll,
            PolicyArg::LastChild => SuccessPolicy::LastChild,
        }
    }
}
