use faststr::FastStr;

#[derive(Debug)]
pub enum GridError {
    NotFound,
    NotEmpty,
    PermissionDenied,
    AlreadyExists,
    InvalidPath(FastStr),
    InvalidUri(FastStr),
    UnknownScheme(FastStr),
    Io(std::io::Error),
}

impl std::error::Error for GridError {}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::NotFound => "No such file or container".fmt(f),
            GridError::NotEmpty => "Container is not empty".fmt(f),
            GridError::PermissionDenied => "Permission denied".fmt(f),
            GridError::AlreadyExists => "File or container exists".fmt(f),
            GridError::InvalidPath(path) => write!(f, "Invalid grid path: {}", path),
            GridError::InvalidUri(uri) => write!(f, "Invalid grid uri: {}", uri),
            GridError::UnknownScheme(scheme) => {
                write!(f, "No filesystem mounted for scheme: {}", scheme)
            }
            GridError::Io(err) => err.fmt(f),
        }
    }
}

impl From<std::io::Error> for GridError {
    fn from(value: std::io::Error) -> Self {
        GridError::Io(value)
    }
}
