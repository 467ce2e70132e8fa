use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum ValidateError {
    MissingDirectory(PathBuf),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for ValidateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDirectory(path) => {
                write!(f, "dataset directory does not exist: {}", path.display())
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ValidateError {}

impl From<std::io::Error> for ValidateError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ValidateError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
