use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub enum PipelineError {
    Io(std::io::Error),
    Image(image::ImageError),
    Json(serde_json::Error),
    MissingArtifact(PathBuf),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Image(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::MissingArtifact(path) => {
                write!(f, "required artifact missing: {}", path.display())
            }
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<image::ImageError> for PipelineError {
    fn from(value: image::ImageError) -> Self {
        Self::Image(value)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
