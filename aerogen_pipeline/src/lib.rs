mod annotate;
mod error;
mod generate;
mod render;

pub use annotate::{AnnotationRecord, BoundingBox, annotate_all, annotate_scene};
pub use error::PipelineError;
pub use generate::{generate_scene, generate_scenes, write_scene};
pub use render::render_scene;
