mod descriptor;
pub mod naming;
mod synth;

pub use descriptor::{CameraPose, ObjectKind, SceneDescriptor, SceneObject, SceneType};
pub use synth::{DEFAULT_RESOLUTION, create_scene, generate_objects};
