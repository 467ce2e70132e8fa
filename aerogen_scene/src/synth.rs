//! Deterministic scene construction.
//!
//! Object counts are fixed per scene type; placement is stochastic for every
//! type except `urban`, drawn from the caller-supplied random source. Pass a
//! seeded `StdRng` for reproducible datasets.

use chrono::Utc;
use rand::Rng;

use crate::descriptor::{CameraPose, ObjectKind, SceneDescriptor, SceneObject, SceneType};

pub const DEFAULT_RESOLUTION: [u32; 2] = [640, 480];

const BASE_ALTITUDE: f32 = 100.0;
const ALTITUDE_STEP: f32 = 50.0;

/// Build the descriptor for `scene_id`: type from the round-robin cycle, a
/// straight-down camera whose altitude grows linearly with the id, and the
/// type-specific object population.
pub fn create_scene<R: Rng>(scene_id: u32, resolution: [u32; 2], rng: &mut R) -> SceneDescriptor {
    let scene_type = SceneType::for_scene(scene_id);
    SceneDescriptor {
        scene_id,
        scene_type,
        timestamp: Utc::now().to_rfc3339(),
        camera_parameters: CameraPose {
            position: [0.0, 0.0, BASE_ALTITUDE + scene_id as f32 * ALTITUDE_STEP],
            rotation: [-90.0, 0.0, 0.0],
            fov: 90.0,
            resolution,
        },
        objects: generate_objects(scene_type, rng),
        lighting_conditions: "daylight".to_string(),
    }
}

/// Populate a scene of the given type. Urban blocks are evenly spaced with
/// increasing height; everything else scatters uniformly within its bounds.
pub fn generate_objects<R: Rng>(scene_type: SceneType, rng: &mut R) -> Vec<SceneObject> {
    match scene_type {
        SceneType::Urban => (0..5)
            .map(|i| SceneObject {
                kind: ObjectKind::Building,
                position: [i as f32 * 200.0 - 400.0, 0.0, 0.0],
                size: [100.0, 100.0, 150.0 + i as f32 * 50.0],
                color: [100, 100, 100],
            })
            .collect(),
        SceneType::Forest => (0..8)
            .map(|_| SceneObject {
                kind: ObjectKind::Tree,
                position: [
                    rng.gen_range(-300..300) as f32,
                    rng.gen_range(-300..300) as f32,
                    0.0,
                ],
                size: [40.0, 40.0, (100 + rng.gen_range(0..50)) as f32],
                color: [0, 100 + rng.gen_range(0..50u8), 0],
            })
            .collect(),
        SceneType::OpenField | SceneType::Industrial | SceneType::Residential => (0..3)
            .map(|_| SceneObject {
                kind: ObjectKind::Obstacle,
                position: [
                    rng.gen_range(-200..200) as f32,
                    rng.gen_range(-200..200) as f32,
                    0.0,
                ],
                size: [50.0, 50.0, (30 + rng.gen_range(0..70)) as f32],
                color: [
                    rng.gen_range(50..150u8),
                    rng.gen_range(50..150u8),
                    rng.gen_range(50..150u8),
                ],
            })
            .collect(),
    }
}
