use std::fs;
use std::path::Path;

use aerogen_scene::{SceneDescriptor, create_scene, naming};
use image::RgbImage;
use rand::Rng;

use crate::error::PipelineError;
use crate::render::render_scene;

/// Persist one scene's image/metadata pair under `root`.
pub fn write_scene(root: &Path, scene: &SceneDescriptor, image: &RgbImage) -> Result<(), PipelineError> {
    fs::create_dir_all(root)?;
    image.save(root.join(naming::image_name(scene.scene_id)))?;
    let json = serde_json::to_string_pretty(scene)?;
    fs::write(root.join(naming::metadata_name(scene.scene_id)), json)?;
    Ok(())
}

/// Create, render and persist a single scene. I/O failures surface to the
/// caller; nothing is retried.
pub fn generate_scene<R: Rng>(
    root: &Path,
    scene_id: u32,
    resolution: [u32; 2],
    rng: &mut R,
) -> Result<SceneDescriptor, PipelineError> {
    let scene = create_scene(scene_id, resolution, rng);
    let image = render_scene(&scene);
    write_scene(root, &scene, &image)?;
    Ok(scene)
}

/// Generate scenes `0..count` sequentially. A failed scene is logged and
/// skipped; the remaining ids still run.
pub fn generate_scenes<R: Rng>(
    root: &Path,
    count: u32,
    resolution: [u32; 2],
    rng: &mut R,
) -> Vec<SceneDescriptor> {
    let mut scenes = Vec::with_capacity(count as usize);
    for scene_id in 0..count {
        match generate_scene(root, scene_id, resolution, rng) {
            Ok(scene) => {
                log::info!(
                    "scene {scene_id} generated: {} ({} objects)",
                    naming::image_name(scene_id),
                    scene.objects.len()
                );
                scenes.push(scene);
            }
            Err(err) => log::warn!("scene {scene_id} failed: {err}"),
        }
    }
    scenes
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerogen_scene::DEFAULT_RESOLUTION;
    use image::GenericImageView;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static SCRATCH: AtomicU32 = AtomicU32::new(0);

    fn scratch_dir(label: &str) -> PathBuf {
        let n = SCRATCH.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "aerogen_generate_{label}_{}_{n}",
            std::process::id()
        ))
    }

    #[test]
    fn write_scene_produces_image_and_metadata() {
        let root = scratch_dir("pair");
        let mut rng = StdRng::seed_from_u64(21);
        let scene = create_scene(0, DEFAULT_RESOLUTION, &mut rng);
        let image = render_scene(&scene);
        write_scene(&root, &scene, &image).expect("write scene");

        assert!(root.join("scene_000.png").is_file());
        let raw = fs::read_to_string(root.join("scene_000.json")).expect("read metadata");
        let back: SceneDescriptor = serde_json::from_str(&raw).expect("parse metadata");
        assert_eq!(back, scene);

        fs::remove_dir_all(&root).expect("cleanup scratch dir");
    }

    #[test]
    fn generate_scenes_writes_every_id() {
        let root = scratch_dir("batch");
        let mut rng = StdRng::seed_from_u64(2);
        let scenes = generate_scenes(&root, 3, DEFAULT_RESOLUTION, &mut rng);

        assert_eq!(scenes.len(), 3);
        for id in 0..3 {
            assert!(root.join(naming::image_name(id)).is_file());
            assert!(root.join(naming::metadata_name(id)).is_file());
        }

        fs::remove_dir_all(&root).expect("cleanup scratch dir");
    }

    #[test]
    fn written_image_decodes_at_camera_resolution() {
        let root = scratch_dir("decode");
        let mut rng = StdRng::seed_from_u64(8);
        generate_scene(&root, 2, [160, 120], &mut rng).expect("generate scene");

        let decoded = image::open(root.join("scene_002.png")).expect("decode written png");
        assert_eq!(decoded.width(), 160);
        assert_eq!(decoded.height(), 120);

        fs::remove_dir_all(&root).expect("cleanup scratch dir");
    }
}
