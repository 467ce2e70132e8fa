//! Derived-annotation synthesis: segmentation mask, depth map and
//! normalized bounding boxes for an already-rendered scene.

use std::fs;
use std::path::Path;

use aerogen_raster::{fill_circle, fill_rect};
use aerogen_scene::naming::{ArtifactKind, CompanionKind, classify, companion_name};
use aerogen_scene::{CameraPose, ObjectKind, SceneDescriptor, SceneObject};
use image::{GenericImageView, GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Horizontal spacing of the simplified annotation layout.
const LAYOUT_STEP: i32 = 80;
const DEPTH_BACKGROUND: u8 = 128;
const DEPTH_RADIUS: i32 = 40;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// Index of the object in the scene's object sequence.
    pub object_id: u32,
    pub class: String,
    /// Normalized [x, y, w, h] in 0..1 image coordinates.
    pub bbox: [f32; 4],
    /// World position carried through from the scene object.
    pub position: [f32; 3],
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotationRecord {
    pub image_file: String,
    pub metadata_file: String,
    pub image_size: [u32; 2],
    pub segmentation_mask: String,
    pub bounding_boxes: Vec<BoundingBox>,
    pub depth_map: String,
    pub camera_pose: CameraPose,
}

/// Annotate one scene image: read it and its metadata, derive the mask,
/// depth map and boxes, then write the three companion artifacts.
///
/// Unreadable input fails before anything is written, so a scene never ends
/// up with a partial annotation set.
pub fn annotate_scene(root: &Path, image_name: &str) -> Result<AnnotationRecord, PipelineError> {
    let image_path = root.join(image_name);
    if !image_path.is_file() {
        return Err(PipelineError::MissingArtifact(image_path));
    }
    let image = image::open(&image_path)?;
    let (width, height) = image.dimensions();

    let metadata_name = companion_name(CompanionKind::Metadata, image_name);
    let metadata_path = root.join(&metadata_name);
    if !metadata_path.is_file() {
        return Err(PipelineError::MissingArtifact(metadata_path));
    }
    let scene: SceneDescriptor = serde_json::from_str(&fs::read_to_string(&metadata_path)?)?;

    let mask = segmentation_mask(width, height, &scene.objects);
    let depth = depth_map(width, height, &scene.objects);

    let record = AnnotationRecord {
        image_file: image_name.to_string(),
        metadata_file: metadata_name,
        image_size: [width, height],
        segmentation_mask: companion_name(CompanionKind::Mask, image_name),
        bounding_boxes: bounding_boxes(&scene.objects),
        depth_map: companion_name(CompanionKind::Depth, image_name),
        camera_pose: scene.camera_parameters,
    };

    mask.save(root.join(&record.segmentation_mask))?;
    depth.save(root.join(&record.depth_map))?;
    let annotation_name = companion_name(CompanionKind::Annotations, image_name);
    fs::write(
        root.join(annotation_name),
        serde_json::to_string_pretty(&record)?,
    )?;

    Ok(record)
}

/// Annotate every scene image under `root` that has a metadata companion.
/// Per-scene failures are logged and enumeration continues.
pub fn annotate_all(root: &Path) -> Result<Vec<AnnotationRecord>, PipelineError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if let Ok(name) = entry.file_name().into_string() {
            if classify(&name) == ArtifactKind::SceneImage {
                names.push(name);
            }
        }
    }
    names.sort();

    let mut records = Vec::new();
    for name in names {
        let metadata = root.join(companion_name(CompanionKind::Metadata, &name));
        if !metadata.is_file() {
            continue;
        }
        match annotate_scene(root, &name) {
            Ok(record) => {
                log::info!(
                    "annotated {name}: {} boxes",
                    record.bounding_boxes.len()
                );
                records.push(record);
            }
            Err(err) => log::warn!("annotation failed for {name}: {err}"),
        }
    }
    Ok(records)
}

/// Canvas x of object `index` out of `count`: the layout centers the row of
/// objects horizontally instead of projecting world positions.
fn layout_anchor(index: usize, count: usize, width: u32) -> i32 {
    (width / 2) as i32 + (index as i32 - (count / 2) as i32) * LAYOUT_STEP
}

fn segmentation_mask(width: u32, height: u32, objects: &[SceneObject]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let cy = (height / 2) as i32;

    for (i, object) in objects.iter().enumerate() {
        let x = layout_anchor(i, objects.len(), width);
        let value = Luma([object.kind.class_id()]);
        match object.kind {
            ObjectKind::Building => fill_rect(&mut mask, x - 30, cy - 50, x + 30, cy, value),
            ObjectKind::Tree => fill_circle(&mut mask, x, cy, 25, value),
            ObjectKind::Obstacle => fill_rect(&mut mask, x - 20, cy - 20, x + 20, cy + 20, value),
        }
    }
    mask
}

fn depth_map(width: u32, height: u32, objects: &[SceneObject]) -> GrayImage {
    let mut depth = GrayImage::from_pixel(width, height, Luma([DEPTH_BACKGROUND]));
    let cy = (height / 2) as i32;

    for i in 0..objects.len() {
        let x = layout_anchor(i, objects.len(), width);
        // Later objects read as farther away.
        let value = (150 - i as i32 * 20).clamp(50, 200) as u8;
        fill_circle(&mut depth, x, cy, DEPTH_RADIUS, Luma([value]));
    }
    depth
}

fn bounding_boxes(objects: &[SceneObject]) -> Vec<BoundingBox> {
    objects
        .iter()
        .enumerate()
        .map(|(i, object)| BoundingBox {
            object_id: i as u32,
            class: object.kind.to_string(),
            bbox: [0.3 + i as f32 * 0.1, 0.4, 0.1, 0.2],
            position: object.position,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_scene;
    use aerogen_scene::{DEFAULT_RESOLUTION, SceneType, generate_objects};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static SCRATCH: AtomicU32 = AtomicU32::new(0);

    fn scratch_dir(label: &str) -> PathBuf {
        let n = SCRATCH.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "aerogen_annotate_{label}_{}_{n}",
            std::process::id()
        ))
    }

    #[test]
    fn boxes_are_index_aligned_with_objects() {
        let mut rng = StdRng::seed_from_u64(4);
        let objects = generate_objects(SceneType::Forest, &mut rng);
        let boxes = bounding_boxes(&objects);

        assert_eq!(boxes.len(), objects.len());
        for (i, bbox) in boxes.iter().enumerate() {
            assert_eq!(bbox.object_id, i as u32);
            assert_eq!(bbox.class, objects[i].kind.to_string());
            assert_eq!(bbox.position, objects[i].position);
            assert!((bbox.bbox[0] - (0.3 + i as f32 * 0.1)).abs() < 1e-6);
        }
    }

    #[test]
    fn mask_uses_class_ids_and_zero_background() {
        let mut rng = StdRng::seed_from_u64(4);
        let objects = generate_objects(SceneType::Urban, &mut rng);
        let mask = segmentation_mask(640, 480, &objects);

        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        // Center object sits at the canvas center; buildings stamp class 1.
        assert_eq!(mask.get_pixel(320, 230).0[0], 1);
        let values: std::collections::BTreeSet<u8> = mask.pixels().map(|p| p.0[0]).collect();
        assert!(values.iter().all(|v| *v == 0 || *v == 1));
    }

    #[test]
    fn depth_values_decrease_with_index_and_clamp() {
        let mut rng = StdRng::seed_from_u64(4);
        let objects = generate_objects(SceneType::Forest, &mut rng);
        let depth = depth_map(640, 480, &objects);

        assert_eq!(depth.get_pixel(0, 0).0[0], DEPTH_BACKGROUND);
        // Index 0 of 8: anchor at 320 + (0 - 4) * 80 = 0, value 150.
        assert_eq!(depth.get_pixel(0, 240).0[0], 150);
        // Index 7: anchor at 560, value clamps at the 50 floor (150 - 140 = 10).
        assert_eq!(depth.get_pixel(560, 240).0[0], 50);
    }

    #[test]
    fn annotate_scene_writes_all_three_companions() {
        let root = scratch_dir("full");
        let mut rng = StdRng::seed_from_u64(17);
        generate_scene(&root, 0, DEFAULT_RESOLUTION, &mut rng).expect("generate scene");

        let record = annotate_scene(&root, "scene_000.png").expect("annotate scene");
        assert_eq!(record.image_file, "scene_000.png");
        assert_eq!(record.metadata_file, "scene_000.json");
        assert_eq!(record.image_size, [640, 480]);
        assert_eq!(record.segmentation_mask, "mask_scene_000.png");
        assert_eq!(record.depth_map, "depth_scene_000.png");
        assert_eq!(record.bounding_boxes.len(), 5);

        assert!(root.join("scene_000_annotations.json").is_file());
        assert!(root.join("mask_scene_000.png").is_file());
        assert!(root.join("depth_scene_000.png").is_file());

        let raw = fs::read_to_string(root.join("scene_000_annotations.json")).expect("read record");
        let back: AnnotationRecord = serde_json::from_str(&raw).expect("parse record");
        assert_eq!(back, record);

        fs::remove_dir_all(&root).expect("cleanup scratch dir");
    }

    #[test]
    fn annotate_scene_fails_without_metadata_and_writes_nothing() {
        let root = scratch_dir("missing");
        fs::create_dir_all(&root).expect("create scratch dir");
        let image = image::RgbImage::new(64, 48);
        image.save(root.join("scene_000.png")).expect("write png");

        let err = annotate_scene(&root, "scene_000.png").expect_err("expected missing metadata");
        assert!(matches!(err, PipelineError::MissingArtifact(_)));
        assert!(!root.join("scene_000_annotations.json").exists());
        assert!(!root.join("mask_scene_000.png").exists());

        fs::remove_dir_all(&root).expect("cleanup scratch dir");
    }

    #[test]
    fn annotate_all_skips_images_without_metadata() {
        let root = scratch_dir("skip");
        let mut rng = StdRng::seed_from_u64(9);
        generate_scene(&root, 0, DEFAULT_RESOLUTION, &mut rng).expect("generate scene");
        // A second image with no metadata companion should be skipped.
        image::RgbImage::new(32, 32)
            .save(root.join("scene_001.png"))
            .expect("write orphan png");

        let records = annotate_all(&root).expect("annotate all");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].image_file, "scene_000.png");

        fs::remove_dir_all(&root).expect("cleanup scratch dir");
    }
}
