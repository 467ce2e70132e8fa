//! The five dataset checks. Each is read-only over the inventory, records
//! per-file problems as findings instead of aborting, and is independent of
//! the other four.

use std::fs;

use aerogen_scene::naming::{ArtifactKind, CompanionKind, classify, companion_name};
use image::GenericImageView;
use serde_json::Value;

use crate::inventory::Inventory;
use crate::report::{
    AnnotationFinding, CheckOutcome, ConsistencyIssue, ImageFinding, MetadataFinding,
    StructureDetails, ValidationReport,
};

const METADATA_FIELDS: [&str; 4] = ["scene_id", "scene_type", "camera_parameters", "objects"];
const ANNOTATION_FIELDS: [&str; 3] = ["image_file", "bounding_boxes", "camera_pose"];

/// How strictly the dataset is interpreted.
///
/// `Strict` is the raw checker: every `.json` without `annotations` in its
/// name must look like scene metadata (the persisted report file included),
/// and every scene image needs all four companions. `Lenient` is the
/// corrected interpretation: only files classified as metadata are held to
/// the metadata schema, and mask/depth gaps are not consistency failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    Strict,
    Lenient,
}

impl Profile {
    fn expected_companions(self) -> &'static [CompanionKind] {
        match self {
            Profile::Strict => &[
                CompanionKind::Metadata,
                CompanionKind::Annotations,
                CompanionKind::Mask,
                CompanionKind::Depth,
            ],
            Profile::Lenient => &[CompanionKind::Metadata, CompanionKind::Annotations],
        }
    }

    fn covers_metadata(self, name: &str) -> bool {
        match self {
            Profile::Strict => name.ends_with(".json") && !name.contains("annotations"),
            Profile::Lenient => classify(name) == ArtifactKind::Metadata,
        }
    }
}

/// Run all five checks over the inventory and merge them into one report.
pub fn validate(inventory: &Inventory, profile: Profile) -> ValidationReport {
    log::info!(
        "validating {} files in {} ({profile:?})",
        inventory.len(),
        inventory.root().display()
    );
    ValidationReport {
        directory_structure: check_directory_structure(inventory),
        image_files: check_image_files(inventory),
        metadata_files: check_metadata_files(inventory, profile),
        annotation_files: check_annotation_files(inventory),
        data_consistency: check_data_consistency(inventory, profile),
    }
}

fn check_directory_structure(inventory: &Inventory) -> CheckOutcome<StructureDetails> {
    let mut details = StructureDetails {
        scene_images: false,
        metadata: false,
        annotations: false,
        masks: false,
        depth_maps: false,
        total_files: 0,
    };

    for name in inventory.names() {
        if !(name.ends_with(".png") || name.ends_with(".json")) {
            continue;
        }
        details.total_files += 1;
        match classify(name) {
            ArtifactKind::SceneImage => details.scene_images = true,
            ArtifactKind::Metadata => details.metadata = true,
            ArtifactKind::Annotations => details.annotations = true,
            ArtifactKind::Mask => details.masks = true,
            ArtifactKind::Depth => details.depth_maps = true,
            ArtifactKind::Report | ArtifactKind::Other => {}
        }
    }

    CheckOutcome {
        status: details.scene_images && details.metadata && details.annotations,
        summary: format!("{} data files", details.total_files),
        details,
    }
}

fn check_image_files(inventory: &Inventory) -> CheckOutcome<Vec<ImageFinding>> {
    let files: Vec<&str> = inventory
        .names()
        .filter(|name| {
            name.ends_with(".png")
                && !matches!(classify(name), ArtifactKind::Mask | ArtifactKind::Depth)
        })
        .collect();

    if files.is_empty() {
        return CheckOutcome {
            status: false,
            summary: "no image files found".to_string(),
            details: Vec::new(),
        };
    }

    let details: Vec<ImageFinding> = files
        .iter()
        .map(|file| match image::open(inventory.path(file)) {
            Ok(decoded) => ImageFinding {
                file: file.to_string(),
                size: Some([decoded.width(), decoded.height()]),
                channels: Some(decoded.color().channel_count()),
                error: None,
            },
            Err(err) => ImageFinding {
                file: file.to_string(),
                size: None,
                channels: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    let valid = details.iter().filter(|f| f.ok()).count();
    CheckOutcome {
        status: valid == details.len(),
        summary: format!("{valid}/{} image files valid", details.len()),
        details,
    }
}

fn check_metadata_files(inventory: &Inventory, profile: Profile) -> CheckOutcome<Vec<MetadataFinding>> {
    let files: Vec<&str> = inventory
        .names()
        .filter(|name| profile.covers_metadata(name))
        .collect();

    if files.is_empty() {
        return CheckOutcome {
            status: false,
            summary: "no metadata files found".to_string(),
            details: Vec::new(),
        };
    }

    let details: Vec<MetadataFinding> = files
        .iter()
        .map(|file| match read_json(inventory, file) {
            Ok(value) => MetadataFinding {
                file: file.to_string(),
                scene_id: value.get("scene_id").and_then(Value::as_u64),
                scene_type: value
                    .get("scene_type")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                object_count: value
                    .get("objects")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len),
                missing_fields: missing_fields(&value, &METADATA_FIELDS),
                error: None,
            },
            Err(err) => MetadataFinding {
                file: file.to_string(),
                scene_id: None,
                scene_type: None,
                object_count: 0,
                missing_fields: Vec::new(),
                error: Some(err),
            },
        })
        .collect();

    let valid = details.iter().filter(|f| f.ok()).count();
    CheckOutcome {
        status: valid == details.len(),
        summary: format!("{valid}/{} metadata files valid", details.len()),
        details,
    }
}

fn check_annotation_files(inventory: &Inventory) -> CheckOutcome<Vec<AnnotationFinding>> {
    let files: Vec<&str> = inventory
        .names()
        .filter(|name| classify(name) == ArtifactKind::Annotations)
        .collect();

    if files.is_empty() {
        return CheckOutcome {
            status: false,
            summary: "no annotation files found".to_string(),
            details: Vec::new(),
        };
    }

    let details: Vec<AnnotationFinding> = files
        .iter()
        .map(|file| match read_json(inventory, file) {
            Ok(value) => AnnotationFinding {
                file: file.to_string(),
                image_file: value
                    .get("image_file")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                bbox_count: value
                    .get("bounding_boxes")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len),
                missing_fields: missing_fields(&value, &ANNOTATION_FIELDS),
                error: None,
            },
            Err(err) => AnnotationFinding {
                file: file.to_string(),
                image_file: None,
                bbox_count: 0,
                missing_fields: Vec::new(),
                error: Some(err),
            },
        })
        .collect();

    let valid = details.iter().filter(|f| f.ok()).count();
    CheckOutcome {
        status: valid == details.len(),
        summary: format!("{valid}/{} annotation files valid", details.len()),
        details,
    }
}

/// The join step: every scene image implies its companion set, and a
/// companion is missing only when its name is absent from the inventory.
/// Content problems are left to the other checks.
fn check_data_consistency(inventory: &Inventory, profile: Profile) -> CheckOutcome<Vec<ConsistencyIssue>> {
    let mut issues = Vec::new();

    for image in inventory
        .names()
        .filter(|name| classify(name) == ArtifactKind::SceneImage)
    {
        let missing: Vec<String> = profile
            .expected_companions()
            .iter()
            .map(|&kind| companion_name(kind, image))
            .filter(|companion| !inventory.contains(companion))
            .collect();

        if !missing.is_empty() {
            issues.push(ConsistencyIssue {
                image: image.to_string(),
                missing_files: missing,
            });
        }
    }

    CheckOutcome {
        status: issues.is_empty(),
        summary: if issues.is_empty() {
            "all companion artifacts present".to_string()
        } else {
            format!("{} consistency issues", issues.len())
        },
        details: issues,
    }
}

fn read_json(inventory: &Inventory, name: &str) -> Result<Value, String> {
    let raw = fs::read_to_string(inventory.path(name)).map_err(|err| err.to_string())?;
    serde_json::from_str(&raw).map_err(|err| err.to_string())
}

fn missing_fields(value: &Value, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| value.get(**field).is_none())
        .map(|field| field.to_string())
        .collect()
}
