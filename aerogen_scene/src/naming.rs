//! Artifact naming conventions, single-sourced for both the generation
//! pipeline and the validator.
//!
//! Per scene id `NNN` the full artifact set is `scene_NNN.png`,
//! `scene_NNN.json`, `scene_NNN_annotations.json`, `mask_scene_NNN.png`
//! and `depth_scene_NNN.png`.

/// Filename the persisted validation report is written under.
pub const REPORT_FILE: &str = "validation_report.json";

const PNG_EXT: &str = ".png";
const JSON_EXT: &str = ".json";

pub fn scene_stem(scene_id: u32) -> String {
    format!("scene_{scene_id:03}")
}

pub fn image_name(scene_id: u32) -> String {
    format!("scene_{scene_id:03}.png")
}

pub fn metadata_name(scene_id: u32) -> String {
    format!("scene_{scene_id:03}.json")
}

/// The four artifacts derived from one scene image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompanionKind {
    Metadata,
    Annotations,
    Mask,
    Depth,
}

/// Derive a companion filename from a scene image filename.
///
/// This is the only place companion names are constructed; generation and
/// validation must agree on it by sharing this function.
pub fn companion_name(kind: CompanionKind, image_name: &str) -> String {
    let stem = image_name.strip_suffix(PNG_EXT).unwrap_or(image_name);
    match kind {
        CompanionKind::Metadata => format!("{stem}.json"),
        CompanionKind::Annotations => format!("{stem}_annotations.json"),
        CompanionKind::Mask => format!("mask_{image_name}"),
        CompanionKind::Depth => format!("depth_{image_name}"),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    SceneImage,
    Metadata,
    Annotations,
    Mask,
    Depth,
    Report,
    Other,
}

/// Classify a directory entry by the naming convention alone; content is
/// never inspected here.
pub fn classify(name: &str) -> ArtifactKind {
    if name.ends_with(PNG_EXT) {
        if name.starts_with("mask_") {
            ArtifactKind::Mask
        } else if name.starts_with("depth_") {
            ArtifactKind::Depth
        } else if name.starts_with("scene_") {
            ArtifactKind::SceneImage
        } else {
            ArtifactKind::Other
        }
    } else if name.ends_with(JSON_EXT) {
        if name.contains("annotations") {
            ArtifactKind::Annotations
        } else if name == REPORT_FILE {
            ArtifactKind::Report
        } else if name.starts_with("scene_") {
            ArtifactKind::Metadata
        } else {
            ArtifactKind::Other
        }
    } else {
        ArtifactKind::Other
    }
}
