use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a synthesized scene. The id-to-type assignment cycles
/// through [`SceneType::ALL`] in order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    Urban,
    Forest,
    OpenField,
    Industrial,
    Residential,
}

impl SceneType {
    pub const ALL: [SceneType; 5] = [
        SceneType::Urban,
        SceneType::Forest,
        SceneType::OpenField,
        SceneType::Industrial,
        SceneType::Residential,
    ];

    /// Round-robin assignment; stable for a given scene id.
    pub fn for_scene(scene_id: u32) -> Self {
        Self::ALL[scene_id as usize % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneType::Urban => "urban",
            SceneType::Forest => "forest",
            SceneType::OpenField => "open_field",
            SceneType::Industrial => "industrial",
            SceneType::Residential => "residential",
        }
    }
}

impl fmt::Display for SceneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Building,
    Tree,
    Obstacle,
}

impl ObjectKind {
    /// Integer class id stamped into segmentation masks.
    pub fn class_id(&self) -> u8 {
        match self {
            ObjectKind::Building => 1,
            ObjectKind::Tree => 2,
            ObjectKind::Obstacle => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Building => "building",
            ObjectKind::Tree => "tree",
            ObjectKind::Obstacle => "obstacle",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// World position [x, y, z]; z is the altitude in meters.
    pub position: [f32; 3],
    /// Euler angles [pitch, yaw, roll] in degrees.
    pub rotation: [f32; 3],
    pub fov: f32,
    /// Render target size [width, height] in pixels.
    pub resolution: [u32; 2],
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub position: [f32; 3],
    pub size: [f32; 3],
    pub color: [u8; 3],
}

/// Full description of one synthesized scene. Built once by
/// [`create_scene`](crate::create_scene) and never mutated afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SceneDescriptor {
    pub scene_id: u32,
    pub scene_type: SceneType,
    #[serde(default)]
    pub timestamp: String,
    pub camera_parameters: CameraPose,
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub lighting_conditions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_type_serializes_snake_case() {
        let json = serde_json::to_string(&SceneType::OpenField).expect("serialize scene type");
        assert_eq!(json, "\"open_field\"");
        let back: SceneType = serde_json::from_str("\"urban\"").expect("deserialize scene type");
        assert_eq!(back, SceneType::Urban);
    }

    #[test]
    fn object_kind_uses_type_key_and_lowercase_value() {
        let object = SceneObject {
            kind: ObjectKind::Tree,
            position: [1.0, 2.0, 0.0],
            size: [40.0, 40.0, 120.0],
            color: [0, 130, 0],
        };
        let json = serde_json::to_string(&object).expect("serialize object");
        assert!(json.contains("\"type\":\"tree\""), "got {json}");
    }

    #[test]
    fn class_ids_match_mask_values() {
        assert_eq!(ObjectKind::Building.class_id(), 1);
        assert_eq!(ObjectKind::Tree.class_id(), 2);
        assert_eq!(ObjectKind::Obstacle.class_id(), 3);
    }

    #[test]
    fn for_scene_cycles_over_all_types() {
        assert_eq!(SceneType::for_scene(0), SceneType::Urban);
        assert_eq!(SceneType::for_scene(2), SceneType::OpenField);
        assert_eq!(SceneType::for_scene(5), SceneType::Urban);
        assert_eq!(SceneType::for_scene(9), SceneType::Residential);
    }
}
