//! Rasterization of a scene descriptor into its top-down RGB image.

use aerogen_raster::{draw_text, fill_circle, fill_rect};
use aerogen_scene::{ObjectKind, SceneDescriptor, SceneObject, SceneType};
use image::{Rgb, RgbImage};

/// World x/y units per image pixel.
const WORLD_SCALE: f32 = 10.0;
/// Object height units per on-screen pixel.
const HEIGHT_SCALE: f32 = 5.0;

const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

fn background(scene_type: SceneType) -> Rgb<u8> {
    match scene_type {
        SceneType::Forest => Rgb([0, 80, 0]),
        SceneType::OpenField => Rgb([100, 150, 100]),
        _ => Rgb([200, 200, 200]),
    }
}

/// Render the descriptor onto a fresh canvas of the camera's resolution.
///
/// Objects map into image space by a fixed linear scale centered on the
/// canvas; on-screen footprint follows object height. Buildings and
/// obstacles are rectangles, trees are circles, and a white overlay reports
/// scene type and camera altitude.
pub fn render_scene(scene: &SceneDescriptor) -> RgbImage {
    let [width, height] = scene.camera_parameters.resolution;
    let mut image = RgbImage::from_pixel(width, height, background(scene.scene_type));

    for object in &scene.objects {
        draw_object(&mut image, object);
    }

    let label = format!(
        "Scene: {} - Alt: {}m",
        scene.scene_type, scene.camera_parameters.position[2]
    );
    draw_text(&mut image, 10, 30, &label, TEXT_COLOR, 2);

    image
}

fn draw_object(image: &mut RgbImage, object: &SceneObject) {
    let (width, height) = image.dimensions();
    let cx = (width / 2) as i32;
    let cy = (height / 2) as i32;

    let x = cx + (object.position[0] / WORLD_SCALE) as i32;
    let y = cy + (object.position[1] / WORLD_SCALE) as i32;
    let size = (object.size[2] / HEIGHT_SCALE) as i32;
    let color = Rgb(object.color);

    match object.kind {
        // Anchored at the base: the footprint extends upward from (x, y).
        ObjectKind::Building => fill_rect(image, x - size / 2, y - size, x + size / 2, y, color),
        ObjectKind::Tree => fill_circle(image, x, y, size, color),
        ObjectKind::Obstacle => {
            fill_rect(image, x - size / 2, y - size / 2, x + size / 2, y + size / 2, color)
        }
    }
}
