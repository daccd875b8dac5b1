use glam::Vec3;
use wavescape_common::Camera;

/// Camera that sees what the water surface at `water_height` reflects.
///
/// Front and up are reflected across the horizontal plane and the eye is
/// moved to `y - 2|y - water_height|`. Yaw, pitch and zoom are carried over
/// unchanged; only the explicit basis is used for the view matrix.
pub fn mirror_camera(camera: &Camera, water_height: f32) -> Camera {
    let mut mirrored = *camera;
    mirrored.front = camera.front.reflect(Vec3::Y);
    mirrored.up = camera.up.reflect(Vec3::Y);
    mirrored.position.y = camera.position.y - 2.0 * (camera.position.y - water_height).abs();
    mirrored
}
