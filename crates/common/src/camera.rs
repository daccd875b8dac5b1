use glam::{Mat4, Vec3};

/// Fly camera with an explicit front/up basis.
///
/// The basis is stored rather than derived so that a mirrored copy (front and
/// up reflected across a plane) can be expressed as a plain `Camera` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    /// Yaw in degrees; -90 looks down -Z.
    pub yaw: f32,
    /// Pitch in degrees, clamped to +-89.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    pub world_up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, -90.0, 0.0)
    }
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw,
            pitch,
            zoom: 45.0,
            world_up: Vec3::Y,
        };
        camera.update_vectors();
        camera
    }

    pub fn right(&self) -> Vec3 {
        self.front.cross(self.world_up).normalize_or_zero()
    }

    /// Turn the camera by the given yaw/pitch deltas in degrees.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-89.0, 89.0);
        self.update_vectors();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// OpenGL-style perspective projection (clip depth in [-1, 1]).
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect, near, far)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        let right = self.right();
        self.up = right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::default();
        assert!((cam.front - Vec3::NEG_Z).length() < 1e-6);
        assert!((cam.up - Vec3::Y).length() < 1e-6);
        assert_eq!(cam.zoom, 45.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::default();
        cam.rotate(0.0, 500.0);
        assert_eq!(cam.pitch, 89.0);
        assert!(!cam.view_matrix().is_nan());
    }

    #[test]
    fn view_matrix_moves_position_to_origin() {
        let cam = Camera::new(Vec3::new(0.0, 3.0, 10.0), -90.0, 0.0);
        let p = cam.view_matrix().transform_point3(cam.position);
        assert!(p.length() < 1e-5);
    }
}
