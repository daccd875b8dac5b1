use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform of a scene model: position, euler angles (radians), scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub angles: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            angles: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::ZYX, self.angles.z, self.angles.y, self.angles.x)
    }

    /// Model matrix `R * T * S`.
    ///
    /// The rotation is applied after the translation, so a rotated model also
    /// orbits the origin. Scene files are authored against this order.
    pub fn model_matrix(&self) -> Mat4 {
        let translated_scaled =
            Mat4::from_translation(self.position) * Mat4::from_scale(self.scale);
        Mat4::from_quat(self.rotation()) * translated_scaled
    }
}
