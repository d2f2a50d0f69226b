// Parameter set for the F and the fixed order its matrix chain is built in

use glam::Vec3;

use super::{deg_to_rad, m3, m4};

/// Translation, rotation and scale of the F, as the user edits them.
///
/// Rotation holds Euler angles in radians, applied X, then Y, then Z in the
/// matrix chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Starting pose of the F: placed at (45, 150), tilted 40°/25°/325°.
    pub fn initial() -> Self {
        Self {
            translation: Vec3::new(45.0, 150.0, 0.0),
            rotation: Vec3::new(deg_to_rad(40.0), deg_to_rad(25.0), deg_to_rad(325.0)),
            scale: Vec3::ONE,
        }
    }

    /// Full 3D chain: projection, translate, rotate X/Y/Z, scale.
    pub fn matrix(&self, width: f32, height: f32, depth: f32) -> m4::Mat4 {
        let mut matrix = m4::projection(width, height, depth);
        matrix = m4::translate(
            &matrix,
            self.translation.x,
            self.translation.y,
            self.translation.z,
        );
        matrix = m4::x_rotate(&matrix, self.rotation.x);
        matrix = m4::y_rotate(&matrix, self.rotation.y);
        matrix = m4::z_rotate(&matrix, self.rotation.z);
        m4::scale(&matrix, self.scale.x, self.scale.y, self.scale.z)
    }

    /// 2D chain for the flat textured F. Only Z rotation applies.
    pub fn matrix_2d(&self, width: f32, height: f32) -> m3::Mat3 {
        let mut matrix = m3::projection(width, height);
        matrix = m3::translate(&matrix, self.translation.x, self.translation.y);
        matrix = m3::rotate(&matrix, self.rotation.z);
        m3::scale(&matrix, self.scale.x, self.scale.y)
    }
}
