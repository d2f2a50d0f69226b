// Math utilities for the F renderer

pub mod m3;
pub mod m4;
mod transform;

pub use transform::Transform;

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}
