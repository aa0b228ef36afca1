//! Math utilities and types for 3D graphics and game logic.
//!
//! This module provides vector and matrix types plus angle helpers. Both types are `Pod` so they
//! can be written straight into GPU buffers.
//!
//! # Module Organization
//!
//! - [`vec`] holds [`Vec3`] and its arithmetic
//! - [`mat`] holds the column-major [`Mat4`] and camera matrices

pub mod mat;
pub mod vec;

pub use mat::Mat4;
pub use vec::Vec3;

/// Converts degrees to radians.
///
/// The input is first wrapped into the range (-360, 360).
///
/// # Arguments
///
/// * `degrees` - The angle in degrees (can be any finite value)
///
/// # Returns
///
/// The angle in radians in range (-2π, 2π)
pub fn deg_to_rad(degrees: f32) -> f32 {
    (degrees % 360.0) * (std::f32::consts::PI / 180.0)
}
