//! Main renderer module.
//!
//! This module contains submodules for pipeline construction, uniform management, vertex
//! definitions and the wgpu renderer that consumes [`crate::game::scene::Scene`]s.

/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// Camera and light uniforms.
pub mod uniform;
/// Cube mesh and per-instance data.
pub mod vertex;
/// Core WGPU renderer.
pub mod wgpu_lib;
