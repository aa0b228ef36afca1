//! Errors raised by the GPU and windowing collaborators.
//!
//! The simulation core is infallible. Anything here is a resource acquisition problem and is
//! either recovered from for one frame or surfaced to `main` as fatal.

use thiserror::Error;

/// Failures while bringing up or driving the renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The window could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// A drawing surface could not be created for the window.
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter is compatible with the surface.
    #[error("no compatible graphics adapter found")]
    NoAdapter,

    /// The adapter refused to hand out a device.
    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The surface does not support any of the formats the pipeline can target.
    #[error("surface supports no usable texture format")]
    NoSurfaceFormat,

    /// The GPU ran out of memory while acquiring a frame.
    #[error("out of memory while acquiring surface texture")]
    OutOfMemory,
}
