use thiserror::Error;

/// Failures setting up the interactive viewer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("no GPU adapter compatible with the window surface")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    #[error("surface has no supported formats on this adapter")]
    NoSurfaceFormat,
}
