/// One acquired surface frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next
/// frame, so hand it back to `Gpu::submit` promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
