//! Small typed wrappers over the `wgpu` objects the viewer needs.

use std::num::NonZeroU32;

use wgpu::util::DeviceExt;

use crate::screen;

/// Surface size in pixels, bound as the `vec2<f32>` the present shader
/// divides fragment positions by.
pub struct ScreenSizeUniform {
    buffer: wgpu::Buffer,
}

impl ScreenSizeUniform {
    pub fn new(device: &wgpu::Device, size: screen::Size) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("screen-size-buffer"),
            contents: bytemuck::cast_slice(&Self::contents(size)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        Self { buffer }
    }

    fn contents(size: screen::Size) -> [f32; 2] {
        [size.width as f32, size.height as f32]
    }

    pub fn update(&self, queue: &wgpu::Queue, size: screen::Size) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&Self::contents(size)));
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

/// The CPU-rendered frame, as a sampled `Rgba8Unorm` texture.
pub struct FrameTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: screen::Size,
}

impl FrameTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn new(device: &wgpu::Device, size: screen::Size) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame-texture"),
            size: Self::extent(size),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            size,
        }
    }

    fn extent(size: screen::Size) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        }
    }

    pub fn size(&self) -> screen::Size {
        self.size
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Replace the whole texture with `pixels`, row-major from the top.
    pub fn upload(&self, queue: &wgpu::Queue, pixels: &[[u8; 4]]) {
        debug_assert_eq!(pixels.len(), self.size.area());
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(pixels),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(4 * self.size.width),
                rows_per_image: NonZeroU32::new(self.size.height),
            },
            Self::extent(self.size),
        );
    }

    pub fn destroy(self) {
        self.texture.destroy()
    }
}

/// Clear `target` and draw the frame texture over all of it with the
/// present pipeline.
pub fn draw_frame(
    command_encoder: &mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bind_group: &wgpu::BindGroup,
) {
    command_encoder.push_debug_group("render-pass");
    {
        let mut render_pass = command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("render-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: true,
                },
            })],
            depth_stencil_attachment: None,
        });
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, bind_group, &[]);
        // Four vertices of the full-screen strip, generated in the shader.
        render_pass.draw(0..4, 0..1);
    }
    command_encoder.pop_debug_group();
}

/// Record commands into a fresh encoder and finish it.
pub fn command_buffer(
    device: &wgpu::Device,
    label: &str,
    function: impl FnOnce(&mut wgpu::CommandEncoder),
) -> wgpu::CommandBuffer {
    let mut command_encoder =
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
    function(&mut command_encoder);
    command_encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_size_is_uploaded_as_floats() {
        let contents = ScreenSizeUniform::contents(screen::Size::new(1280, 720));
        assert_eq!(contents, [1280.0, 720.0]);
        assert_eq!(bytemuck::cast_slice::<f32, u8>(&contents).len(), 8);
    }

    #[test]
    fn frame_extent_is_single_layer() {
        let extent = FrameTexture::extent(screen::Size::new(640, 360));
        assert_eq!((extent.width, extent.height), (640, 360));
        assert_eq!(extent.depth_or_array_layers, 1);
    }
}
