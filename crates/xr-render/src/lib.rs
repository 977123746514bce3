mod helpers;
mod scene;

pub use helpers::DEPTH_FORMAT;
pub use scene::{FrameInput, InstanceData, SceneRenderer, SCENE_WGSL};

use xr_core::{HandPair, SceneDescription};

/// A configured presentation surface plus the scene renderer drawing into it.
///
/// The front-ends differ only in how the `wgpu::Surface` is created (canvas
/// vs winit window); everything after that lives here.
pub struct GpuSurface<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
}

impl<'w> GpuSurface<'w> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'w>,
        width: u32,
        height: u32,
        scene: SceneDescription,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[render] surface {}x{} format={:?} adapter={}",
            config.width,
            config.height,
            format,
            adapter.get_info().name
        );

        let renderer = SceneRenderer::new(&device, format, config.width, config.height, scene);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    pub fn scene(&self) -> &SceneDescription {
        self.renderer.scene()
    }

    pub fn scene_mut(&mut self) -> &mut SceneDescription {
        self.renderer.scene_mut()
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.device, width, height);
        }
    }

    /// Draw the scene from the orbit camera.
    pub fn render(&mut self, hands: &HandPair) -> Result<(), wgpu::SurfaceError> {
        let view_proj = self.renderer.scene().camera.view_proj(self.renderer.aspect());
        let input = FrameInput::from_hands(view_proj, hands);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&self.device, &self.queue, &view, &input);
        frame.present();
        Ok(())
    }

    /// Reconfigure after `Lost`/`Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}
