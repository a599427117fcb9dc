mod background;
mod sprites;

use crate::core::camera::Camera;
use crate::core::Scene;
use background::BackgroundPass;
use sprites::SpritePass;
use std::rc::Rc;
use web_sys as web;

/// Instance, adapter and device shared by every canvas on the page.
pub struct Gpu {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl Gpu {
    pub async fn new() -> anyhow::Result<Rc<Self>> {
        let instance = wgpu::Instance::default();
        // WebGPU adapters can present to any canvas, so no surface is needed up front.
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        log::info!("[gpu] adapter {:?}", adapter.get_info().name);
        Ok(Rc::new(Self {
            instance,
            adapter,
            device,
            queue,
        }))
    }
}

/// One canvas surface on the shared device.
pub struct GpuContext {
    pub gpu: Rc<Gpu>,
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    pub fn new(gpu: Rc<Gpu>, canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let surface = gpu
            .instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let caps = surface.get_capabilities(&gpu.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Canvases sit over page content, so keep transparency when the browser allows it.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);
        log::info!(
            "[gpu] surface {}x{} {:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        Ok(Self {
            gpu,
            surface,
            config,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.gpu.device, &self.config);
        }
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.gpu.device, &self.config);
    }
}

enum Pass {
    Background(BackgroundPass),
    Sprites(SpritePass),
}

/// Draws one stage's `Scene` into its canvas.
pub struct StageRenderer {
    target: GpuContext,
    pass: Pass,
}

impl StageRenderer {
    /// Fullscreen procedural shader; reads `Scene::background`.
    pub fn background(gpu: Rc<Gpu>, canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let target = GpuContext::new(gpu, canvas)?;
        let pass = Pass::Background(BackgroundPass::new(&target.gpu.device, target.config.format));
        Ok(Self { target, pass })
    }

    /// Instanced billboards; reads `Scene::sprites`.
    pub fn sprites(
        gpu: Rc<Gpu>,
        canvas: &web::HtmlCanvasElement,
        camera: Camera,
    ) -> anyhow::Result<Self> {
        let target = GpuContext::new(gpu, canvas)?;
        let pass = Pass::Sprites(SpritePass::new(&target.gpu.device, target.config.format, camera));
        Ok(Self { target, pass })
    }

    pub fn render(&mut self, scene: &Scene, width: u32, height: u32) {
        self.target.resize_if_needed(width, height);
        let (w, h) = (self.target.config.width, self.target.config.height);
        match &mut self.pass {
            Pass::Background(p) => p.prepare(&self.target.gpu.queue, scene, w, h),
            Pass::Sprites(p) => p.prepare(&self.target.gpu.device, &self.target.gpu.queue, scene, w, h),
        }

        let frame = match self.target.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.target.reconfigure();
                return;
            }
            Err(e) => {
                log::warn!("[gpu] frame skipped: {:?}", e);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .target
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("stage_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stage_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            match &self.pass {
                Pass::Background(p) => p.draw(&mut rpass),
                Pass::Sprites(p) => p.draw(&mut rpass),
            }
        }
        self.target.gpu.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}
