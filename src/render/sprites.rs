use crate::core::camera::Camera;
use crate::core::{Scene, Sprite};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteInstance {
    pub(crate) pos_size: [f32; 4],
    pub(crate) color: [f32; 4],
}

impl From<&Sprite> for SpriteInstance {
    fn from(s: &Sprite) -> Self {
        Self {
            pos_size: [s.position.x, s.position.y, s.position.z, s.size],
            color: s.color,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

const INITIAL_CAPACITY: usize = 256;

pub(crate) struct SpritePass {
    camera: Camera,
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    /// Instances at the front of the buffer owned by `Scene::cached`.
    cached_len: usize,
    instance_count: usize,
    instances: Vec<SpriteInstance>,
}

impl SpritePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        camera: Camera,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprites_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SPRITES_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprites_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprites_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprites_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_sprite"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRS,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_sprite"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sprites_camera"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprites_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let instance_buffer = create_instance_buffer(device, INITIAL_CAPACITY);

        Self {
            camera,
            pipeline,
            camera_buffer,
            bind_group,
            instance_buffer,
            capacity: INITIAL_CAPACITY,
            cached_len: 0,
            instance_count: 0,
            instances: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub(crate) fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
        width: u32,
        height: u32,
    ) {
        self.camera.set_viewport(width as f32, height as f32);
        let cam = CameraUniform {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
        };
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));

        let cached = &scene.cached;
        let total = cached.sprites.len() + scene.sprites.len();
        let mut upload_cached = cached.dirty || cached.sprites.len() != self.cached_len;
        if total > self.capacity {
            self.capacity = total.next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.capacity);
            upload_cached = true;
            log::debug!("[gpu] sprite buffer grown to {}", self.capacity);
        }
        self.cached_len = cached.sprites.len();
        self.instance_count = total;

        if upload_cached && !cached.sprites.is_empty() {
            self.write_instances(queue, 0, &cached.sprites);
        }
        if !scene.sprites.is_empty() {
            self.write_instances(queue, self.cached_len, &scene.sprites);
        }
    }

    fn write_instances(&mut self, queue: &wgpu::Queue, first: usize, sprites: &[Sprite]) {
        self.instances.clear();
        self.instances.extend(sprites.iter().map(SpriteInstance::from));
        let offset = (first * std::mem::size_of::<SpriteInstance>()) as u64;
        queue.write_buffer(
            &self.instance_buffer,
            offset,
            bytemuck::cast_slice(&self.instances),
        );
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..self.instance_count as u32);
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("sprites_instances"),
        size: (capacity * std::mem::size_of::<SpriteInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
