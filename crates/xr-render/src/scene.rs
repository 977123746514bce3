use crate::helpers;
use glam::{Mat4, Vec4};
use wgpu::util::DeviceExt;
use xr_core::mesh::{self, Mesh, Vertex};
use xr_core::{HandPair, SceneDescription, MARKER_DIAMETER, MARKER_SEGMENTS};

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_sky: [f32; 4],
    light_ground: [f32; 4],
    sky_top: [f32; 4],
    sky_horizon: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn new(model: Mat4, color: Vec4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_array(),
        }
    }
}

/// Everything that changes per frame.
pub struct FrameInput {
    pub view_proj: Mat4,
    pub markers: [InstanceData; 2],
}

impl FrameInput {
    pub fn from_hands(view_proj: Mat4, hands: &HandPair) -> Self {
        let inst = |h: &xr_core::Hand| InstanceData::new(h.marker.model_matrix(), h.rgba());
        Self {
            view_proj,
            markers: [inst(&hands.left), inst(&hands.right)],
        }
    }
}

struct GpuMesh {
    vb: wgpu::Buffer,
    ib: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vb,
            ib,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Sky gradient, ground disc and the two translucent hand markers.
///
/// Draw order: sky (no depth), ground (opaque, writes depth), markers
/// (alpha blended, depth tested but not written).
pub struct SceneRenderer {
    sky_pipeline: wgpu::RenderPipeline,
    ground_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_vb: wgpu::Buffer,
    ground: GpuMesh,
    sphere: GpuMesh,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    scene: SceneDescription,
    clear_color: wgpu::Color,
}

const GROUND_INSTANCE: u32 = 0;
const MARKER_INSTANCES: std::ops::Range<u32> = 1..3;

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        scene: SceneDescription,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [
            // slot 0: mesh vertices
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            },
            // slot 1: per-instance model matrix + color
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    2 => Float32x4,
                    3 => Float32x4,
                    4 => Float32x4,
                    5 => Float32x4,
                    6 => Float32x4
                ],
            },
        ];

        let sky_pipeline = helpers::make_pipeline(
            device,
            "sky_pipeline",
            &layout,
            &shader,
            ("vs_sky", "fs_sky"),
            &[],
            color_format,
            None,
            helpers::depth_state(false, wgpu::CompareFunction::Always),
        );
        let ground_pipeline = helpers::make_pipeline(
            device,
            "ground_pipeline",
            &layout,
            &shader,
            ("vs_mesh", "fs_mesh"),
            &mesh_buffers,
            color_format,
            None,
            helpers::depth_state(true, wgpu::CompareFunction::Less),
        );
        let marker_pipeline = helpers::make_pipeline(
            device,
            "marker_pipeline",
            &layout,
            &shader,
            ("vs_mesh", "fs_mesh"),
            &mesh_buffers,
            color_format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            helpers::depth_state(false, wgpu::CompareFunction::Less),
        );

        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<InstanceData>() * 3) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let ground = GpuMesh::upload(
            device,
            "ground",
            &mesh::ground_disc(scene.environment.ground_size(), xr_core::GROUND_TESSELLATION),
        );
        let sphere = GpuMesh::upload(
            device,
            "marker_sphere",
            &mesh::sphere(MARKER_DIAMETER, MARKER_SEGMENTS),
        );
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        let h = scene.environment.sky_horizon;

        Self {
            sky_pipeline,
            ground_pipeline,
            marker_pipeline,
            uniform_buffer,
            bind_group,
            instance_vb,
            ground,
            sphere,
            _depth_tex: depth_tex,
            depth_view,
            width,
            height,
            scene,
            clear_color: wgpu::Color {
                r: h.x as f64,
                g: h.y as f64,
                b: h.z as f64,
                a: 1.0,
            },
        }
    }

    pub fn scene(&self) -> &SceneDescription {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneDescription {
        &mut self.scene
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        (self._depth_tex, self.depth_view) = helpers::create_depth_texture(device, width, height);
    }

    fn write_uniforms(&self, queue: &wgpu::Queue, view_proj: Mat4) {
        let light = &self.scene.light;
        let env = &self.scene.environment;
        let u = FrameUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            light_dir: light.direction.extend(light.intensity).to_array(),
            light_sky: light.sky_color.extend(1.0).to_array(),
            light_ground: light.ground_color.extend(1.0).to_array(),
            sky_top: env.sky_top.extend(1.0).to_array(),
            sky_horizon: env.sky_horizon.extend(1.0).to_array(),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        frame: &FrameInput,
    ) {
        self.write_uniforms(queue, frame.view_proj);
        let ground_color = self.scene.environment.ground_color.extend(1.0);
        let instances = [
            InstanceData::new(Mat4::IDENTITY, ground_color),
            frame.markers[0],
            frame.markers[1],
        ];
        queue.write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&instances));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            rpass.set_pipeline(&self.sky_pipeline);
            rpass.draw(0..3, 0..1);

            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));

            rpass.set_pipeline(&self.ground_pipeline);
            rpass.set_vertex_buffer(0, self.ground.vb.slice(..));
            rpass.set_index_buffer(self.ground.ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.ground.index_count, 0, GROUND_INSTANCE..GROUND_INSTANCE + 1);

            rpass.set_pipeline(&self.marker_pipeline);
            rpass.set_vertex_buffer(0, self.sphere.vb.slice(..));
            rpass.set_index_buffer(self.sphere.ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.sphere.index_count, 0, MARKER_INSTANCES);
        }
        queue.submit(Some(encoder.finish()));
    }
}
