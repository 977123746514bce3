use glam::Mat4;
use web_sys::{
    WebGl2RenderingContext as Gl, WebGlBuffer, WebGlFramebuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};
use xr_core::mesh::{self, Mesh, Vertex};
use xr_core::{HandPair, SceneDescription, GROUND_TESSELLATION, MARKER_DIAMETER, MARKER_SEGMENTS};

static MESH_VERT: &str = include_str!("../../shaders/xr_mesh.vert");
static MESH_FRAG: &str = include_str!("../../shaders/xr_mesh.frag");
static SKY_VERT: &str = include_str!("../../shaders/xr_sky.vert");
static SKY_FRAG: &str = include_str!("../../shaders/xr_sky.frag");

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> anyhow::Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| anyhow::anyhow!("create_shader failed"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if !gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        anyhow::bail!("shader compile error: {}", log);
    }
    Ok(shader)
}

fn link_program(gl: &Gl, vert: &str, frag: &str) -> anyhow::Result<WebGlProgram> {
    let vs = compile_shader(gl, Gl::VERTEX_SHADER, vert)?;
    let fs = compile_shader(gl, Gl::FRAGMENT_SHADER, frag)?;
    let program = gl
        .create_program()
        .ok_or_else(|| anyhow::anyhow!("create_program failed"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));
    if !gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        anyhow::bail!("program link error: {}", log);
    }
    Ok(program)
}

fn uniform(gl: &Gl, program: &WebGlProgram, name: &str) -> anyhow::Result<WebGlUniformLocation> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| anyhow::anyhow!("missing uniform {}", name))
}

struct GlMesh {
    vao: WebGlVertexArrayObject,
    _vb: WebGlBuffer,
    _ib: WebGlBuffer,
    index_count: i32,
}

impl GlMesh {
    fn upload(gl: &Gl, mesh: &Mesh) -> anyhow::Result<Self> {
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| anyhow::anyhow!("create_vertex_array failed"))?;
        gl.bind_vertex_array(Some(&vao));

        let vb = gl
            .create_buffer()
            .ok_or_else(|| anyhow::anyhow!("create_buffer failed"))?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vb));
        gl.buffer_data_with_u8_array(
            Gl::ARRAY_BUFFER,
            bytemuck::cast_slice(&mesh.vertices),
            Gl::STATIC_DRAW,
        );
        let stride = std::mem::size_of::<Vertex>() as i32;
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, Gl::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 3, Gl::FLOAT, false, stride, 12);

        let ib = gl
            .create_buffer()
            .ok_or_else(|| anyhow::anyhow!("create_buffer failed"))?;
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&ib));
        gl.buffer_data_with_u8_array(
            Gl::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&mesh.indices),
            Gl::STATIC_DRAW,
        );
        gl.bind_vertex_array(None);

        Ok(Self {
            vao,
            _vb: vb,
            _ib: ib,
            index_count: mesh.indices.len() as i32,
        })
    }

    fn draw(&self, gl: &Gl) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(Gl::TRIANGLES, self.index_count, Gl::UNSIGNED_INT, 0);
    }
}

struct MeshUniforms {
    view_proj: WebGlUniformLocation,
    model: WebGlUniformLocation,
    color: WebGlUniformLocation,
    light_dir: WebGlUniformLocation,
    light_sky: WebGlUniformLocation,
    light_ground: WebGlUniformLocation,
}

struct SkyUniforms {
    inv_view_proj: WebGlUniformLocation,
    sky_top: WebGlUniformLocation,
    sky_horizon: WebGlUniformLocation,
}

/// WebGL2 rendition of the scene for the immersive views.
///
/// Same draw order as the desktop renderer: sky, opaque ground, then the
/// blended markers with depth writes off.
pub struct GlSceneRenderer {
    gl: Gl,
    mesh_program: WebGlProgram,
    mesh_u: MeshUniforms,
    sky_program: WebGlProgram,
    sky_u: SkyUniforms,
    sky_vao: WebGlVertexArrayObject,
    ground: GlMesh,
    sphere: GlMesh,
}

impl GlSceneRenderer {
    pub fn new(gl: Gl, scene: &SceneDescription) -> anyhow::Result<Self> {
        let mesh_program = link_program(&gl, MESH_VERT, MESH_FRAG)?;
        let mesh_u = MeshUniforms {
            view_proj: uniform(&gl, &mesh_program, "u_view_proj")?,
            model: uniform(&gl, &mesh_program, "u_model")?,
            color: uniform(&gl, &mesh_program, "u_color")?,
            light_dir: uniform(&gl, &mesh_program, "u_light_dir")?,
            light_sky: uniform(&gl, &mesh_program, "u_light_sky")?,
            light_ground: uniform(&gl, &mesh_program, "u_light_ground")?,
        };
        let sky_program = link_program(&gl, SKY_VERT, SKY_FRAG)?;
        let sky_u = SkyUniforms {
            inv_view_proj: uniform(&gl, &sky_program, "u_inv_view_proj")?,
            sky_top: uniform(&gl, &sky_program, "u_sky_top")?,
            sky_horizon: uniform(&gl, &sky_program, "u_sky_horizon")?,
        };
        // attribute-less fullscreen triangle
        let sky_vao = gl
            .create_vertex_array()
            .ok_or_else(|| anyhow::anyhow!("create_vertex_array failed"))?;
        let ground = GlMesh::upload(
            &gl,
            &mesh::ground_disc(scene.environment.ground_size(), GROUND_TESSELLATION),
        )?;
        let sphere = GlMesh::upload(&gl, &mesh::sphere(MARKER_DIAMETER, MARKER_SEGMENTS))?;
        log::info!("[render] immersive WebGL2 renderer ready");
        Ok(Self {
            gl,
            mesh_program,
            mesh_u,
            sky_program,
            sky_u,
            sky_vao,
            ground,
            sphere,
        })
    }

    /// Bind the XR layer framebuffer and clear it.
    pub fn begin_frame(&self, framebuffer: Option<&WebGlFramebuffer>, scene: &SceneDescription) {
        let gl = &self.gl;
        gl.bind_framebuffer(Gl::FRAMEBUFFER, framebuffer);
        let h = scene.environment.sky_horizon;
        gl.clear_color(h.x, h.y, h.z, 1.0);
        gl.depth_mask(true);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    /// Draw one eye into `viewport` (`x, y, width, height` in framebuffer pixels).
    pub fn draw_view(
        &self,
        viewport: (i32, i32, i32, i32),
        view_proj: Mat4,
        scene: &SceneDescription,
        hands: &HandPair,
    ) {
        let gl = &self.gl;
        let (x, y, w, h) = viewport;
        gl.viewport(x, y, w, h);

        // sky
        gl.disable(Gl::DEPTH_TEST);
        gl.disable(Gl::CULL_FACE);
        gl.disable(Gl::BLEND);
        gl.use_program(Some(&self.sky_program));
        let env = &scene.environment;
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.sky_u.inv_view_proj),
            false,
            &view_proj.inverse().to_cols_array(),
        );
        gl.uniform3fv_with_f32_array(Some(&self.sky_u.sky_top), &env.sky_top.to_array());
        gl.uniform3fv_with_f32_array(Some(&self.sky_u.sky_horizon), &env.sky_horizon.to_array());
        gl.bind_vertex_array(Some(&self.sky_vao));
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        // ground
        gl.enable(Gl::DEPTH_TEST);
        gl.depth_func(Gl::LESS);
        gl.depth_mask(true);
        gl.enable(Gl::CULL_FACE);
        gl.cull_face(Gl::BACK);
        gl.use_program(Some(&self.mesh_program));
        let light = &scene.light;
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.mesh_u.view_proj),
            false,
            &view_proj.to_cols_array(),
        );
        gl.uniform4fv_with_f32_array(
            Some(&self.mesh_u.light_dir),
            &light.direction.extend(light.intensity).to_array(),
        );
        gl.uniform3fv_with_f32_array(Some(&self.mesh_u.light_sky), &light.sky_color.to_array());
        gl.uniform3fv_with_f32_array(
            Some(&self.mesh_u.light_ground),
            &light.ground_color.to_array(),
        );
        self.set_instance(Mat4::IDENTITY, env.ground_color.extend(1.0).to_array());
        self.ground.draw(gl);

        // markers
        gl.enable(Gl::BLEND);
        gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);
        gl.depth_mask(false);
        for hand in hands.iter() {
            self.set_instance(hand.marker.model_matrix(), hand.rgba().to_array());
            self.sphere.draw(gl);
        }
        gl.depth_mask(true);
        gl.disable(Gl::BLEND);
        gl.bind_vertex_array(None);
    }

    fn set_instance(&self, model: Mat4, color: [f32; 4]) {
        self.gl
            .uniform_matrix4fv_with_f32_array(Some(&self.mesh_u.model), false, &model.to_cols_array());
        self.gl
            .uniform4fv_with_f32_array(Some(&self.mesh_u.color), &color);
    }
}
