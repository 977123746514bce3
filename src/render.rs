use web_sys as web;
use xr_core::SceneDescription;
use xr_render::GpuSurface;

/// WebGPU surface on the page canvas. `None` (logged) when WebGPU is missing;
/// the XR session still works through its own WebGL2 context.
pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: SceneDescription,
) -> Option<GpuSurface<'static>> {
    match create(canvas, scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[render] WebGPU init error: {:?}", e);
            None
        }
    }
}

async fn create(
    canvas: &web::HtmlCanvasElement,
    scene: SceneDescription,
) -> anyhow::Result<GpuSurface<'static>> {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    GpuSurface::new(&instance, surface, canvas.width(), canvas.height(), scene).await
}
