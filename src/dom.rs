use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Find an element by id, or create it with `tag` and append it to `<body>`.
pub fn ensure_element(
    document: &web::Document,
    id: &str,
    tag: &str,
    style: &str,
) -> anyhow::Result<web::Element> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create_element({}) failed: {:?}", tag, e))?;
    el.set_id(id);
    if !style.is_empty() {
        _ = el.set_attribute("style", style);
    }
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("document has no <body>"))?;
    body.append_child(&el)
        .map_err(|e| anyhow::anyhow!("append_child failed: {:?}", e))?;
    Ok(el)
}

/// The page canvas, created full-window when the page does not provide one.
pub fn ensure_canvas(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = ensure_element(
        document,
        id,
        "canvas",
        "position:fixed;inset:0;width:100%;height:100%;display:block;touch-action:none",
    )?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing store at CSS size times devicePixelRatio.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// The page's query string (`?a=b`), empty when unavailable.
pub fn location_search() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}
