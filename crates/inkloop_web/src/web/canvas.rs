use inkloop::confetti::Burst;
use inkloop::raster::Framebuffer;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};

pub(super) fn context_2d(
    canvas: &web_sys::HtmlCanvasElement,
) -> Result<web_sys::CanvasRenderingContext2d, String> {
    canvas
        .get_context("2d")
        .map_err(|_| "canvas: get_context threw".to_string())?
        .ok_or("canvas: missing 2d context".to_string())?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| "canvas: context is not 2d".to_string())
}

/// Blit a rendered frame.
pub(super) fn put_rgba(
    ctx: &web_sys::CanvasRenderingContext2d,
    frame: &Framebuffer,
) -> Result<(), String> {
    let image = web_sys::ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(frame.as_bytes()),
        frame.width(),
        frame.height(),
    )
    .map_err(|_| "canvas: ImageData::new failed".to_string())?;
    ctx.put_image_data(&image, 0.0, 0.0)
        .map_err(|_| "canvas: put_image_data failed".to_string())
}

pub(super) fn clear(canvas: &web_sys::HtmlCanvasElement, ctx: &web_sys::CanvasRenderingContext2d) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
}

/// Draw every live confetti piece as a filled quad on a cleared overlay.
#[allow(deprecated)]
pub(super) fn draw_confetti(
    canvas: &web_sys::HtmlCanvasElement,
    ctx: &web_sys::CanvasRenderingContext2d,
    burst: &Burst,
) {
    clear(canvas, ctx);
    for piece in burst.pieces() {
        let [a, b, c, d] = piece.quad();
        ctx.set_global_alpha(piece.opacity() as f64);
        ctx.set_fill_style(&JsValue::from_str(piece.color));
        ctx.begin_path();
        ctx.move_to(a.0 as f64, a.1 as f64);
        ctx.line_to(b.0 as f64, b.1 as f64);
        ctx.line_to(c.0 as f64, c.1 as f64);
        ctx.line_to(d.0 as f64, d.1 as f64);
        ctx.close_path();
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);
}
