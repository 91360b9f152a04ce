use inkloop::config::FieldConfig;
use inkloop::view::VortexView;
use leptos::html::Canvas;
use leptos::prelude::*;
use tracing::{debug, warn};

use super::canvas;
use super::frame_loop::FrameLoop;

fn start_vortex(canvas_el: web_sys::HtmlCanvasElement) -> Result<FrameLoop, String> {
    let config = FieldConfig::default();
    canvas_el.set_width(config.viewport);
    canvas_el.set_height(config.viewport);
    let ctx = canvas::context_2d(&canvas_el)?;

    let mut view = VortexView::mount(config).map_err(|e| format!("vortex: {e}"))?;
    debug!(particles = view.field().len(), "vortex mounted");
    FrameLoop::start(move |_ts| {
        let Some(frame) = view.frame() else {
            return false;
        };
        match canvas::put_rgba(&ctx, frame) {
            Ok(()) => true,
            Err(e) => {
                warn!("vortex stopped: {e}");
                false
            }
        }
    })
}

/// The animated particle background. The view (and its frame loop) lives
/// exactly as long as the component.
#[component]
pub(super) fn VortexCanvas() -> impl IntoView {
    let canvas_ref = NodeRef::<Canvas>::new();
    let frame_loop = StoredValue::new_local(None::<FrameLoop>);

    Effect::new(move |_| {
        let Some(canvas_el) = canvas_ref.get() else {
            return;
        };
        if frame_loop.with_value(|l| l.is_some()) {
            return;
        }
        match start_vortex(canvas_el) {
            Ok(l) => frame_loop.set_value(Some(l)),
            Err(e) => warn!("vortex disabled: {e}"),
        }
    });

    on_cleanup(move || {
        // Dropping the loop drops the tick closure, which unmounts the view.
        frame_loop.update_value(|l| {
            if let Some(mut l) = l.take() {
                l.stop();
            }
        });
    });

    let side = FieldConfig::default().viewport;
    view! {
        <canvas
            node_ref=canvas_ref
            width=side
            height=side
            style="width: 550px; height: 550px; max-width: 100vw; max-height: 100vw;"
        ></canvas>
    }
}
