use std::cell::RefCell;
use std::rc::Rc;

use inkloop::confetti::Burst;
use leptos::html::Canvas;
use leptos::prelude::*;
use tracing::{debug, warn};

use super::canvas;
use super::frame_loop::FrameLoop;
use super::CelebrationEvent;

type LiveBurst = Rc<RefCell<Option<Burst>>>;

#[derive(Default)]
struct OverlayState {
    burst: LiveBurst,
    frame_loop: Option<FrameLoop>,
}

/// Size the overlay backing store to the window.
fn fit_to_window(canvas_el: &web_sys::HtmlCanvasElement) -> (f32, f32) {
    let (w, h) = web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (width, height)
        })
        .unwrap_or((0.0, 0.0));
    canvas_el.set_width(w as u32);
    canvas_el.set_height(h as u32);
    (w as f32, h as f32)
}

fn start_confetti(
    canvas_el: web_sys::HtmlCanvasElement,
    live: LiveBurst,
) -> Result<FrameLoop, String> {
    let ctx = canvas::context_2d(&canvas_el)?;
    FrameLoop::start(move |_ts| {
        let mut slot = live.borrow_mut();
        let Some(burst) = slot.as_mut() else {
            canvas::clear(&canvas_el, &ctx);
            return false;
        };
        burst.step();
        if burst.is_finished() {
            *slot = None;
            canvas::clear(&canvas_el, &ctx);
            debug!("confetti finished");
            return false;
        }
        canvas::draw_confetti(&canvas_el, &ctx, burst);
        true
    })
}

/// Full-window confetti layer. Each new `trigger` value launches a burst;
/// a burst launched while another is still falling joins it.
#[component]
pub(super) fn ConfettiOverlay(trigger: ReadSignal<Option<CelebrationEvent>>) -> impl IntoView {
    let canvas_ref = NodeRef::<Canvas>::new();
    let state = StoredValue::new_local(OverlayState::default());

    Effect::new(move |_| {
        let Some(event) = trigger.get() else {
            return;
        };
        let Some(canvas_el) = canvas_ref.get_untracked() else {
            return;
        };

        let (w, h) = fit_to_window(&canvas_el);
        let seed = (js_sys::Date::now() as u64) ^ event.seq;
        let fresh = Burst::launch(event.celebration.into(), w, h, seed);
        debug!(pieces = fresh.pieces().len(), "launching confetti");

        let live = state.with_value(|s| s.burst.clone());
        {
            let mut slot = live.borrow_mut();
            match slot.as_mut() {
                Some(burst) => burst.absorb(fresh),
                None => *slot = Some(fresh),
            }
        }

        let running = state.with_value(|s| {
            s.frame_loop
                .as_ref()
                .is_some_and(FrameLoop::is_running)
        });
        if running {
            return;
        }
        match start_confetti(canvas_el, live) {
            Ok(l) => state.update_value(|s| s.frame_loop = Some(l)),
            Err(e) => warn!("confetti disabled: {e}"),
        }
    });

    on_cleanup(move || {
        state.update_value(|s| {
            if let Some(mut l) = s.frame_loop.take() {
                l.stop();
            }
        });
    });

    view! {
        <canvas
            node_ref=canvas_ref
            style="position: fixed; inset: 0; width: 100vw; height: 100vh; pointer-events: none; z-index: 10;"
        ></canvas>
    }
}
