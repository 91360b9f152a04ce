use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct Shared {
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<FrameCallback>>,
}

impl Shared {
    fn schedule(&self) -> Result<(), String> {
        let window = web_sys::window().ok_or("no window".to_string())?;
        let callback = self.callback.borrow();
        let Some(cb) = callback.as_ref() else {
            return Ok(());
        };
        let id = window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|_| "raf: request_animation_frame failed".to_string())?;
        self.handle.set(Some(id));
        Ok(())
    }

    fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web_sys::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}

/// A `requestAnimationFrame` loop.
///
/// `tick` receives the frame timestamp and returns `false` to stop. The
/// closure holds only a weak reference to the loop state, so dropping the
/// handle frees everything the tick captured.
pub(super) struct FrameLoop {
    shared: Rc<Shared>,
}

impl FrameLoop {
    pub(super) fn start(mut tick: impl FnMut(f64) -> bool + 'static) -> Result<Self, String> {
        let shared = Rc::new(Shared {
            handle: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak = Rc::downgrade(&shared);
        let cb = Closure::wrap(Box::new(move |ts: f64| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.handle.set(None);
            if !tick(ts) {
                return;
            }
            if let Err(e) = shared.schedule() {
                warn!("frame loop stopped: {e}");
            }
        }) as Box<dyn FnMut(f64)>);

        *shared.callback.borrow_mut() = Some(cb);
        shared.schedule()?;
        Ok(Self { shared })
    }

    pub(super) fn is_running(&self) -> bool {
        self.shared.handle.get().is_some()
    }

    /// Cancel the pending frame and drop the tick closure.
    ///
    /// Must not be called from inside the tick itself; return `false` there.
    pub(super) fn stop(&mut self) {
        self.shared.cancel();
        self.shared.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
