use inkloop::config::WaitlistConfig;
use inkloop::waitlist::{Celebration, WaitlistController};
use leptos::prelude::*;
use tracing::{info, warn};

mod canvas;
mod chrome;
mod confetti;
mod fetch;
mod form;
mod frame_loop;
mod logging;
mod vortex;

use chrome::{Footer, Hero, Logo};
use confetti::ConfettiOverlay;
use fetch::FetchBackend;
use form::{SignupCounter, WaitlistForm};
use vortex::VortexCanvas;

/// A celebration request. `seq` makes back-to-back identical celebrations
/// distinct so the overlay reacts to each one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CelebrationEvent {
    pub seq: u64,
    pub celebration: Celebration,
}

pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let config = WaitlistConfig::from_build_env().unwrap_or_else(|e| {
        warn!("invalid backend url, using default: {e}");
        WaitlistConfig::default()
    });
    info!(api = config.api_base_url(), "starting waitlist page");

    let backend = StoredValue::new(FetchBackend::new(config));
    let controller = RwSignal::new(WaitlistController::new());
    let celebration = RwSignal::new(None::<CelebrationEvent>);

    view! {
        <div style="position: relative; min-height: 100vh; overflow: hidden; background: #F0EEE6; color: #333333; font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif; display: flex; flex-direction: column;">
            <div style="position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; opacity: 0.4; pointer-events: none;">
                <VortexCanvas />
            </div>
            <ConfettiOverlay trigger=celebration.read_only() />

            <main class="fade-in" style="position: relative; z-index: 1; flex: 1; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 28px; padding: 48px 20px; text-align: center;">
                <Logo />
                <Hero />
                <WaitlistForm controller=controller backend=backend celebration=celebration />
                <SignupCounter controller=controller backend=backend />
            </main>

            <Footer />
        </div>
    }
}
