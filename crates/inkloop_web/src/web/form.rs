use inkloop::api::{request_count, send_submission};
use inkloop::waitlist::WaitlistController;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::ui_model::{
    banner_text, counter_text, form_controls, submit_label, EMAIL_PLACEHOLDER, RESET_LABEL,
};

use super::fetch::FetchBackend;
use super::CelebrationEvent;

const INPUT_STYLE: &str = "flex: 1; min-width: 220px; padding: 12px 16px; font-size: 16px; border: 1px solid #cfcabb; border-radius: 10px; background: #fbfaf6; color: #333333;";
const BUTTON_STYLE: &str = "padding: 12px 22px; font-size: 16px; border: none; border-radius: 10px; background: #333333; color: #F0EEE6; cursor: pointer;";

#[component]
pub(super) fn WaitlistForm(
    controller: RwSignal<WaitlistController>,
    backend: StoredValue<FetchBackend>,
    celebration: RwSignal<Option<CelebrationEvent>>,
) -> impl IntoView {
    let loading = move || controller.with(|c| c.is_loading());
    let banner = move || controller.with(|c| banner_text(c.state()));
    let controls = move || controller.with(|c| form_controls(c.state()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(submission) = controller.try_update(|c| c.begin_submit()).flatten() else {
            return;
        };
        let backend = backend.get_value();
        spawn_local(async move {
            let result = send_submission(&backend, &submission).await;
            let next = controller.try_update(|c| c.finish_submit(result)).flatten();
            if let Some(next) = next {
                celebration.update(|slot| {
                    let seq = slot.as_ref().map_or(0, |e| e.seq + 1);
                    *slot = Some(CelebrationEvent {
                        seq,
                        celebration: next,
                    });
                });
            }
        });
    };

    view! {
        <section style="width: 100%; max-width: 480px;">
            <Show
                when=move || banner().is_some()
                fallback=move || view! {
                    <form on:submit=on_submit style="display: flex; gap: 10px; flex-wrap: wrap;">
                        <input
                            type="email"
                            required=true
                            placeholder=EMAIL_PLACEHOLDER
                            style=INPUT_STYLE
                            prop:value=move || controller.with(|c| c.draft().to_string())
                            on:input=move |ev| controller.update(|c| c.set_draft(event_target_value(&ev)))
                            disabled=move || controls().input_disabled
                        />
                        <button type="submit" style=BUTTON_STYLE disabled=move || controls().button_disabled>
                            {move || submit_label(loading())}
                        </button>
                    </form>
                }
            >
                <div style="display: flex; flex-direction: column; align-items: center; gap: 12px;">
                    <p style="margin: 0; font-size: 18px; font-weight: 600;">
                        {move || banner().unwrap_or_default()}
                    </p>
                    <button
                        style=BUTTON_STYLE
                        on:click=move |_| controller.update(|c| c.reset())
                    >
                        {RESET_LABEL}
                    </button>
                </div>
            </Show>
        </section>
    }
}

/// "N people already joined", fetched once on mount and hidden until known.
#[component]
pub(super) fn SignupCounter(
    controller: RwSignal<WaitlistController>,
    backend: StoredValue<FetchBackend>,
) -> impl IntoView {
    let backend = backend.get_value();
    spawn_local(async move {
        let result = request_count(&backend).await;
        controller.try_update(|c| c.count_loaded(result));
    });

    view! {
        {move || {
            controller
                .with(|c| counter_text(c.count()))
                .map(|(n, rest)| view! {
                    <p style="margin: 0; font-size: 15px; color: #6b6658;">
                        <strong style="color: #333333;">{n}</strong>
                        {rest}
                    </p>
                })
        }}
    }
}
