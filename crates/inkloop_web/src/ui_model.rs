//! Page copy and view-model helpers that should be available on both wasm and
//! native.
//!
//! Keeping these out of the wasm-only `web` module lets us unit-test the text
//! the page shows for each form state on the host.

use inkloop::waitlist::{format_count, FormState, SignupCount};

pub const PAGE_TITLE: &str = "inkloop";
pub const HERO_TITLE: &str = "Something amazing is coming";
pub const HERO_SUBTITLE: &str = "Be the first to experience the future of productivity. \
Join our waitlist and get early access.";
pub const EMAIL_PLACEHOLDER: &str = "Enter your email address";
pub const RESET_LABEL: &str = "Add Another Email";

/// Which footer corner a link sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterLink {
    pub label: &'static str,
    pub href: &'static str,
    pub glyph: &'static str,
    pub side: FooterSide,
}

pub fn footer_links() -> &'static [FooterLink] {
    &[
        FooterLink {
            label: "X (Twitter)",
            href: "https://x.com/inkloopinc",
            glyph: "𝕏",
            side: FooterSide::Left,
        },
        FooterLink {
            label: "Instagram",
            href: "https://www.instagram.com/inkloop.inc",
            glyph: "◎",
            side: FooterSide::Left,
        },
        FooterLink {
            label: "LinkedIn",
            href: "#",
            glyph: "in",
            side: FooterSide::Right,
        },
        FooterLink {
            label: "Mail",
            href: "mailto:inloop.app@gmail.com",
            glyph: "✉",
            side: FooterSide::Right,
        },
    ]
}

pub fn footer_side(side: FooterSide) -> impl Iterator<Item = &'static FooterLink> {
    footer_links().iter().filter(move |l| l.side == side)
}

pub fn submit_label(loading: bool) -> &'static str {
    if loading {
        "Joining..."
    } else {
        "Join Waitlist"
    }
}

/// Which form controls are disabled in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormControls {
    pub input_disabled: bool,
    pub button_disabled: bool,
}

/// Only the submit button locks while a request is in flight; the input
/// stays editable.
pub fn form_controls(state: FormState) -> FormControls {
    FormControls {
        input_disabled: false,
        button_disabled: state == FormState::Loading,
    }
}

/// Success banner for a submitted form; `None` while the form is showing.
pub fn banner_text(state: FormState) -> Option<&'static str> {
    match state {
        FormState::SubmittedNew => Some("✓ You're on the list!"),
        FormState::SubmittedDuplicate => Some("✓ You're already on the list!"),
        FormState::Idle | FormState::Loading => None,
    }
}

/// Counter line, hidden until the count has loaded.
pub fn counter_text(count: SignupCount) -> Option<(String, &'static str)> {
    count
        .known()
        .map(|n| (format_count(n), " people already joined"))
}
