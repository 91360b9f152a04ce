use leptos::prelude::*;

use crate::ui_model::{footer_side, FooterLink, FooterSide, HERO_SUBTITLE, HERO_TITLE, PAGE_TITLE};

#[component]
pub(super) fn Logo() -> impl IntoView {
    view! {
        <div
            aria-label=PAGE_TITLE
            style="display: flex; align-items: center; font-size: 44px; font-weight: 700; letter-spacing: -1px; color: #333333;"
        >
            <span>"inkl"</span>
            <svg
                width="58"
                height="30"
                viewBox="0 0 58 30"
                role="img"
                aria-label="Inkloop Logo"
                style="margin: 0 1px;"
            >
                <path
                    d="M29 15 C22 4, 6 4, 6 15 C6 26, 22 26, 29 15 C36 4, 52 4, 52 15 C52 26, 36 26, 29 15 Z"
                    fill="none"
                    stroke="#333333"
                    stroke-width="5"
                    stroke-linecap="round"
                />
            </svg>
            <span>"0p"</span>
        </div>
    }
}

#[component]
pub(super) fn Hero() -> impl IntoView {
    view! {
        <header style="max-width: 640px;">
            <h1 style="margin: 0 0 12px 0; font-size: 40px; line-height: 1.15;">{HERO_TITLE}</h1>
            <p style="margin: 0; font-size: 18px; line-height: 1.5; color: #6b6658;">{HERO_SUBTITLE}</p>
        </header>
    }
}

fn footer_link(link: &'static FooterLink) -> impl IntoView {
    view! {
        <a
            href=link.href
            target="_blank"
            rel="noopener noreferrer"
            aria-label=link.label
            title=link.label
            style="color: #333333; text-decoration: none; font-size: 18px; opacity: 0.75;"
        >
            {link.glyph}
        </a>
    }
}

#[component]
pub(super) fn Footer() -> impl IntoView {
    view! {
        <footer class="fade-in" style="position: relative; z-index: 1; display: flex; justify-content: space-between; padding: 18px 28px;">
            <nav style="display: flex; gap: 18px;">
                {footer_side(FooterSide::Left).map(footer_link).collect_view()}
            </nav>
            <nav style="display: flex; gap: 18px;">
                {footer_side(FooterSide::Right).map(footer_link).collect_view()}
            </nav>
        </footer>
    }
}
