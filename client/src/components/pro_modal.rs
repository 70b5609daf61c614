//! "Upgrade to Pro" modal opened from the navbar and pro-only routes.

use leptos::prelude::*;

use crate::components::subscription_button::start_billing;
use crate::state::toast::ToastState;
use crate::state::ui::UiState;

pub const TITLE: &str = "Upgrade to Pro";
pub const PRICE: &str = "₹49.99 / month";

/// Renders nothing until mounted in the browser, then follows
/// `UiState::pro_modal_open`.
#[component]
pub fn ProModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let loading = RwSignal::new(false);
    let mounted = RwSignal::new(false);

    // Effects run only after hydration.
    Effect::new(move || mounted.set(true));

    let close = move || ui.update(UiState::close_pro_modal);
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    view! {
        <Show when=move || mounted.get() && ui.get().pro_modal_open>
            <div class="dialog-backdrop" on:click=move |_| close()>
                <div
                    class="dialog dialog--pro"
                    role="dialog"
                    aria-modal="true"
                    tabindex="0"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=on_keydown
                >
                    <h2 class="dialog__title">{TITLE}</h2>
                    <p class="dialog__description">
                        "Create " <span class="dialog__highlight">"Custom AI"</span> " Companions."
                    </p>
                    <hr class="dialog__separator"/>
                    <div class="dialog__actions dialog__actions--spread">
                        <p class="dialog__price">{PRICE}</p>
                        <button
                            class="btn btn--premium"
                            disabled=move || loading.get()
                            on:click=move |_| start_billing(loading, toasts)
                        >
                            "Subscribe"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
