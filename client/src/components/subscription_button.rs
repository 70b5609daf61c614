//! Button that sends the browser to Stripe checkout or the billing portal.

#[cfg(test)]
#[path = "subscription_button_test.rs"]
mod subscription_button_test;

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::components::toaster::notify_error;
use crate::state::toast::ToastState;

/// Label for the subscription button.
pub fn subscription_label(is_pro: bool) -> &'static str {
    if is_pro { "Manage Subscription" } else { "Upgrade" }
}

/// Request `/api/stripe` and redirect to the returned URL. `loading` guards
/// the triggering control for the duration of the request.
pub fn start_billing(loading: RwSignal<bool>, toasts: RwSignal<ToastState>) {
    if loading.get_untracked() {
        return;
    }
    loading.set(true);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_billing_url().await {
            Ok(url) => crate::util::nav::redirect(&url),
            Err(e) => {
                log::warn!("billing url failed: {e}");
                notify_error(toasts);
            }
        }
        loading.set(false);
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = toasts;
        loading.set(false);
    }
}

#[component]
pub fn SubscriptionButton(#[prop(into)] is_pro: Signal<bool>) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let loading = RwSignal::new(false);

    view! {
        <button
            class="btn btn--small"
            class:btn--premium=move || !is_pro.get()
            disabled=move || loading.get()
            on:click=move |_| start_billing(loading, toasts)
        >
            {move || subscription_label(is_pro.get())}
            <Show when=move || !is_pro.get()>
                <span class="btn__sparkle" aria-hidden="true">"✦"</span>
            </Show>
        </button>
    }
}
