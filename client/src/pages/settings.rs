//! Settings page: current plan and the subscription button.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::layout::AppLayout;
use crate::components::subscription_button::SubscriptionButton;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

pub fn plan_description(is_pro: bool) -> &'static str {
    if is_pro {
        "You are currently on a Pro plan."
    } else {
        "You are currently on a free plan."
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());
    let is_pro = Signal::derive(move || auth.get().is_pro());

    view! {
        <AppLayout>
            <div class="settings-page">
                <h3 class="settings-page__title">"Settings"</h3>
                <p class="settings-page__plan">{move || plan_description(is_pro.get())}</p>
                <SubscriptionButton is_pro=is_pro/>
            </div>
        </AppLayout>
    }
}
