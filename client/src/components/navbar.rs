//! Top bar: menu trigger, title, upgrade, theme toggle, avatar.

use leptos::prelude::*;

use crate::components::avatar::UserAvatar;
use crate::components::sidebar::MobileSidebar;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            auth.update(|a| a.user = None);
            crate::util::nav::redirect("/login");
        });
    };

    view! {
        <header class="navbar">
            <div class="navbar__start">
                <MobileSidebar/>
                <a class="navbar__title" href="/">"companion.ai"</a>
            </div>
            <div class="navbar__end">
                <Show when=move || auth.get().user.is_some() && !auth.get().is_pro()>
                    <button class="btn btn--small btn--premium" on:click=move |_| ui.update(UiState::open_pro_modal)>
                        "Upgrade"
                        <span class="btn__sparkle" aria-hidden="true">"✦"</span>
                    </button>
                </Show>
                <button
                    class="btn btn--ghost navbar__theme"
                    title="Toggle dark mode"
                    on:click=move |_| {
                        let next = crate::util::dark_mode::toggle(ui.get_untracked().dark_mode);
                        ui.update(|u| u.dark_mode = next);
                    }
                >
                    {move || if ui.get().dark_mode { "☀" } else { "☾" }}
                </button>
                <UserAvatar/>
                <Show when=move || auth.get().user.is_some()>
                    <button class="btn btn--ghost navbar__logout" on:click=on_logout>"Logout"</button>
                </Show>
            </div>
        </header>
    }
}
