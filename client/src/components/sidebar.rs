//! Route sidebar and its slide-over variant for narrow screens.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::nav::{NavAction, ROUTES, install_navigation, is_active, route_action};

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let pathname = use_location().pathname;
    let nav_target = RwSignal::new(None::<String>);
    install_navigation(nav_target, use_navigate());

    view! {
        <nav class="sidebar">
            {ROUTES
                .iter()
                .map(|route| {
                    let on_click = move |_| match route_action(route, auth.get_untracked().is_pro()) {
                        NavAction::Navigate(href) => {
                            ui.update(|u| u.mobile_sidebar_open = false);
                            nav_target.set(Some(href.to_owned()));
                        }
                        NavAction::OpenProModal => ui.update(UiState::open_pro_modal),
                    };
                    view! {
                        <button
                            class="sidebar__item"
                            class:sidebar__item--active=move || is_active(route.href, &pathname.get())
                            on:click=on_click
                        >
                            {route.label}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </nav>
    }
}

#[component]
pub fn MobileSidebar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <button
            class="btn btn--ghost mobile-sidebar__trigger"
            aria-label="Open menu"
            on:click=move |_| ui.update(|u| u.mobile_sidebar_open = true)
        >
            "☰"
        </button>
        <Show when=move || ui.get().mobile_sidebar_open>
            <div class="sheet-backdrop" on:click=move |_| ui.update(|u| u.mobile_sidebar_open = false)>
                <aside class="sheet sheet--left" on:click=move |ev| ev.stop_propagation()>
                    <Sidebar/>
                </aside>
            </div>
        </Show>
    }
}
