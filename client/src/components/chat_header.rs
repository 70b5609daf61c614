//! Header above a conversation: back, companion identity, owner actions.

use companions::Companion;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::avatar::BotAvatar;
#[cfg(feature = "hydrate")]
use crate::components::toaster::{notify_error, notify_success};
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::nav::{go_back, install_navigation};

/// Edit and delete are rendered only when the signed-in user owns `companion`.
/// `message_count` follows the conversation as replies arrive.
#[component]
pub fn ChatHeader(companion: Companion, #[prop(into)] message_count: Signal<i64>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let nav_target = RwSignal::new(None::<String>);
    install_navigation(nav_target, use_navigate());

    let menu_open = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let id = StoredValue::new(companion.id.clone());
    let owner = companion.clone();
    let is_owner = move || owner.is_owned_by(auth.get().user_id());

    let on_edit = move |_| {
        menu_open.set(false);
        nav_target.set(Some(format!("/companion/{}", id.get_value())));
    };

    let on_delete = move |_| {
        if deleting.get_untracked() {
            return;
        }
        menu_open.set(false);
        deleting.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_companion(&id.get_value()).await {
                Ok(()) => {
                    notify_success(toasts);
                    nav_target.set(Some("/".to_owned()));
                }
                Err(e) => {
                    log::warn!("companion delete failed: {e}");
                    notify_error(toasts);
                }
            }
            deleting.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = toasts;
            deleting.set(false);
        }
    };

    view! {
        <header class="chat-header">
            <div class="chat-header__identity">
                <button class="btn btn--ghost chat-header__back" on:click=move |_| go_back() aria-label="Back">
                    "‹"
                </button>
                <BotAvatar src=companion.src.clone()/>
                <div class="chat-header__text">
                    <div class="chat-header__title">
                        <span class="chat-header__name">{companion.name.clone()}</span>
                        <span class="chat-header__count" title="Messages">
                            {move || message_count.get()}
                        </span>
                    </div>
                    <span class="chat-header__creator">
                        {format!("Created by @{}", companion.username)}
                    </span>
                </div>
            </div>

            <Show when=is_owner>
                <div class="chat-header__menu">
                    <button
                        class="btn btn--secondary"
                        aria-label="Companion actions"
                        disabled=move || deleting.get()
                        on:click=move |_| menu_open.update(|open| *open = !*open)
                    >
                        "⋮"
                    </button>
                    <Show when=move || menu_open.get()>
                        <div class="chat-header__dropdown" role="menu">
                            <button class="chat-header__action" role="menuitem" on:click=on_edit>
                                "Edit"
                            </button>
                            <button
                                class="chat-header__action chat-header__action--danger"
                                role="menuitem"
                                on:click=on_delete
                            >
                                "Delete"
                            </button>
                        </div>
                    </Show>
                </div>
            </Show>
        </header>
    }
}
