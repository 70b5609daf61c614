//! Chat page: header, conversation and prompt form for one companion.
//!
//! DESIGN
//! ======
//! The page loads the companion and this user's history once, then keeps the
//! conversation in a page-local `ChatState`. Sends are optimistic: the prompt
//! shows immediately and is rolled back if the request fails.

use companions::CompanionChat;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::chat_form::ChatForm;
use crate::components::chat_header::ChatHeader;
use crate::components::chat_messages::ChatMessages;
use crate::components::layout::AppLayout;
#[cfg(feature = "hydrate")]
use crate::components::toaster::notify_error;
use crate::state::auth::AuthState;
use crate::state::chat::ChatState;
use crate::state::toast::ToastState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ChatPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let params = use_params_map();
    let companion_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let data = LocalResource::new(move || {
        let id = companion_id.get();
        async move { crate::net::api::fetch_chat(&id).await }
    });

    view! {
        <AppLayout>
            <div class="chat-page">
                <Suspense fallback=move || view! { <p class="chat-page__loading">"Loading..."</p> }>
                    {move || {
                        data.get()
                            .map(|result| match result {
                                Ok(chat) => view! { <Conversation chat=chat/> }.into_any(),
                                Err(e) => view! { <p class="chat-page__error">{e}</p> }.into_any(),
                            })
                    }}
                </Suspense>
            </div>
        </AppLayout>
    }
}

#[component]
fn Conversation(chat: CompanionChat) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let CompanionChat { companion, messages } = chat;
    let state = RwSignal::new(ChatState::with_history(messages, companion.message_count));
    let companion_id = StoredValue::new(companion.id.clone());

    let on_send = Callback::new(move |()| {
        let now = crate::util::nav::now_ms();
        let Some(prompt) = state.try_update(|c| c.begin_send(now)).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::send_prompt(&companion_id.get_value(), &prompt).await {
                Ok(reply) => state.update(|c| c.finish_ok(reply)),
                Err(e) => {
                    log::warn!("chat send failed: {e}");
                    state.update(|c| c.finish_err(prompt));
                    notify_error(toasts);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (prompt, companion_id, toasts);
        }
    });

    let greeting = companion.greeting();
    let src = companion.src.clone();
    let messages = Signal::derive(move || state.get().messages);
    let pending = Signal::derive(move || state.get().pending);
    let message_count = Signal::derive(move || state.get().message_count);

    view! {
        <div class="conversation">
            <ChatHeader companion=companion message_count=message_count/>
            <ChatMessages src=src greeting_text=greeting messages=messages pending=pending/>
            <ChatForm chat=state on_send=on_send/>
        </div>
    }
}
