//! Prompt input under the message list.

use leptos::prelude::*;

use crate::state::chat::ChatState;

#[component]
pub fn ChatForm(chat: RwSignal<ChatState>, on_send: Callback<()>) -> impl IntoView {
    let pending = move || chat.get().pending;

    view! {
        <form
            class="chat-form"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                on_send.run(());
            }
        >
            <input
                class="chat-form__input"
                placeholder="Type a message"
                disabled=pending
                prop:value=move || chat.get().prompt
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    chat.update(|c| c.prompt = value);
                }
            />
            <button class="btn btn--ghost chat-form__send" type="submit" disabled=pending aria-label="Send">
                "➤"
            </button>
        </form>
    }
}
