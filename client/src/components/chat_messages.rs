//! Message list of a conversation, opened by the companion's greeting.

use companions::{ChatMessage, Role};
use leptos::prelude::*;

use crate::components::avatar::{BotAvatar, UserAvatar};

#[component]
fn MessageBubble(role: Role, content: String, src: String) -> impl IntoView {
    let is_user = role == Role::User;
    view! {
        <div class="chat-message" class:chat-message--user=is_user>
            {(!is_user).then(|| view! { <BotAvatar src=src/> })}
            <div class="chat-message__bubble">{content}</div>
            {is_user.then(|| view! { <UserAvatar/> })}
        </div>
    }
}

#[component]
pub fn ChatMessages(
    #[prop(into)] src: String,
    #[prop(into)] greeting_text: String,
    #[prop(into)] messages: Signal<Vec<ChatMessage>>,
    #[prop(into)] pending: Signal<bool>,
) -> impl IntoView {
    let src_list = src.clone();
    let src_typing = src.clone();

    view! {
        <div class="chat-messages">
            <MessageBubble role=Role::System content=greeting_text src=src/>
            <For
                each=move || messages.get()
                key=|m| m.id.clone()
                children=move |m| {
                    view! { <MessageBubble role=m.role content=m.content src=src_list.clone()/> }
                }
            />
            <Show when=move || pending.get()>
                <div class="chat-message chat-message--typing">
                    <BotAvatar src=src_typing.clone()/>
                    <div class="chat-message__bubble chat-message__bubble--typing">"…"</div>
                </div>
            </Show>
        </div>
    }
}
