//! Round avatars for companions and the signed-in user.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn BotAvatar(src: String) -> impl IntoView {
    view! {
        <span class="avatar avatar--bot">
            <img class="avatar__image" src=src alt="Companion"/>
        </span>
    }
}

/// The signed-in user's GitHub avatar, or their initial.
#[component]
pub fn UserAvatar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <span class="avatar avatar--user">
            {move || {
                let user = auth.get().user;
                match user.as_ref().and_then(|u| u.avatar_url.clone()) {
                    Some(url) => view! { <img class="avatar__image" src=url alt="You"/> }.into_any(),
                    None => {
                        let initial = user
                            .and_then(|u| u.name.chars().next())
                            .map(|c| c.to_uppercase().to_string())
                            .unwrap_or_default();
                        view! { <span class="avatar__initial">{initial}</span> }.into_any()
                    }
                }
            }}
        </span>
    }
}
