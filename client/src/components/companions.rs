//! Companion card grid for the home page.

use companions::Companion;
use leptos::prelude::*;

#[component]
pub fn Companions(companions: Vec<Companion>) -> impl IntoView {
    if companions.is_empty() {
        return view! {
            <div class="companions companions--empty">
                <p class="companions__empty">"No companions found."</p>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="companions">
            {companions
                .into_iter()
                .map(|c| {
                    view! {
                        <a class="companion-card" href=format!("/chat/{}", c.id)>
                            <img class="companion-card__image" src=c.src alt=c.name.clone()/>
                            <span class="companion-card__name">{c.name}</span>
                            <span class="companion-card__description">{c.description}</span>
                            <span class="companion-card__footer">
                                <span class="companion-card__username">{format!("@{}", c.username)}</span>
                                <span class="companion-card__count">{c.message_count}</span>
                            </span>
                        </a>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
    .into_any()
}
