//! Name search bound to the `name` query parameter.

use companions::NAME_PARAM;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::util::nav::install_navigation;
use crate::util::query::{query_value, with_query_param};

#[component]
pub fn SearchInput() -> impl IntoView {
    let location = use_location();
    let nav_target = RwSignal::new(None::<String>);
    install_navigation(nav_target, use_navigate());

    let search = location.search;
    let pathname = location.pathname;
    let value = RwSignal::new(query_value(&search.get_untracked(), NAME_PARAM).unwrap_or_default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = value.get_untracked();
        let href = with_query_param(&pathname.get_untracked(), &search.get_untracked(), NAME_PARAM, Some(name.trim()));
        nav_target.set(Some(href));
    };

    view! {
        <form class="search-input" on:submit=on_submit>
            <input
                class="search-input__field"
                type="search"
                placeholder="Search..."
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </form>
    }
}
