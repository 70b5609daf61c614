//! Category filter bar for the home page.
//!
//! DESIGN
//! ======
//! The selected category lives only in the `categoryId` query parameter.
//! Clicking a control navigates to the current URL with that parameter
//! rewritten; the list below refetches from the new URL.

use companions::{CATEGORY_PARAM, Category};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::util::nav::install_navigation;
use crate::util::query::{query_value, with_query_param};

#[component]
pub fn Categories(categories: Vec<Category>) -> impl IntoView {
    let location = use_location();
    let nav_target = RwSignal::new(None::<String>);
    install_navigation(nav_target, use_navigate());

    let search = location.search;
    let pathname = location.pathname;
    let selected = Memo::new(move |_| query_value(&search.get(), CATEGORY_PARAM));

    let select = move |id: Option<&str>| {
        let href = with_query_param(&pathname.get_untracked(), &search.get_untracked(), CATEGORY_PARAM, id);
        nav_target.set(Some(href));
    };

    view! {
        <div class="categories">
            <button
                class="categories__item"
                class:categories__item--active=move || selected.get().is_none()
                on:click=move |_| select(None)
            >
                "Newest"
            </button>
            {categories
                .into_iter()
                .map(|category| {
                    let id = category.id.clone();
                    let active_id = category.id;
                    view! {
                        <button
                            class="categories__item"
                            class:categories__item--active=move || {
                                selected.get().as_deref() == Some(active_id.as_str())
                            }
                            on:click=move |_| select(Some(id.as_str()))
                        >
                            {category.name}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
