//! Home page: search, category filter and the companion grid.
//!
//! The companion list is keyed on the URL query string, so changing the
//! category or the search term refetches it.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use companions::{CATEGORY_PARAM, CompanionQuery, NAME_PARAM};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::categories::Categories;
use crate::components::companions::Companions;
use crate::components::layout::AppLayout;
use crate::components::search_input::SearchInput;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;
use crate::util::query::query_value;

/// Build the list filter from a `?categoryId=..&name=..` query string.
/// Empty values are treated as absent.
pub fn companion_query(search: &str) -> CompanionQuery {
    let non_empty = |key| query_value(search, key).filter(|v| !v.trim().is_empty());
    CompanionQuery { category_id: non_empty(CATEGORY_PARAM), name: non_empty(NAME_PARAM) }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let search = use_location().search;
    let categories = LocalResource::new(|| crate::net::api::fetch_categories());
    let companions = LocalResource::new(move || {
        let query = companion_query(&search.get());
        async move { crate::net::api::fetch_companions(&query).await }
    });

    view! {
        <AppLayout>
            <div class="home-page">
                <SearchInput/>
                <Suspense fallback=move || view! { <div class="categories categories--loading"></div> }>
                    {move || {
                        categories
                            .get()
                            .map(|result| view! { <Categories categories=result.unwrap_or_default()/> })
                    }}
                </Suspense>
                <Suspense fallback=move || view! { <p class="home-page__loading">"Loading companions..."</p> }>
                    {move || {
                        companions
                            .get()
                            .map(|result| match result {
                                Ok(list) => view! { <Companions companions=list/> }.into_any(),
                                Err(e) => view! { <p class="home-page__error">{e}</p> }.into_any(),
                            })
                    }}
                </Suspense>
            </div>
        </AppLayout>
    }
}
