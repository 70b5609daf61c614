//! Companion page: `/companion/new` creates, `/companion/{id}` edits.

#[cfg(test)]
#[path = "companion_test.rs"]
mod companion_test;

use companions::{Category, Companion};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::companion_form::CompanionForm;
use crate::components::layout::AppLayout;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::auth::install_unauth_redirect;
use crate::util::nav::install_navigation;

/// Route segment that selects the create form.
pub const NEW_SEGMENT: &str = "new";

/// The companion to load for a route param, or `None` for the create form.
pub fn editing_id(param: &str) -> Option<&str> {
    if param.is_empty() || param == NEW_SEGMENT { None } else { Some(param) }
}

/// What the form opens with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit(Companion),
    /// The record belongs to someone else; it is never shown in the form.
    NotOwned,
}

/// Decide the form for a fetched record. Only the owner may edit it.
pub fn form_target(fetched: Option<Companion>, user_id: Option<&str>) -> FormTarget {
    match fetched {
        None => FormTarget::Create,
        Some(companion) if companion.is_owned_by(user_id) => FormTarget::Edit(companion),
        Some(_) => FormTarget::NotOwned,
    }
}

/// Creating requires a subscription. Wait for auth before deciding.
pub fn should_block_create(auth: &AuthState, param: &str) -> bool {
    !auth.loading && auth.user.is_some() && !auth.is_pro() && editing_id(param).is_none()
}

#[derive(Clone)]
struct PageData {
    initial: Option<Companion>,
    categories: Vec<Category>,
}

#[component]
pub fn CompanionPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    install_unauth_redirect(auth, use_navigate());

    let params = use_params_map();
    let param = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let navigate = use_navigate();
    Effect::new(move || {
        if should_block_create(&auth.get(), &param.get()) {
            ui.update(UiState::open_pro_modal);
            navigate("/", NavigateOptions::default());
        }
    });

    let nav_target = RwSignal::new(None::<String>);
    install_navigation(nav_target, use_navigate());

    let data = LocalResource::new(move || {
        let param = param.get();
        async move {
            let categories = crate::net::api::fetch_categories().await?;
            let initial = match editing_id(&param) {
                Some(id) => Some(crate::net::api::fetch_companion(id).await?),
                None => None,
            };
            Ok::<_, String>(PageData { initial, categories })
        }
    });

    // `None` while auth or the record is still loading.
    let target = move || {
        let auth = auth.get();
        let result = data.get()?;
        if auth.loading {
            return None;
        }
        Some(result.map(|d| (form_target(d.initial, auth.user_id()), d.categories)))
    };

    Effect::new(move || {
        if let Some(Ok((FormTarget::NotOwned, _))) = target() {
            nav_target.set(Some("/".to_owned()));
        }
    });

    view! {
        <AppLayout>
            <div class="companion-page">
                <Suspense fallback=move || view! { <p class="companion-page__loading">"Loading..."</p> }>
                    {move || {
                        target()
                            .map(|result| match result {
                                Ok((FormTarget::Create, categories)) => {
                                    view! { <CompanionForm initial=None categories=categories/> }.into_any()
                                }
                                Ok((FormTarget::Edit(companion), categories)) => {
                                    view! { <CompanionForm initial=Some(companion) categories=categories/> }
                                        .into_any()
                                }
                                Ok((FormTarget::NotOwned, _)) => ().into_any(),
                                Err(e) => view! { <p class="companion-page__error">{e}</p> }.into_any(),
                            })
                    }}
                </Suspense>
            </div>
        </AppLayout>
    }
}
