//! Login page. GitHub OAuth is the only sign-in method.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    // Already signed in: nothing to do here.
    Effect::new(move || {
        if auth.get().user.is_some() {
            navigate("/", NavigateOptions::default());
        }
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1 class="login-card__title">"companion.ai"</h1>
                <p class="login-card__subtitle">"Chat with AI companions you create."</p>
                <a class="btn btn--primary login-card__github" href="/auth/github" rel="external">
                    "Sign in with GitHub"
                </a>
            </div>
        </div>
    }
}
