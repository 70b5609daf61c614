//! Toast notices: the renderer and the helpers that raise them.

use std::time::Duration;

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

const TOAST_VISIBLE: Duration = Duration::from_secs(4);

fn schedule_dismiss(toasts: RwSignal<ToastState>, seq: u64) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(TOAST_VISIBLE).await;
        toasts.update(|t| t.dismiss(seq));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (toasts, seq, TOAST_VISIBLE);
    }
}

/// Show "Success", replacing any visible notice.
pub fn notify_success(toasts: RwSignal<ToastState>) {
    let seq = toasts.try_update(ToastState::success).unwrap_or_default();
    schedule_dismiss(toasts, seq);
}

/// Show "Something went wrong", replacing any visible notice.
pub fn notify_error(toasts: RwSignal<ToastState>) {
    let seq = toasts.try_update(ToastState::error).unwrap_or_default();
    schedule_dismiss(toasts, seq);
}

/// Renders the current notice, if any.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        {move || {
            toasts.get().current.map(|toast| {
                let seq = toast.seq;
                view! {
                    <div
                        class="toast"
                        class:toast--error=toast.kind == ToastKind::Error
                        role="status"
                        on:click=move |_| toasts.update(|t| t.dismiss(seq))
                    >
                        {toast.message}
                    </div>
                }
            })
        }}
    }
}
