//! Image field of the companion form: a URL input with a live preview.

use leptos::prelude::*;

const PLACEHOLDER_IMAGE: &str = "/pkg/placeholder.svg";

#[component]
pub fn ImageUpload(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let preview = move || {
        let src = value.get();
        if src.is_empty() { PLACEHOLDER_IMAGE.to_owned() } else { src }
    };

    view! {
        <div class="image-upload">
            <img class="image-upload__preview" src=preview alt="Upload"/>
            <input
                class="image-upload__url"
                type="url"
                placeholder="https://example.com/avatar.png"
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
        </div>
    }
}
