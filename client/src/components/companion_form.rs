//! Companion create/edit form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the companion page with the record being edited (if any) and
//! the category list. Validation and request selection live in
//! `state::companion_form`; this component binds inputs to that state and
//! runs the single request a submit produces.

use companions::{Category, Companion, Field};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::image_upload::ImageUpload;
#[cfg(feature = "hydrate")]
use crate::components::toaster::{notify_error, notify_success};
use crate::state::companion_form::CompanionFormState;
#[cfg(feature = "hydrate")]
use crate::state::companion_form::SubmitRequest;
use crate::state::toast::ToastState;
use crate::util::nav::install_navigation;

const INSTRUCTIONS_PLACEHOLDER: &str = "You are a fictional character whose name is Ada. You are a \
mathematician and writer, known for your work on the Analytical Engine. You are curious and precise, \
and you love explaining how machines can follow instructions. You get visibly excited when someone \
asks about numbers, poetry or the future of computing.";

const SEED_PLACEHOLDER: &str = "Human: Hi Ada, how's your day been?\n\
Ada: Wonderful! I spent the morning working through a new table of Bernoulli numbers. How about you?\n\n\
Human: That sounds intense. Do you think machines will ever write music?\n\
Ada: I am quite sure of it. If we can express the relations of pitched sounds in symbols, an engine can compose.";

#[component]
pub fn CompanionForm(initial: Option<Companion>, categories: Vec<Category>) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let form = RwSignal::new(CompanionFormState::new(initial.as_ref()));
    let nav_target = RwSignal::new(None::<String>);
    install_navigation(nav_target, use_navigate());

    let loading = Signal::derive(move || form.get().loading);
    let value = move |field: Field| move || form.get().values.get(field).to_owned();
    let error = move |field: Field| {
        move || {
            form.get()
                .error_for(field)
                .map(|msg| view! { <p class="form-field__error">{msg.to_owned()}</p> })
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(request) = form.try_update(CompanionFormState::begin_submit).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match &request {
                SubmitRequest::Create(input) => crate::net::api::create_companion(input).await,
                SubmitRequest::Update { id, input } => crate::net::api::update_companion(id, input).await,
            };
            match result {
                Ok(_) => {
                    form.update(|f| f.loading = false);
                    notify_success(toasts);
                    nav_target.set(Some("/".to_owned()));
                }
                Err(crate::net::api::SaveError::Rejected(errors)) => {
                    form.update(|f| f.reject(errors));
                    notify_error(toasts);
                }
                Err(crate::net::api::SaveError::Failed(e)) => {
                    log::warn!("companion save failed: {e}");
                    form.update(CompanionFormState::fail);
                    notify_error(toasts);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, toasts, nav_target);
        }
    };

    let submit_label = move || form.get().submit_label();
    let src = Signal::derive(move || form.get().values.src.clone());
    let on_src = Callback::new(move |url: String| form.update(|f| f.set_field(Field::Src, url)));

    view! {
        <form class="companion-form" on:submit=on_submit>
            <section class="companion-form__section">
                <h3>"General Information"</h3>
                <p class="companion-form__hint">"General information about your Companion"</p>
            </section>

            <div class="form-field form-field--image">
                <ImageUpload value=src on_change=on_src disabled=loading/>
                {error(Field::Src)}
            </div>

            <div class="companion-form__grid">
                <label class="form-field">
                    <span class="form-field__label">"Name"</span>
                    <input
                        class="form-field__input"
                        placeholder="Ada Lovelace"
                        disabled=move || loading.get()
                        prop:value=value(Field::Name)
                        on:input=move |ev| form.update(|f| f.set_field(Field::Name, event_target_value(&ev)))
                    />
                    <span class="form-field__hint">
                        "This is how your AI Companion will be named."
                    </span>
                    {error(Field::Name)}
                </label>

                <label class="form-field">
                    <span class="form-field__label">"Description"</span>
                    <input
                        class="form-field__input"
                        placeholder="Mathematician and first programmer"
                        disabled=move || loading.get()
                        prop:value=value(Field::Description)
                        on:input=move |ev| form.update(|f| f.set_field(Field::Description, event_target_value(&ev)))
                    />
                    <span class="form-field__hint">"Short description for your AI Companion"</span>
                    {error(Field::Description)}
                </label>

                <label class="form-field">
                    <span class="form-field__label">"Category"</span>
                    <select
                        class="form-field__input"
                        disabled=move || loading.get()
                        prop:value=value(Field::CategoryId)
                        on:change=move |ev| form.update(|f| f.set_field(Field::CategoryId, event_target_value(&ev)))
                    >
                        <option value="" disabled=true>"Select a category"</option>
                        {categories
                            .into_iter()
                            .map(|c| view! { <option value=c.id>{c.name}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                    <span class="form-field__hint">"Select a category for your AI"</span>
                    {error(Field::CategoryId)}
                </label>
            </div>

            <section class="companion-form__section">
                <h3>"Configuration"</h3>
                <p class="companion-form__hint">"Detailed instructions for AI Behaviour"</p>
            </section>

            <label class="form-field">
                <span class="form-field__label">"Instructions"</span>
                <textarea
                    class="form-field__input form-field__input--area"
                    rows="7"
                    placeholder=INSTRUCTIONS_PLACEHOLDER
                    disabled=move || loading.get()
                    prop:value=value(Field::Instructions)
                    on:input=move |ev| form.update(|f| f.set_field(Field::Instructions, event_target_value(&ev)))
                ></textarea>
                <span class="form-field__hint">
                    "Describe in detail your companion's backstory and relevant details."
                </span>
                {error(Field::Instructions)}
            </label>

            <label class="form-field">
                <span class="form-field__label">"Example Conversation"</span>
                <textarea
                    class="form-field__input form-field__input--area"
                    rows="7"
                    placeholder=SEED_PLACEHOLDER
                    disabled=move || loading.get()
                    prop:value=value(Field::Seed)
                    on:input=move |ev| form.update(|f| f.set_field(Field::Seed, event_target_value(&ev)))
                ></textarea>
                <span class="form-field__hint">
                    "Write couple of examples of a human chatting with your AI companion, write expected answers."
                </span>
                {error(Field::Seed)}
            </label>

            <div class="companion-form__actions">
                <button class="btn btn--primary" type="submit" disabled=move || loading.get()>
                    {submit_label}
                </button>
            </div>
        </form>
    }
}
