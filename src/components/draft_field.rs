//! Draft Field Component
//!
//! Input for one field of the draft row: date picker, select, or free text.

use leptos::prelude::*;

use crate::components::OptionSelect;
use crate::context::AppContext;
use crate::models::Field;
use crate::presentation::{field_domain, is_date_field, select_options};
use crate::store::{use_view_store, ViewStateStoreFields};

#[component]
pub fn DraftField(field: Field) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_view_store();

    let value = Signal::derive(move || store.draft().with(|d| d.get(field).to_string()));

    if let Some(domain) = field_domain(field) {
        return view! {
            <OptionSelect
                name=field.key()
                options=select_options(domain)
                value=value
                on_change=move |v: String| ctx.set_field(field, v)
            />
        }
        .into_any();
    }

    let input_type = if is_date_field(field) { "date" } else { "text" };
    view! {
        <input
            type=input_type
            name=field.key()
            prop:value=move || value.get()
            on:input=move |ev| ctx.set_field(field, event_target_value(&ev))
        />
    }
    .into_any()
}
