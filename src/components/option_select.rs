//! Option Select Component
//!
//! Select over a fixed option list; the first option is the blank placeholder.

use leptos::prelude::*;

use crate::presentation::SelectOption;

#[component]
pub fn OptionSelect(
    #[prop(into)] name: String,
    options: Vec<SelectOption>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <select
            name=name
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            {options.into_iter().map(|option| {
                let option_value = option.value.clone();
                let is_selected = move || value.get() == option_value;
                view! {
                    <option value=option.value selected=is_selected>
                        {option.label}
                    </option>
                }
            }).collect_view()}
        </select>
    }
}
