//! Draft Row Component
//!
//! Editable last row of the table; adds a new request or updates the edited one.

use leptos::prelude::*;

use crate::components::DraftField;
use crate::context::AppContext;
use crate::models::Field;
use crate::presentation::row_style;
use crate::store::{use_view_store, ViewStateStoreFields};

#[component]
pub fn DraftRow() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_view_store();

    let editing = move || store.editing().get().is_some();
    let style = move || store.draft().with(|d| row_style(&d.status));

    view! {
        <tr class="draft-row" style=style>
            {Field::ALL.iter().map(|field| view! { <td><DraftField field=*field /></td> }).collect_view()}
            <td class="row-actions">
                <Show
                    when=editing
                    fallback=move || view! {
                        <button on:click=move |_| ctx.submit()>"Eintrag hinzufügen"</button>
                    }
                >
                    <button on:click=move |_| ctx.submit()>"Update"</button>
                    <button class="cancel-btn" on:click=move |_| ctx.cancel_edit()>"Abbrechen"</button>
                </Show>
            </td>
        </tr>
    }
}
