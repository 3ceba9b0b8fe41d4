//! Record Row Component
//!
//! Read-only row of a stored request with edit and delete actions.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::{Field, Record};
use crate::presentation::{format_date, is_date_field, row_style};
use crate::store::{use_view_store, ViewStateStoreFields};

#[component]
pub fn RecordRow(position: usize, record: Record) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_view_store();

    let id = record.id.clone();
    let row_class = move || {
        if store.editing().get().as_ref() == Some(&id) {
            "record-row editing"
        } else {
            "record-row"
        }
    };

    view! {
        <tr class=row_class style=row_style(&record.fields.status)>
            {Field::ALL.iter().map(|field| {
                let value = record.fields.get(*field);
                let shown = if is_date_field(*field) { format_date(value) } else { value.to_string() };
                view! { <td>{shown}</td> }
            }).collect_view()}
            <td class="row-actions">
                <button on:click=move |_| ctx.begin_edit(position)>"Bearbeiten"</button>
                <button on:click=move |_| ctx.delete(position)>"Löschen"</button>
            </td>
        </tr>
    }
}
