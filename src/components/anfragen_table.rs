//! Request Table Component
//!
//! Header, one row per record, and the draft row at the bottom.

use leptos::prelude::*;

use crate::components::{DraftRow, ErrorBanner, RecordRow};
use crate::models::Field;
use crate::store::{use_view_store, ViewStateStoreFields};

#[component]
pub fn AnfragenTable() -> impl IntoView {
    let store = use_view_store();

    view! {
        <div class="anfragen">
            <h2>"Anfragen"</h2>
            <ErrorBanner />
            <table class="manual-entries-table">
                <thead>
                    <tr>
                        {Field::ALL.iter().map(|field| view! { <th>{field.label()}</th> }).collect_view()}
                        <th>"Aktionen"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.records().get().into_iter().enumerate()
                        key=|(position, record)| (*position, record.clone())
                        children=move |(position, record)| view! { <RecordRow position=position record=record /> }
                    />
                    <DraftRow />
                </tbody>
            </table>
        </div>
    }
}
