//! Error Banner Component

use leptos::prelude::*;

use crate::store::{use_view_store, ViewStateStoreFields};

/// Shows the current load or mutation error, if any
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = use_view_store();

    move || store.banner().get().map(|message| view! {
        <div class="error-message">{message}</div>
    })
}
