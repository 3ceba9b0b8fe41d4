//! Anfragen Frontend App
//!
//! Wires the record store, controller and view store together.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands::TauriRecordStore;
use crate::components::AnfragenTable;
use crate::context::AppContext;
use crate::controller::RecordListController;
use crate::models::COLLECTION;
use crate::store::{store_sync, ViewState};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(ViewState::default());
    provide_context(store);

    let controller = RecordListController::new(TauriRecordStore::new(), COLLECTION, move |state| {
        store_sync(&store, state);
    });

    // Push listener lives as long as the app
    let listener = controller.clone();
    spawn_local(async move {
        listener.run().await;
    });

    let ctx = AppContext::new(controller);
    provide_context(ctx);
    on_cleanup(move || ctx.dispose());

    view! {
        <main class="main-content">
            <AnfragenTable />
        </main>
    }
}
