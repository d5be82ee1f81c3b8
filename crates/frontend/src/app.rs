use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::config::AppConfig;
use leptos::prelude::*;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // Provide backend clients and configuration to the whole app via context.
    provide_context(AppGlobalContext::new(config));

    view! {
        <AppRoutes />
    }
}
