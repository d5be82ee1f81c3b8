pub mod global_context;

use leptos::prelude::*;

/// Portal shell: header navigation above the routed page
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let path = crate::shared::browser::current_path();
    let on_ai = path.starts_with("/ai-search");

    view! {
        <div class="app-layout">
            <header class="top-header">
                <a class="brand" href="/">"서산시 소식"</a>
                <nav class="top-nav">
                    <a href="/explore" class:active=!on_ai>"탐색"</a>
                    <a href="/ai-search" class:active=on_ai>"AI 검색"</a>
                </nav>
            </header>
            <main class="app-main">{children()}</main>
        </div>
    }
}
