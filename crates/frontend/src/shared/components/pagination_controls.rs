use leptos::prelude::*;

/// PaginationControls component - numbered page buttons with prev/next arrows
///
/// Pages are 1-based and every page from 1 to `total_pages` gets a button
/// (no sliding window).
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Total number of pages, at least 1
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Callback when page changes
    on_page_change: Callback<u32>,
) -> impl IntoView {
    let at_first = move || current_page.get() <= 1;
    let at_last = move || current_page.get() >= total_pages.get();

    view! {
        <nav class="pagination-controls" aria-label="페이지네이션">
            <button
                type="button"
                class="pagination-arrow"
                disabled=at_first
                aria-label="이전 페이지"
                on:click=move |_| {
                    if !at_first() {
                        on_page_change.run(current_page.get() - 1);
                    }
                }
            >
                "‹"
            </button>
            {move || {
                let current = current_page.get();
                (1..=total_pages.get().max(1))
                    .map(|n| {
                        view! {
                            <button
                                type="button"
                                class=if n == current { "pagination-btn active" } else { "pagination-btn" }
                                aria-current=if n == current { Some("page") } else { None }
                                on:click=move |_| on_page_change.run(n)
                            >
                                {n.to_string()}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            <button
                type="button"
                class="pagination-arrow"
                disabled=at_last
                aria-label="다음 페이지"
                on:click=move |_| {
                    if !at_last() {
                        on_page_change.run(current_page.get() + 1);
                    }
                }
            >
                "›"
            </button>
        </nav>
    }
}
