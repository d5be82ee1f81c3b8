use crate::domain::a001_explore::resolver::PageLoad;
use crate::domain::a001_explore::view_model::{ExploreViewModel, LoadState};
use crate::shared::components::pagination_controls::PaginationControls;
use contracts::domain::a001_explore::dto::ListItem;
use contracts::enums::ExploreTab;
use leptos::prelude::*;

pub const CAFE_NOTICE: &str = "카페 가입이 필요할 수 있습니다";

#[component]
pub fn ExploreList(explore: ExploreViewModel) -> impl IntoView {
    let current_page = Signal::derive(move || explore.filter.with(|f| f.page));
    let total_pages = Signal::derive(move || explore.total_pages().max(1));
    let on_page_change = Callback::new(move |page: u32| explore.go_to_page(page));

    view! {
        <section class="explore-list">
            {move || {
                let tab = explore.filter.with(|f| f.tab);
                let items = explore.visible_items();
                match explore.load.get() {
                    LoadState::Loading { .. } => view! {
                        <div class="list-loading">"목록을 불러오는 중..."</div>
                    }
                    .into_any(),
                    LoadState::Ready { outcome: PageLoad::Empty { message }, .. } => view! {
                        <div class="list-empty">
                            <p class="list-empty-title">"검색 결과가 없습니다"</p>
                            <p>{message}</p>
                        </div>
                    }
                    .into_any(),
                    LoadState::Ready { outcome: PageLoad::Failed { placeholder, error }, .. } => view! {
                        <div class="list-error" role="alert">
                            <ul class="card-list">{card(placeholder, tab, explore)}</ul>
                            <p class="list-error-detail">{error.to_string()}</p>
                        </div>
                    }
                    .into_any(),
                    LoadState::Ready { outcome: PageLoad::Loaded(_), .. } => view! {
                        <ul class="card-list">
                            {items
                                .into_iter()
                                .map(|item| card(item, tab, explore))
                                .collect_view()}
                        </ul>
                    }
                    .into_any(),
                }
            }}

            <PaginationControls
                current_page=current_page
                total_pages=total_pages
                on_page_change=on_page_change
            />
        </section>
    }
}

/// One list card. Cafe articles open the external page directly
fn card(item: ListItem, tab: ExploreTab, explore: ExploreViewModel) -> AnyView {
    let author = item
        .author
        .clone()
        .map(|author| view! { <span class="card-author">{author}</span> });

    if tab == ExploreTab::Cafe {
        if let Some(link) = item.external_link().map(str::to_string) {
            return view! {
                <li class="card card-external">
                    <a href=link target="_blank" rel="noopener noreferrer">
                        <div class="card-path">{item.category_path}</div>
                        <h3 class="card-title">{item.title}</h3>
                        <p class="card-body">{item.body}</p>
                        <div class="card-meta">
                            <time>{item.date}</time>
                            {author}
                            <span class="card-notice">{CAFE_NOTICE}</span>
                        </div>
                    </a>
                </li>
            }
            .into_any();
        }
    }

    // the error placeholder has no detail page
    let id = item.id;
    let clickable = id > 0;
    view! {
        <li class="card" class:card-disabled=!clickable>
            <button
                type="button"
                class="card-button"
                disabled=!clickable
                on:click=move |_| {
                    if clickable {
                        explore.open_detail(id);
                    }
                }
            >
                <div class="card-path">{item.category_path}</div>
                <h3 class="card-title">{item.title}</h3>
                <p class="card-body">{item.body}</p>
                <div class="card-meta">
                    <time>{item.date}</time>
                    {author}
                </div>
            </button>
        </li>
    }
    .into_any()
}
