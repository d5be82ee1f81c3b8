use super::model::{lead_text, link_label, wants_summary, DetailState, SummaryState, NO_LINK_NOTICE};
use super::view_model::{DetailRequest, ItemDetailsViewModel};
use crate::domain::a001_explore::transitions::Step;
use crate::domain::a001_explore::view_model::ExploreViewModel;
use contracts::domain::a001_explore::dto::ListItem;
use contracts::enums::ExploreTab;
use leptos::prelude::*;

#[component]
pub fn ItemDetails(explore: ExploreViewModel) -> impl IntoView {
    let vm = ItemDetailsViewModel::new();

    // waits for the list so prev/next and the page entry are known
    let request = Memo::new(move |_| {
        if explore.is_loading() {
            return None;
        }
        let selection = explore.selection()?;
        let (tab, sub) = explore.filter.with(|f| (f.tab, f.sub.clone()));
        Some(DetailRequest {
            id: selection.id,
            tab,
            sub,
            base: selection.item,
        })
    });
    Effect::new(move |_| {
        if let Some(request) = request.get() {
            vm.load(explore.backend(), request, explore.timeout_ms());
        }
    });

    let tab = move || explore.filter.with(|f| f.tab);
    let selection = Memo::new(move |_| explore.selection());

    view! {
        <article class="detail-container">
            {move || match vm.detail.get() {
                DetailState::Loading => view! {
                    <div class="detail-loading">"상세 내용을 불러오는 중..."</div>
                }
                .into_any(),
                DetailState::NotFound => view! {
                    <div class="detail-not-found">
                        <p>"선택한 글을 찾을 수 없습니다."</p>
                        <button type="button" class="btn btn-secondary" on:click=move |_| explore.back_to_list()>
                            "목록으로"
                        </button>
                    </div>
                }
                .into_any(),
                DetailState::Ready(item) => detail_body(item, tab(), vm.summary).into_any(),
            }}

            {move || {
                let current = selection.get();
                let prev = current.as_ref().and_then(|s| s.prev_title.clone());
                let next = current.as_ref().and_then(|s| s.next_title.clone());
                let (has_prev, has_next) = (prev.is_some(), next.is_some());
                view! {
                    <nav class="pn-wrap">
                        <button
                            type="button"
                            class="pn-item"
                            disabled=!has_prev
                            aria-disabled=(!has_prev).to_string()
                            on:click=move |_| explore.step(Step::Prev)
                        >
                            <span class="pn-label">"이전 글"</span>
                            <span class="pn-title">
                                {prev.unwrap_or_else(|| "이전 글이 없습니다".to_string())}
                            </span>
                        </button>
                        <button
                            type="button"
                            class="pn-item"
                            disabled=!has_next
                            aria-disabled=(!has_next).to_string()
                            on:click=move |_| explore.step(Step::Next)
                        >
                            <span class="pn-label">"다음 글"</span>
                            <span class="pn-title">
                                {next.unwrap_or_else(|| "다음 글이 없습니다".to_string())}
                            </span>
                        </button>
                    </nav>
                }
            }}

            <div class="detail-actions">
                <button type="button" class="btn btn-secondary" on:click=move |_| explore.back_to_list()>
                    "목록으로"
                </button>
            </div>
        </article>
    }
}

fn detail_body(item: ListItem, tab: ExploreTab, summary: RwSignal<SummaryState>) -> impl IntoView {
    let link_bar = match item.external_link() {
        Some(link) => {
            let href = link.to_string();
            view! {
                <a class="link-btn" href=href target="_blank" rel="noopener noreferrer">
                    <span>{link_label(tab)}</span>
                </a>
            }
            .into_any()
        }
        None => view! {
            <div class="link-btn">
                <span>{NO_LINK_NOTICE}</span>
            </div>
        }
        .into_any(),
    };

    let content = if wants_summary(tab) {
        let lead = lead_text(tab, &item.title);
        view! {
            <section class="news-wrap">
                <div class="news-badge">{move || summary.with(|s| s.badge())}</div>
                <p class="news-lead">{lead}</p>
                <ul class="news-list">
                    {move || {
                        summary.with(|s| {
                            s.lines()
                                .iter()
                                .map(|line| view! { <li>{line.clone()}</li> })
                                .collect_view()
                        })
                    }}
                </ul>
            </section>
        }
        .into_any()
    } else {
        let body_lines: Vec<String> = item.body.split('\n').map(str::to_string).collect();
        view! {
            <section class="notice-wrap">
                <table class="detail-table">
                    <tbody>
                        <tr>
                            <th>"카테고리"</th>
                            <td>{item.category_path.clone()}</td>
                        </tr>
                        <tr>
                            <th>"등록일"</th>
                            <td>{item.date.clone()}</td>
                        </tr>
                        <tr>
                            <th>"제목"</th>
                            <td>{item.title.clone()}</td>
                        </tr>
                        <tr>
                            <th>"내용"</th>
                            <td>
                                {body_lines
                                    .into_iter()
                                    .map(|line| view! { <p>{line}</p> })
                                    .collect_view()}
                            </td>
                        </tr>
                        <tr>
                            <th>"파일"</th>
                            <td>"-"</td>
                        </tr>
                    </tbody>
                </table>
            </section>
        }
        .into_any()
    };

    let datetime = item.date.replace('.', "-");
    view! {
        <div class="breadcrumb">{item.category_path.clone()}</div>
        <h1 class="detail-title">{item.title.clone()}</h1>
        <div class="detail-meta">
            <time datetime=datetime>{item.date.clone()}</time>
            {item.author.clone().map(|author| view! { <span class="detail-author">{author}</span> })}
        </div>
        {content}
        <div class="link-bar">{link_bar}</div>
    }
}
