use super::model::{answer_paragraphs, query_from_search, query_string_for, AiSearchState};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::{deadline, with_timeout};
use crate::shared::browser;
use crate::shared::generation::GenerationCounter;
use contracts::domain::a002_ai_search::dto::{AiSearchResult, AiSource};
use contracts::enums::ExploreTab;
use leptos::prelude::*;

const RECOMMENDED: [[&str; 3]; 5] = [
    ["맛집", "노인복지", "서산교통"],
    ["해미읍성", "복지 혜택", "서산 카페"],
    ["서산 명소", "전통시장", "문화행사"],
    ["체육시설", "서산시청", "교통정보"],
    ["관광지", "서산 맛집", "주차장"],
];

const POPULAR: [(&str, &str); 4] = [
    ("민원", "민원 신청"),
    ("복지", "노인복지"),
    ("행사", "서산 행사"),
    ("관광", "해미 읍성"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultTab {
    Answer,
    Sources,
}

#[component]
pub fn AiSearchPage() -> impl IntoView {
    let Some(ctx) = use_context::<AppGlobalContext>() else {
        log::error!("AppGlobalContext not provided");
        return view! { <div class="error">"설정을 불러올 수 없습니다."</div> }.into_any();
    };

    let client = StoredValue::new(ctx.ai.clone());
    let timeout_ms = ctx.config.api.ai_timeout_ms;
    let input = RwSignal::new(String::new());
    let detailed = RwSignal::new(true);
    let state = RwSignal::new(AiSearchState::Idle);
    let tab = RwSignal::new(ResultTab::Answer);
    let recommended = RwSignal::new(0usize);
    let generation = StoredValue::new(GenerationCounter::default());

    let run = move |query: String| {
        let query = query.trim().to_string();
        if query.is_empty() {
            return;
        }
        input.set(query.clone());

        let mut issued = None;
        generation.update_value(|counter| issued = Some(counter.advance()));
        let Some(ticket) = issued else {
            return;
        };
        state.set(AiSearchState::Loading);
        tab.set(ResultTab::Answer);

        let client = client.get_value();
        let detailed = detailed.get_untracked();
        log::info!("AI search '{}' (detailed: {})", query, detailed);
        wasm_bindgen_futures::spawn_local(async move {
            let response =
                with_timeout(client.ai_search(&query, detailed), deadline(timeout_ms), timeout_ms)
                    .await;
            let current = generation
                .try_with_value(|counter| counter.is_current(ticket))
                .unwrap_or(false);
            if !current {
                log::debug!("Dropping stale AI answer for '{}'", query);
                return;
            }
            state.set(AiSearchState::from_response(response));
        });
    };

    let submit = move |query: String| {
        browser::push_query(&query_string_for(query.trim()));
        run(query);
    };

    if let Some(query) = query_from_search(&browser::current_search()) {
        run(query);
    }

    view! {
        <div class="ai-search">
            <section class="ai-top">
                <div class="ai-search-box">
                    <input
                        class="ai-search-input"
                        placeholder="찾으시는 소식이 있나요?"
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                submit(input.get_untracked());
                            }
                        }
                    />
                    <button type="button" class="ai-search-btn" on:click=move |_| submit(input.get_untracked())>
                        "AI 검색"
                    </button>
                </div>
                <label class="ai-mode">
                    <input
                        type="checkbox"
                        prop:checked=move || detailed.get()
                        on:change=move |ev| detailed.set(event_target_checked(&ev))
                    />
                    <span>"상세 검색"</span>
                </label>
                <div class="ai-recommended">
                    <button
                        type="button"
                        class="ai-recommended-title"
                        title="추천 검색 새로고침"
                        on:click=move |_| recommended.update(|i| *i = (*i + 1) % RECOMMENDED.len())
                    >
                        "추천 검색"
                    </button>
                    {move || {
                        RECOMMENDED[recommended.get() % RECOMMENDED.len()]
                            .into_iter()
                            .map(|keyword| {
                                view! {
                                    <button type="button" class="pill-btn" on:click=move |_| submit(keyword.to_string())>
                                        {keyword}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </section>

            {move || match state.get() {
                AiSearchState::Idle => landing(submit).into_any(),
                other => view! {
                    <section class="ai-result">
                        <div class="toast-row">
                            <span class="toast-bubble">{other.toast()}</span>
                        </div>
                        <div class="tabs-bar">
                            <button
                                type="button"
                                class="tab-btn"
                                class:tab-active=move || tab.get() == ResultTab::Answer
                                on:click=move |_| tab.set(ResultTab::Answer)
                            >
                                "답변"
                            </button>
                            <button
                                type="button"
                                class="tab-btn"
                                class:tab-active=move || tab.get() == ResultTab::Sources
                                on:click=move |_| tab.set(ResultTab::Sources)
                            >
                                "출처"
                            </button>
                        </div>
                        <div class="result-body">{result_body(other, tab)}</div>
                    </section>
                }
                .into_any(),
            }}
        </div>
    }
    .into_any()
}

fn result_body(state: AiSearchState, tab: RwSignal<ResultTab>) -> AnyView {
    match state {
        AiSearchState::Idle => ().into_any(),
        AiSearchState::Loading => view! {
            <div class="loading-container">
                <div class="loading-spinner"></div>
                <h3 class="loading-title">"AI가 열심히 답변을 준비하고 있어요"</h3>
                <p class="loading-description">
                    "서산시의 다양한 정보를 종합하여 가장 정확한 답변을 찾고 있습니다. 잠시만 기다려주세요!"
                </p>
            </div>
        }
        .into_any(),
        AiSearchState::Empty(message) | AiSearchState::Failed(message) => view! {
            <div class="no-result-box">
                <p>"이런, 결과가 없습니다. 다시 시도해보세요."</p>
                <p class="no-result-detail">{message}</p>
            </div>
        }
        .into_any(),
        AiSearchState::Ok(result) => {
            let sources = result.sources().to_vec();
            view! {
                {move || match tab.get() {
                    ResultTab::Answer => answer_view(&result),
                    ResultTab::Sources => sources_view(&sources),
                }}
            }
            .into_any()
        }
    }
}

fn answer_view(result: &AiSearchResult) -> AnyView {
    match result {
        AiSearchResult::Detailed { tldr, items, .. } => {
            let items = items.clone();
            view! {
                <div class="answer">
                    {(!tldr.is_empty()).then(|| view! { <p class="answer-tldr">{tldr.clone()}</p> })}
                    {items
                        .into_iter()
                        .enumerate()
                        .map(|(idx, item)| {
                            view! {
                                <div class="answer-item">
                                    <div class="answer-item-no">{(idx + 1).to_string()}</div>
                                    <div class="answer-item-body">
                                        <h3>
                                            {item.title}
                                            {item.url.map(|url| view! {
                                                <a href=url target="_blank" rel="noopener noreferrer" class="answer-item-link">
                                                    "↗"
                                                </a>
                                            })}
                                        </h3>
                                        <p>{item.summary}</p>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            }
            .into_any()
        }
        AiSearchResult::Brief { answer, .. } if answer.trim().is_empty() => view! {
            <div class="answer">
                <p>"답변 대신 출처 목록을 확인해주세요."</p>
            </div>
        }
        .into_any(),
        AiSearchResult::Brief { answer, .. } => view! {
            <div class="answer">
                {answer_paragraphs(answer)
                    .into_iter()
                    .map(|p| view! { <p>{p}</p> })
                    .collect_view()}
            </div>
        }
        .into_any(),
        AiSearchResult::Unrecognized(text) => view! {
            <div class="answer">
                <pre class="answer-raw">{text.clone()}</pre>
            </div>
        }
        .into_any(),
        AiSearchResult::Empty | AiSearchResult::Failure(_) => ().into_any(),
    }
}

fn sources_view(sources: &[AiSource]) -> AnyView {
    if sources.is_empty() {
        return view! { <div class="no-result-box">"출처 정보가 없습니다."</div> }.into_any();
    }
    view! {
        <div class="result-card-list">
            {sources
                .iter()
                .cloned()
                .map(|source| {
                    view! {
                        <div class="result-card">
                            <div class="result-card-title">{source.title}</div>
                            <div class="result-card-provider">{source.provider}</div>
                            <a class="result-card-link" href=source.link target="_blank" rel="noopener noreferrer">
                                "바로가기"
                            </a>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

fn landing(submit: impl Fn(String) + Copy + Send + Sync + 'static) -> impl IntoView {
    view! {
        <section class="ai-landing">
            <div class="section">
                <div class="section-title">"인기 키워드"</div>
                <div class="grid">
                    {POPULAR
                        .into_iter()
                        .map(|(tag, text)| {
                            view! {
                                <button type="button" class="keyword-card" on:click=move |_| submit(text.to_string())>
                                    <span class="tag">{tag}</span>
                                    <span class="card-text">{text}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div class="section">
                <div class="section-title">"인기 카테고리"</div>
                <div class="grid-cat">
                    {[ExploreTab::News, ExploreTab::Welfare, ExploreTab::CultureTourism]
                        .into_iter()
                        .map(|tab| {
                            let href = format!("/explore?tab={}", urlencoding::encode(tab.label()));
                            view! {
                                <a class="cat-card" href=href>
                                    <span class="cat-title">{tab.label()}</span>
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
