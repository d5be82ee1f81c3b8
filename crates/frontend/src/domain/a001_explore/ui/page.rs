use super::details::ItemDetails;
use super::list::ExploreList;
use crate::domain::a001_explore::view_model::ExploreViewModel;
use crate::layout::global_context::AppGlobalContext;
use contracts::enums::{ExploreTab, Region};
use leptos::prelude::*;

#[component]
pub fn ExplorePage() -> impl IntoView {
    let Some(ctx) = use_context::<AppGlobalContext>() else {
        log::error!("AppGlobalContext not provided");
        return view! { <div class="error">"설정을 불러올 수 없습니다."</div> }.into_any();
    };

    let explore = ExploreViewModel::new(ctx.backend.clone(), &ctx.config);
    explore.init();

    let is_detail = Memo::new(move |_| explore.filter.with(|f| f.view.is_detail()));

    view! {
        <div class="explore-page" on:click=move |_| explore.close_menu()>
            <TabBar explore=explore />
            {move || {
                if is_detail.get() {
                    view! {
                        <div class="explore-frame detail-frame">
                            <ItemDetails explore=explore />
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="explore-frame">
                            <RegionSidebar explore=explore />
                            <main class="explore-main">
                                {move || {
                                    explore
                                        .filter
                                        .with(|f| f.sub.clone().map(|sub| (f.tab.label(), sub)))
                                        .map(|(tab, sub)| {
                                            view! {
                                                <div class="filter-crumb">
                                                    <span>{tab}</span>
                                                    <span class="crumb-sep">"›"</span>
                                                    <span>{sub}</span>
                                                </div>
                                            }
                                        })
                                }}
                                <div class="count-bar">
                                    <span>{move || explore.count_text()}</span>
                                </div>
                                <ExploreList explore=explore />
                            </main>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
    .into_any()
}

#[component]
fn TabBar(explore: ExploreViewModel) -> impl IntoView {
    view! {
        // clicks inside the bar must not reach the outside-click handler
        <div class="tab-pill" on:click=|ev| ev.stop_propagation()>
            {ExploreTab::all()
                .into_iter()
                .map(|tab| {
                    let active = move || explore.filter.with(|f| f.tab == tab);
                    let opened = move || explore.open_menu.get() == Some(tab);
                    view! {
                        <div class="tab-item">
                            <button
                                type="button"
                                class="tab-btn"
                                class:tab-btn-active=active
                                on:click=move |_| explore.select_tab(tab)
                            >
                                <span>{tab.label()}</span>
                                {tab
                                    .has_subcategories()
                                    .then(|| {
                                        view! {
                                            <span class="caret" class:caret-up=opened>
                                                "▾"
                                            </span>
                                        }
                                    })}
                            </button>
                            <Show when=opened>
                                <div class="dd-menu">
                                    <ul class="dd-list">
                                        {tab
                                            .subcategories()
                                            .iter()
                                            .map(|sub| {
                                                let sub: &'static str = sub;
                                                let selected = move || {
                                                    explore
                                                        .filter
                                                        .with(|f| f.tab == tab && f.sub.as_deref() == Some(sub))
                                                };
                                                view! {
                                                    <li
                                                        class="dd-item"
                                                        class:dd-item-active=selected
                                                        on:click=move |_| explore.select_sub(tab, sub)
                                                    >
                                                        {sub}
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                </div>
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn RegionSidebar(explore: ExploreViewModel) -> impl IntoView {
    view! {
        <aside class="explore-side">
            <div class="side-title">"지역"</div>
            <ul class="side-list">
                {Region::all()
                    .into_iter()
                    .map(|region| {
                        let active = move || explore.filter.with(|f| f.region == region);
                        view! {
                            <li
                                class="side-item"
                                class:side-item-active=active
                                on:click=move |_| explore.select_region(region)
                            >
                                {region.label()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </aside>
    }
}
