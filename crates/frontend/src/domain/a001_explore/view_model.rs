use super::api::BackendClient;
use super::paging::PagingPolicy;
use super::resolver::{resolve_listing, Listing, LoadKey, PageLoad};
use super::state::{parse_query, to_query, FilterState, ItemId};
use super::transitions::{
    neighbours, step_detail, to_list, toggle_menu, with_detail, with_page, with_region, with_sub,
    with_tab, Step,
};
use crate::shared::api_utils::{browser_timer, FetchError};
use crate::shared::browser;
use crate::shared::config::AppConfig;
use crate::shared::generation::{Generation, GenerationCounter};
use crate::shared::text::group_thousands;
use contracts::domain::a001_explore::dto::ListItem;
use contracts::enums::{ExploreTab, Region};
use leptos::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// `key` is the load in flight, `None` before the first one is issued
    Loading { key: Option<LoadKey> },
    Ready { key: LoadKey, outcome: PageLoad },
}

/// Whether `key` still has to be fetched. Loaded and empty results are
/// reused for the same key; failures are not.
pub fn needs_load(load: &LoadState, key: &LoadKey) -> bool {
    match load {
        LoadState::Loading { key: in_flight } => in_flight.as_ref() != Some(key),
        LoadState::Ready { key: loaded, outcome } => {
            loaded != key || matches!(outcome, PageLoad::Failed { .. })
        }
    }
}

/// Accept a finished load only while `ticket` is the latest one issued
pub fn land(
    counter: &GenerationCounter,
    ticket: Generation,
    result: Result<Listing, FetchError>,
    state: &FilterState,
) -> Option<PageLoad> {
    if !counter.is_current(ticket) {
        return None;
    }
    Some(PageLoad::from_result(result, state))
}

/// ViewModel обозревателя: состояние фильтра, загрузка списка, навигация
#[derive(Clone, Copy)]
pub struct ExploreViewModel {
    pub filter: RwSignal<FilterState>,
    pub open_menu: RwSignal<Option<ExploreTab>>,
    pub load: RwSignal<LoadState>,
    pub policy: PagingPolicy,
    generation: StoredValue<GenerationCounter>,
    backend: StoredValue<Arc<dyn BackendClient>>,
    search_display: u32,
    timeout_ms: u32,
}

impl ExploreViewModel {
    pub fn new(backend: Arc<dyn BackendClient>, config: &AppConfig) -> Self {
        let policy = PagingPolicy::from(&config.explore);
        let initial = parse_query(&browser::current_search(), &policy);
        Self {
            filter: RwSignal::new(initial),
            open_menu: RwSignal::new(None),
            load: RwSignal::new(LoadState::Loading { key: None }),
            policy,
            generation: StoredValue::new(GenerationCounter::default()),
            backend: StoredValue::new(backend),
            search_display: config.explore.search_display,
            timeout_ms: config.api.request_timeout_ms,
        }
    }

    /// Canonicalize the URL, follow back/forward and re-check the load on every commit
    pub fn init(&self) {
        let vm = *self;
        browser::replace_query(&to_query(&self.filter.get_untracked()));

        browser::on_popstate(move || {
            let state = parse_query(&browser::current_search(), &vm.policy);
            log::debug!("popstate: {:?}", state);
            vm.open_menu.set(None);
            vm.filter.set(state);
            browser::scroll_to_top();
        });

        // every commit re-checks, so a failed key is retried even when unchanged
        Effect::new(move |_| {
            let key = LoadKey::of(&vm.filter.get());
            vm.load_for(key);
        });
    }

    fn load_for(&self, key: LoadKey) {
        if !self.load.with_untracked(|load| needs_load(load, &key)) {
            return;
        }

        let mut issued = None;
        self.generation
            .update_value(|counter| issued = Some(counter.advance()));
        let Some(ticket) = issued else {
            return;
        };

        let state = self.filter.get_untracked();
        let backend = self.backend.get_value();
        let vm = *self;
        self.load.set(LoadState::Loading {
            key: Some(key.clone()),
        });

        wasm_bindgen_futures::spawn_local(async move {
            let timer = browser_timer(vm.timeout_ms);
            let result = resolve_listing(
                backend.as_ref(),
                &state,
                &vm.policy,
                vm.search_display,
                &timer,
            )
            .await;

            let Some(counter) = vm.generation.try_get_value() else {
                return;
            };
            let Some(outcome) = land(&counter, ticket, result, &state) else {
                log::debug!("Dropping stale response for {:?}", key);
                return;
            };

            let clamp_total = match &outcome {
                PageLoad::Failed { .. } => None,
                other => Some(other.total()),
            };
            vm.load.set(LoadState::Ready { key, outcome });
            if let Some(total) = clamp_total {
                vm.clamp_page(total);
            }
        });
    }

    /// Pull the page back inside the loaded range without a new history entry
    fn clamp_page(&self, total: usize) {
        let current = self.filter.get_untracked();
        let clamped = self.policy.clamp_page(current.page, total);
        if clamped == current.page {
            return;
        }
        log::info!(
            "Page {} is past the last page, showing page {}",
            current.page,
            clamped
        );
        let next = FilterState {
            page: clamped,
            ..current
        };
        browser::replace_query(&to_query(&next));
        self.filter.set(next);
    }

    fn navigate(&self, next: FilterState) {
        let next = next.normalized(&self.policy);
        let query = to_query(&next);
        log::debug!("navigate ?{}", query);
        browser::push_query(&query);
        self.filter.set(next);
        browser::scroll_to_top();
    }

    // ---- actions ----

    pub fn select_region(&self, region: Region) {
        if let Some(next) = with_region(&self.filter.get_untracked(), region) {
            self.navigate(next);
        }
    }

    pub fn select_tab(&self, tab: ExploreTab) {
        self.open_menu.update(|open| *open = toggle_menu(*open, tab));
        self.navigate(with_tab(&self.filter.get_untracked(), tab));
    }

    pub fn select_sub(&self, tab: ExploreTab, sub: &str) {
        self.open_menu.set(None);
        if let Some(next) = with_sub(&self.filter.get_untracked(), tab, sub) {
            self.navigate(next);
        }
    }

    pub fn close_menu(&self) {
        self.open_menu.set(None);
    }

    pub fn go_to_page(&self, page: u32) {
        let total = self.total_pages_untracked().max(1);
        self.navigate(with_page(&self.filter.get_untracked(), page, total));
    }

    pub fn open_detail(&self, id: ItemId) {
        self.open_menu.set(None);
        self.navigate(with_detail(&self.filter.get_untracked(), id));
    }

    pub fn step(&self, step: Step) {
        let state = self.filter.get_untracked();
        let items = self.load.with_untracked(|load| self.visible_of(load, &state));
        if let Some(next) = step_detail(&state, &items, step) {
            self.navigate(next);
        }
    }

    pub fn back_to_list(&self) {
        self.navigate(to_list(&self.filter.get_untracked()));
    }

    // ---- derived ----

    fn visible_of(&self, load: &LoadState, state: &FilterState) -> Vec<ListItem> {
        match load {
            LoadState::Loading { .. } => Vec::new(),
            LoadState::Ready { outcome, .. } => outcome.visible(&self.policy, state).to_vec(),
        }
    }

    /// Items of the current page (reactive)
    pub fn visible_items(&self) -> Vec<ListItem> {
        let state = self.filter.get();
        self.load.with(|load| self.visible_of(load, &state))
    }

    fn pages_of(&self, load: &LoadState) -> u32 {
        match load {
            LoadState::Loading { .. } => 0,
            LoadState::Ready { outcome, .. } => self.policy.total_pages(outcome.total()),
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.load.with(|load| self.pages_of(load))
    }

    fn total_pages_untracked(&self) -> u32 {
        self.load.with_untracked(|load| self.pages_of(load))
    }

    pub fn count_text(&self) -> String {
        self.load.with(|load| match load {
            LoadState::Loading { .. } => "불러오는 중...".to_string(),
            LoadState::Ready { outcome, .. } => format!("결과 {}개", group_thousands(outcome.total())),
        })
    }

    /// Selected item plus its prev/next titles within the current page
    pub fn selection(&self) -> Option<Selection> {
        let state = self.filter.get();
        let id = state.view.selected_id()?;
        let items = self.load.with(|load| self.visible_of(load, &state));
        let around = neighbours(&items, id);
        Some(Selection {
            id,
            item: items.iter().find(|item| item.id == id).cloned(),
            prev_title: around.prev.map(|item| item.title.clone()),
            next_title: around.next.map(|item| item.title.clone()),
        })
    }

    pub fn is_loading(&self) -> bool {
        self.load.with(|load| matches!(load, LoadState::Loading { .. }))
    }

    pub fn backend(&self) -> Arc<dyn BackendClient> {
        self.backend.get_value()
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

/// Detail-mode selection resolved against the loaded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: ItemId,
    /// `None` when the id is not on the loaded page
    pub item: Option<ListItem>,
    pub prev_title: Option<String>,
    pub next_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn welfare(page: u32) -> FilterState {
        FilterState {
            tab: ExploreTab::Welfare,
            page,
            ..FilterState::default()
        }
    }

    fn listing(ids: &[i64]) -> Listing {
        let items = ids
            .iter()
            .map(|id| ListItem {
                id: *id,
                title: format!("post {}", id),
                body: String::new(),
                date: "2025.08.15".to_string(),
                category_path: "복지 > 전체".to_string(),
                link: None,
                original_link: None,
                author: None,
            })
            .collect::<Vec<_>>();
        Listing {
            total: items.len(),
            items,
        }
    }

    #[test]
    fn test_loaded_key_is_reused() {
        let key = LoadKey::of(&FilterState::default());
        let loaded = LoadState::Ready {
            key: key.clone(),
            outcome: PageLoad::Loaded(listing(&[1])),
        };
        assert!(!needs_load(&loaded, &key));

        let empty = LoadState::Ready {
            key: key.clone(),
            outcome: PageLoad::from_result(Ok(Listing::default()), &FilterState::default()),
        };
        assert!(!needs_load(&empty, &key));

        let other = LoadKey::of(&FilterState {
            region: Region::HaemiMyeon,
            ..FilterState::default()
        });
        assert!(needs_load(&loaded, &other));
    }

    #[test]
    fn test_failed_key_is_retried() {
        let state = FilterState::default();
        let key = LoadKey::of(&state);
        let failed = LoadState::Ready {
            key: key.clone(),
            outcome: PageLoad::from_result(Err(FetchError::Status(503)), &state),
        };
        assert!(needs_load(&failed, &key));
    }

    #[test]
    fn test_in_flight_key_is_not_reissued() {
        let key = LoadKey::of(&welfare(2));
        let loading = LoadState::Loading {
            key: Some(key.clone()),
        };
        assert!(!needs_load(&loading, &key));
        assert!(needs_load(&loading, &LoadKey::of(&welfare(3))));
        assert!(needs_load(&LoadState::Loading { key: None }, &key));
    }

    #[test]
    fn test_last_issued_load_wins() {
        let mut counter = GenerationCounter::default();
        let first = counter.advance();
        let second = counter.advance();

        // the older request resolves after the newer one was issued
        let stale = land(&counter, first, Ok(listing(&[1, 2])), &welfare(1));
        assert_eq!(stale, None);

        let fresh = land(&counter, second, Ok(listing(&[6, 7])), &welfare(2));
        assert_eq!(fresh, Some(PageLoad::Loaded(listing(&[6, 7]))));
    }

    #[test]
    fn test_stale_failure_is_dropped_too() {
        let mut counter = GenerationCounter::default();
        let first = counter.advance();
        counter.advance();
        let stale = land(&counter, first, Err(FetchError::Timeout(10_000)), &welfare(1));
        assert_eq!(stale, None);
    }
}
