use super::model::{merge_detail, summary_from_result, wants_summary, DetailState, SummaryState};
use crate::domain::a001_explore::api::BackendClient;
use crate::shared::api_utils::{deadline, with_timeout};
use crate::shared::generation::{Generation, GenerationCounter};
use contracts::domain::a001_explore::dto::ListItem;
use contracts::enums::{ExploreTab, PagingStrategy};
use leptos::prelude::*;
use std::sync::Arc;

/// What the detail pane has to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: i64,
    pub tab: ExploreTab,
    pub sub: Option<String>,
    /// Entry from the loaded page, if the id is on it
    pub base: Option<ListItem>,
}

/// ViewModel for the item details pane
#[derive(Clone, Copy)]
pub struct ItemDetailsViewModel {
    pub detail: RwSignal<DetailState>,
    pub summary: RwSignal<SummaryState>,
    generation: StoredValue<GenerationCounter>,
}

impl ItemDetailsViewModel {
    pub fn new() -> Self {
        Self {
            detail: RwSignal::new(DetailState::Loading),
            summary: RwSignal::new(SummaryState::Idle),
            generation: StoredValue::new(GenerationCounter::default()),
        }
    }

    fn is_current(&self, ticket: Generation) -> bool {
        // a disposed pane counts as stale
        self.generation
            .try_with_value(|counter| counter.is_current(ticket))
            .unwrap_or(false)
    }

    /// Resolve the item (direct fetch for server-paged tabs), then its summary
    pub fn load(&self, backend: Arc<dyn BackendClient>, request: DetailRequest, timeout_ms: u32) {
        let mut issued = None;
        self.generation
            .update_value(|counter| issued = Some(counter.advance()));
        let Some(ticket) = issued else {
            return;
        };

        let vm = *self;
        self.summary.set(SummaryState::Idle);

        if request.tab.paging() == PagingStrategy::Client {
            match request.base {
                Some(item) => {
                    self.detail.set(DetailState::Ready(item.clone()));
                    self.load_summary(backend, ticket, request.tab, item, timeout_ms);
                }
                None => self.detail.set(DetailState::NotFound),
            }
            return;
        }

        self.detail.set(DetailState::Loading);
        wasm_bindgen_futures::spawn_local(async move {
            let result = with_timeout(
                backend.post_detail(request.id),
                deadline(timeout_ms),
                timeout_ms,
            )
            .await;
            if !vm.is_current(ticket) {
                log::debug!("Dropping stale detail {}", request.id);
                return;
            }
            let resolved = match result {
                Ok(detail) => Some(merge_detail(
                    request.id,
                    request.base.as_ref(),
                    detail,
                    request.tab,
                    request.sub.as_deref(),
                )),
                Err(e) => {
                    log::warn!("Detail {} failed: {}", request.id, e);
                    request.base.clone()
                }
            };
            match resolved {
                Some(item) => {
                    vm.detail.set(DetailState::Ready(item.clone()));
                    vm.load_summary(backend, ticket, request.tab, item, timeout_ms);
                }
                None => vm.detail.set(DetailState::NotFound),
            }
        });
    }

    fn load_summary(
        &self,
        backend: Arc<dyn BackendClient>,
        ticket: Generation,
        tab: ExploreTab,
        item: ListItem,
        timeout_ms: u32,
    ) {
        if !wants_summary(tab) {
            return;
        }
        let Some(url) = item.summary_source().map(str::to_string) else {
            self.summary.set(summary_from_result(Ok(None), &item.body));
            return;
        };

        let vm = *self;
        self.summary.set(SummaryState::Loading);
        wasm_bindgen_futures::spawn_local(async move {
            let result =
                with_timeout(backend.summarize_url(&url), deadline(timeout_ms), timeout_ms).await;
            if !vm.is_current(ticket) {
                log::debug!("Dropping stale summary for {}", url);
                return;
            }
            if let Err(e) = &result {
                log::warn!("Summary for {} failed: {}", url, e);
            }
            vm.summary.set(summary_from_result(result, &item.body));
        });
    }
}
