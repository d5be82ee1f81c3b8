//! Filter state and its URL representation.
//!
//! The query string is the only persistence layer of the explore view:
//! every committed navigation is serialized back with `to_query`, and
//! `parse_query` rebuilds the same state on load or back/forward.

use super::paging::PagingPolicy;
use contracts::enums::{ExploreTab, PagingStrategy, Region};
use serde::{Deserialize, Serialize};

pub type ItemId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Detail(ItemId),
}

impl ViewMode {
    pub fn selected_id(&self) -> Option<ItemId> {
        match self {
            ViewMode::List => None,
            ViewMode::Detail(id) => Some(*id),
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, ViewMode::Detail(_))
    }
}

/// Что сейчас показывает обозреватель
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub region: Region,
    pub tab: ExploreTab,
    /// Always one of `tab.subcategories()` when set
    pub sub: Option<String>,
    /// 1-based
    pub page: u32,
    pub view: ViewMode,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            region: Region::default(),
            tab: ExploreTab::default(),
            sub: None,
            page: 1,
            view: ViewMode::List,
        }
    }
}

/// Raw query parameters as they appear in the URL, in canonical order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExploreQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl FilterState {
    /// Permissive normalization: each invalid field falls back to its default
    pub fn from_query(query: &ExploreQuery, policy: &PagingPolicy) -> Self {
        let region = query
            .region
            .as_deref()
            .and_then(Region::from_label)
            .unwrap_or_default();
        let tab = query
            .tab
            .as_deref()
            .and_then(ExploreTab::from_label)
            .unwrap_or_default();
        let sub = query
            .sub
            .as_deref()
            .and_then(|s| tab.validate_sub(s))
            .map(str::to_string);
        let page = query
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
            .min(policy.max_pages);
        let id = query
            .id
            .as_deref()
            .and_then(|id| id.trim().parse::<ItemId>().ok())
            .filter(|id| *id > 0);
        let view = match (query.view.as_deref(), id) {
            (Some("detail"), Some(id)) => ViewMode::Detail(id),
            _ => ViewMode::List,
        };

        Self {
            region,
            tab,
            sub,
            page,
            view,
        }
    }

    pub fn to_raw_query(&self) -> ExploreQuery {
        ExploreQuery {
            region: Some(self.region.label().to_string()),
            tab: Some(self.tab.label().to_string()),
            sub: self.sub.clone(),
            view: Some(if self.view.is_detail() { "detail" } else { "list" }.to_string()),
            id: self.view.selected_id().map(|id| id.to_string()),
            page: Some(self.page.to_string()),
        }
    }

    /// The state as it would look after a trip through the URL
    pub fn normalized(&self, policy: &PagingPolicy) -> Self {
        Self::from_query(&self.to_raw_query(), policy)
    }

    pub fn paging(&self) -> PagingStrategy {
        self.tab.paging()
    }
}

/// Parse `?region=..&tab=..` into a state; unparsable input yields the default state
pub fn parse_query(search: &str, policy: &PagingPolicy) -> FilterState {
    let raw = search.trim_start_matches('?');
    let query = match serde_qs::from_str::<ExploreQuery>(raw) {
        Ok(query) => query,
        Err(e) => {
            log::debug!("Ignoring malformed query '{}': {}", raw, e);
            ExploreQuery::default()
        }
    };
    FilterState::from_query(&query, policy)
}

/// Canonical query string (without the leading `?`)
pub fn to_query(state: &FilterState) -> String {
    serde_qs::to_string(&state.to_raw_query()).unwrap_or_default()
}
