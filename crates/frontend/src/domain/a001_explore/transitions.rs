//! Named transitions over `FilterState`.
//!
//! All user interaction goes through these functions; they never touch the
//! URL themselves. The view model commits the returned state.

use super::state::{FilterState, ItemId, ViewMode};
use contracts::domain::a001_explore::dto::ListItem;
use contracts::enums::{ExploreTab, Region};

/// Region click. `None` when the region is already active
pub fn with_region(state: &FilterState, region: Region) -> Option<FilterState> {
    if state.region == region {
        return None;
    }
    Some(FilterState {
        region,
        page: 1,
        view: ViewMode::List,
        ..state.clone()
    })
}

/// Tab click. Re-clicking the active tab keeps `sub`
pub fn with_tab(state: &FilterState, tab: ExploreTab) -> FilterState {
    let sub = if state.tab == tab {
        state.sub.clone()
    } else {
        None
    };
    FilterState {
        tab,
        sub,
        page: 1,
        view: ViewMode::List,
        ..state.clone()
    }
}

/// Dropdown visibility after a tab click
pub fn toggle_menu(open: Option<ExploreTab>, clicked: ExploreTab) -> Option<ExploreTab> {
    if !clicked.has_subcategories() {
        return None;
    }
    match open {
        Some(tab) if tab == clicked => None,
        _ => Some(clicked),
    }
}

/// Subcategory click; a label foreign to `tab` is ignored
pub fn with_sub(state: &FilterState, tab: ExploreTab, sub: &str) -> Option<FilterState> {
    let sub = tab.validate_sub(sub)?;
    Some(FilterState {
        tab,
        sub: Some(sub.to_string()),
        page: 1,
        view: ViewMode::List,
        ..state.clone()
    })
}

/// Pagination click, clamped to `[1, total_pages]`
pub fn with_page(state: &FilterState, target: u32, total_pages: u32) -> FilterState {
    FilterState {
        page: target.min(total_pages).max(1),
        view: ViewMode::List,
        ..state.clone()
    }
}

pub fn with_detail(state: &FilterState, id: ItemId) -> FilterState {
    FilterState {
        view: ViewMode::Detail(id),
        ..state.clone()
    }
}

pub fn to_list(state: &FilterState) -> FilterState {
    FilterState {
        view: ViewMode::List,
        ..state.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

/// Соседние элементы внутри текущей страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbours<'a> {
    pub prev: Option<&'a ListItem>,
    pub next: Option<&'a ListItem>,
}

/// Adjacent items of `id` within the loaded page; never crosses page bounds
pub fn neighbours(items: &[ListItem], id: ItemId) -> Neighbours<'_> {
    let Some(index) = items.iter().position(|item| item.id == id) else {
        return Neighbours::default();
    };
    Neighbours {
        prev: index.checked_sub(1).and_then(|i| items.get(i)),
        next: items.get(index + 1),
    }
}

/// Prev/next inside detail mode; `None` at either boundary
pub fn step_detail(state: &FilterState, items: &[ListItem], step: Step) -> Option<FilterState> {
    let id = state.view.selected_id()?;
    let around = neighbours(items, id);
    let target = match step {
        Step::Prev => around.prev,
        Step::Next => around.next,
    }?;
    Some(with_detail(state, target.id))
}
