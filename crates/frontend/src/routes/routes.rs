use crate::domain::a001_explore::ExplorePage;
use crate::domain::a002_ai_search::AiSearchPage;
use crate::layout::Shell;
use crate::shared::browser::current_path;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Explore,
    AiSearch,
}

impl Route {
    /// Everything outside `/ai-search` is the explorer
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        if path == "/ai-search" || path.starts_with("/ai-search/") {
            Route::AiSearch
        } else {
            Route::Explore
        }
    }
}

// Pages are chosen by pathname once; in-page navigation only touches the query string
#[component]
pub fn AppRoutes() -> impl IntoView {
    let route = Route::from_path(&current_path());
    log::debug!("route: {:?}", route);

    view! {
        <Shell>
            {match route {
                Route::Explore => view! { <ExplorePage /> }.into_any(),
                Route::AiSearch => view! { <AiSearchPage /> }.into_any(),
            }}
        </Shell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/"), Route::Explore);
        assert_eq!(Route::from_path("/explore"), Route::Explore);
        assert_eq!(Route::from_path("/ai-search"), Route::AiSearch);
        assert_eq!(Route::from_path("/ai-search/"), Route::AiSearch);
        assert_eq!(Route::from_path("/ai-searching"), Route::Explore);
    }
}
