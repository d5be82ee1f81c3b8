//! Fetch resolution: `FilterState` -> backend calls -> normalized `ListItem`s.

use super::api::BackendClient;
use super::paging::{server_total, PagingPolicy};
use super::state::FilterState;
use crate::shared::api_utils::{FetchError, RequestTimer};
use crate::shared::date_utils::{display_date, today};
use crate::shared::text::{clean_fragment, clean_or};
use contracts::domain::a001_explore::dto::{ListItem, PostDetail, RawPost, RawSearchItem};
use contracts::enums::{ExploreTab, PagingStrategy, PostCategory, Region, SearchKind, TabSource};
use futures::future::join_all;
use std::future::Future;

pub const NO_TITLE: &str = "제목 없음";
pub const NO_BODY: &str = "내용 없음";

/// Backend request behind one filter tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    Search {
        kind: SearchKind,
        query: String,
        display: u32,
    },
    Category {
        category: PostCategory,
        region: Option<&'static str>,
        page_index: u32,
        size: u32,
    },
}

impl FetchPlan {
    pub fn resolve(state: &FilterState, policy: &PagingPolicy, search_display: u32) -> Self {
        match state.tab.source(state.sub.as_deref()) {
            TabSource::Search(kind) => FetchPlan::Search {
                kind,
                query: state.region.search_query(),
                display: search_display,
            },
            TabSource::Category(category) => FetchPlan::Category {
                category,
                region: state.region.query_value(),
                page_index: policy.page_index(state.page),
                size: policy.page_size,
            },
        }
    }
}

/// Identity of a loaded data set. Client-paged tabs leave `page` out,
/// so flipping pages reuses the cached result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadKey {
    pub region: Region,
    pub tab: ExploreTab,
    pub sub: Option<String>,
    pub page: Option<u32>,
}

impl LoadKey {
    pub fn of(state: &FilterState) -> Self {
        let page = match state.paging() {
            PagingStrategy::Client => None,
            PagingStrategy::Server => Some(state.page),
        };
        Self {
            region: state.region,
            tab: state.tab,
            sub: state.sub.clone(),
            page,
        }
    }
}

/// Loaded items plus the total used for page computation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    pub items: Vec<ListItem>,
    pub total: usize,
}

pub fn normalize_search_item(
    index: usize,
    raw: &RawSearchItem,
    tab: ExploreTab,
    region: Region,
) -> ListItem {
    let date = raw
        .pub_date
        .as_deref()
        .or(raw.postdate.as_deref())
        .or(raw.date.as_deref());
    let author = raw
        .cafename
        .as_deref()
        .or(raw.bloggername.as_deref())
        .map(clean_fragment)
        .filter(|a| !a.is_empty());

    ListItem {
        id: index as i64 + 1,
        title: clean_or(raw.title.as_deref(), NO_TITLE),
        body: clean_or(raw.description.as_deref(), NO_BODY),
        date: display_date(date),
        category_path: format!("{} > {}", tab.label(), region.label()),
        link: raw.link.clone().filter(|l| !l.is_empty()),
        original_link: raw.originallink.clone().filter(|l| !l.is_empty()),
        author,
    }
}

/// Category post with its detail merged in. A failed detail keeps the
/// list-level summary as body.
pub fn normalize_post(
    id: i64,
    raw: &RawPost,
    detail: Result<PostDetail, FetchError>,
    tab: ExploreTab,
    sub: Option<&str>,
) -> ListItem {
    let (body, link) = match detail {
        Ok(detail) => {
            let body = detail
                .full_text()
                .or(raw.title.as_deref())
                .map(clean_fragment)
                .filter(|b| !b.is_empty());
            (body, detail.link.or_else(|| raw.link.clone()))
        }
        Err(e) => {
            log::warn!("Detail for post {} failed, using list summary: {}", id, e);
            let body = raw.summary().map(clean_fragment).filter(|b| !b.is_empty());
            (body, raw.link.clone())
        }
    };

    ListItem {
        id,
        title: clean_or(raw.title.as_deref(), NO_TITLE),
        body: body.unwrap_or_else(|| NO_BODY.to_string()),
        date: display_date(raw.date()),
        category_path: format!("{} > {}", tab.label(), sub.unwrap_or("전체")),
        link: link.filter(|l| !l.is_empty()),
        original_link: None,
        author: None,
    }
}

/// Run the plan for `state` and normalize the result.
///
/// Server-paged tabs enrich every post with one detail request; those run
/// concurrently and fail independently. Each request gets its own deadline
/// from `timer`, so a hung detail times out alone.
pub async fn resolve_listing<F, D>(
    client: &dyn BackendClient,
    state: &FilterState,
    policy: &PagingPolicy,
    search_display: u32,
    timer: &RequestTimer<F>,
) -> Result<Listing, FetchError>
where
    F: Fn() -> D,
    D: Future<Output = ()>,
{
    match FetchPlan::resolve(state, policy, search_display) {
        FetchPlan::Search {
            kind,
            query,
            display,
        } => {
            let raw = timer.guard(client.search(&query, kind, display)).await?;
            let items: Vec<ListItem> = raw
                .iter()
                .enumerate()
                .map(|(i, item)| normalize_search_item(i, item, state.tab, state.region))
                .collect();
            let total = items.len();
            Ok(Listing { items, total })
        }
        FetchPlan::Category {
            category,
            region,
            page_index,
            size,
        } => {
            let page = timer
                .guard(client.posts_by_category(category, region, page_index, size))
                .await?;
            let reported = page.reported_total();
            let posts = page.into_posts();
            let page_len = posts.len();

            let posts: Vec<(i64, RawPost)> = posts
                .into_iter()
                .filter_map(|post| match post.id {
                    Some(id) => Some((id, post)),
                    None => {
                        log::warn!(
                            "Skipping {} post without id: {:?}",
                            category,
                            post.title
                        );
                        None
                    }
                })
                .collect();

            let details = join_all(
                posts
                    .iter()
                    .map(|(id, _)| timer.guard(client.post_detail(*id))),
            )
            .await;
            let sub = state.sub.as_deref();
            let items = posts
                .iter()
                .zip(details)
                .map(|((id, post), detail)| normalize_post(*id, post, detail, state.tab, sub))
                .collect();

            Ok(Listing {
                items,
                total: server_total(page_index, size, page_len, reported),
            })
        }
    }
}

/// Outcome of a list load as the view sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLoad {
    Loaded(Listing),
    Empty { message: String },
    Failed { placeholder: ListItem, error: FetchError },
}

impl PageLoad {
    pub fn from_result(result: Result<Listing, FetchError>, state: &FilterState) -> Self {
        match result {
            Ok(listing) if listing.items.is_empty() => PageLoad::Empty {
                message: empty_message(state),
            },
            Ok(listing) => PageLoad::Loaded(listing),
            Err(error) => {
                log::error!("{} list load failed: {}", state.tab.label(), error);
                PageLoad::Failed {
                    placeholder: error_placeholder(state.tab, &error),
                    error,
                }
            }
        }
    }

    /// Items shown for the current page. The failure placeholder is shown on any page
    pub fn visible<'a>(&'a self, policy: &PagingPolicy, state: &FilterState) -> &'a [ListItem] {
        match self {
            PageLoad::Loaded(listing) => policy.visible(state.paging(), &listing.items, state.page),
            PageLoad::Empty { .. } => &[],
            PageLoad::Failed { placeholder, .. } => std::slice::from_ref(placeholder),
        }
    }

    pub fn total(&self) -> usize {
        match self {
            PageLoad::Loaded(listing) => listing.total,
            PageLoad::Empty { .. } | PageLoad::Failed { .. } => 0,
        }
    }
}

fn empty_message(state: &FilterState) -> String {
    match state.tab.source(state.sub.as_deref()) {
        TabSource::Search(_) => format!(
            "\"{}\"에 대한 검색 결과가 없습니다.",
            state.region.search_query()
        ),
        TabSource::Category(_) => "조건에 맞는 게시물이 없습니다.".to_string(),
    }
}

fn error_placeholder(tab: ExploreTab, error: &FetchError) -> ListItem {
    ListItem {
        id: 0,
        title: "API 연결 오류".to_string(),
        body: format!(
            "{} 목록을 불러오는 중 오류가 발생했습니다. {}",
            tab.label(),
            error.user_message()
        ),
        date: today(),
        category_path: tab.label().to_string(),
        link: None,
        original_link: None,
        author: None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a001_explore::dto::PostPage;
    use futures::executor::block_on;
    use futures::future::{pending, ready, Pending, Ready};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory backend; records calls
    #[derive(Default)]
    pub struct FakeBackend {
        pub search_items: Vec<RawSearchItem>,
        pub posts: Vec<RawPost>,
        pub reported_total: Option<u64>,
        pub failing_details: HashSet<i64>,
        /// Detail requests for these ids never resolve
        pub hanging_details: HashSet<i64>,
        pub hang_list: bool,
        pub list_error: Option<FetchError>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn record(&self, call: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait(?Send)]
    impl BackendClient for FakeBackend {
        async fn search(
            &self,
            query: &str,
            kind: SearchKind,
            display: u32,
        ) -> Result<Vec<RawSearchItem>, FetchError> {
            self.record(format!("search {} {} {}", query, kind.code(), display));
            match &self.list_error {
                Some(e) => Err(e.clone()),
                None => Ok(self.search_items.clone()),
            }
        }

        async fn posts_by_category(
            &self,
            category: PostCategory,
            region: Option<&str>,
            page_index: u32,
            size: u32,
        ) -> Result<PostPage, FetchError> {
            self.record(format!(
                "posts {} {} {} {}",
                category.code(),
                region.unwrap_or("-"),
                page_index,
                size
            ));
            if self.hang_list {
                pending::<()>().await;
            }
            if let Some(e) = &self.list_error {
                return Err(e.clone());
            }
            Ok(PostPage::Envelope {
                content: self.posts.clone(),
                total_elements: self.reported_total,
            })
        }

        async fn post_detail(&self, id: i64) -> Result<PostDetail, FetchError> {
            self.record(format!("detail {}", id));
            if self.hanging_details.contains(&id) {
                pending::<()>().await;
            }
            if self.failing_details.contains(&id) {
                return Err(FetchError::Status(500));
            }
            Ok(PostDetail {
                id: Some(id),
                content: Some(format!("<p>full content {}</p>", id)),
                link: Some(format!("https://seosan.go.kr/{}", id)),
                ..Default::default()
            })
        }

        async fn summarize_url(&self, url: &str) -> Result<Option<String>, FetchError> {
            self.record(format!("summary {}", url));
            Ok(None)
        }
    }

    /// Deadlines that never fire
    pub fn no_deadline() -> RequestTimer<fn() -> Pending<()>> {
        RequestTimer {
            make_deadline: pending::<()>,
            timeout_ms: 10_000,
        }
    }

    /// Deadlines that have already passed; requests that resolve on the
    /// first poll still win the race
    fn expired_deadline() -> RequestTimer<fn() -> Ready<()>> {
        RequestTimer {
            make_deadline: || ready(()),
            timeout_ms: 10_000,
        }
    }

    fn post(id: i64) -> RawPost {
        RawPost {
            id: Some(id),
            title: Some(format!("post {}", id)),
            description: Some(format!("summary {}", id)),
            pub_date: Some("2025-08-15".to_string()),
            ..Default::default()
        }
    }

    fn search_item(title: &str) -> RawSearchItem {
        RawSearchItem {
            title: Some(title.to_string()),
            description: Some("<b>설명</b>".to_string()),
            link: Some("https://n.news.naver.com/1".to_string()),
            originallink: Some("https://news.example.com/1".to_string()),
            pub_date: Some("Fri, 15 Aug 2025 09:00:00 +0900".to_string()),
            ..Default::default()
        }
    }

    fn welfare_state() -> FilterState {
        FilterState {
            tab: ExploreTab::Welfare,
            sub: Some("청년".to_string()),
            page: 2,
            ..FilterState::default()
        }
    }

    #[test]
    fn test_plan_for_search_tab() {
        let state = FilterState {
            region: Region::HaemiMyeon,
            tab: ExploreTab::Cafe,
            page: 3,
            ..FilterState::default()
        };
        assert_eq!(
            FetchPlan::resolve(&state, &PagingPolicy::default(), 20),
            FetchPlan::Search {
                kind: SearchKind::Cafe,
                query: "서산시 해미면".to_string(),
                display: 20,
            }
        );
    }

    #[test]
    fn test_plan_for_category_tab() {
        let plan = FetchPlan::resolve(&welfare_state(), &PagingPolicy::default(), 20);
        assert_eq!(
            plan,
            FetchPlan::Category {
                category: PostCategory::WelfareYouth,
                region: None,
                page_index: 1,
                size: 5,
            }
        );

        let state = FilterState {
            tab: ExploreTab::CityHall,
            region: Region::DaesanEup,
            ..FilterState::default()
        };
        assert_eq!(
            FetchPlan::resolve(&state, &PagingPolicy::default(), 20),
            FetchPlan::Category {
                category: PostCategory::Notice,
                region: Some("대산읍"),
                page_index: 0,
                size: 5,
            }
        );
    }

    #[test]
    fn test_load_key_ignores_page_for_client_tabs() {
        let news = FilterState::default();
        let news_p3 = FilterState {
            page: 3,
            ..FilterState::default()
        };
        assert_eq!(LoadKey::of(&news), LoadKey::of(&news_p3));

        let welfare_p3 = FilterState {
            page: 3,
            ..welfare_state()
        };
        assert_ne!(LoadKey::of(&welfare_state()), LoadKey::of(&welfare_p3));
    }

    #[test]
    fn test_search_item_normalization() {
        let raw = search_item("<b>해미읍성</b> &amp; 맛집");
        let item = normalize_search_item(2, &raw, ExploreTab::News, Region::HaemiMyeon);
        assert_eq!(item.id, 3);
        assert_eq!(item.title, "해미읍성 & 맛집");
        assert_eq!(item.body, "설명");
        assert_eq!(item.date, "2025.08.15");
        assert_eq!(item.category_path, "뉴스 > 해미면");
        assert_eq!(item.summary_source(), Some("https://news.example.com/1"));
    }

    #[test]
    fn test_search_item_placeholders() {
        let raw = RawSearchItem {
            title: Some("<b></b>".to_string()),
            bloggername: Some("서산 여행자".to_string()),
            ..Default::default()
        };
        let item = normalize_search_item(0, &raw, ExploreTab::Blog, Region::All);
        assert_eq!(item.title, NO_TITLE);
        assert_eq!(item.body, NO_BODY);
        assert_eq!(item.date, today());
        assert_eq!(item.author.as_deref(), Some("서산 여행자"));
        assert_eq!(item.link, None);
    }

    #[test]
    fn test_partial_enrichment_failure() {
        let backend = FakeBackend {
            posts: (1..=5).map(post).collect(),
            reported_total: Some(23),
            failing_details: HashSet::from([3]),
            ..Default::default()
        };
        let listing = block_on(resolve_listing(
            &backend,
            &welfare_state(),
            &PagingPolicy::default(),
            20,
            &no_deadline(),
        ))
        .unwrap();

        assert_eq!(listing.items.len(), 5);
        assert_eq!(listing.total, 23);
        assert_eq!(listing.items[2].body, "summary 3");
        assert_eq!(listing.items[2].link, None);
        assert_eq!(listing.items[1].body, "full content 2");
        assert_eq!(listing.items[1].link.as_deref(), Some("https://seosan.go.kr/2"));
        assert_eq!(listing.items[0].category_path, "복지 > 청년");
        assert_eq!(listing.items[0].date, "2025.08.15");

        let details = backend
            .calls()
            .iter()
            .filter(|c| c.starts_with("detail"))
            .count();
        assert_eq!(details, 5);
    }

    #[test]
    fn test_hung_detail_times_out_alone() {
        let backend = FakeBackend {
            posts: (1..=5).map(post).collect(),
            hanging_details: HashSet::from([3]),
            ..Default::default()
        };
        let listing = block_on(resolve_listing(
            &backend,
            &welfare_state(),
            &PagingPolicy::default(),
            20,
            &expired_deadline(),
        ))
        .unwrap();

        let bodies: Vec<&str> = listing.items.iter().map(|i| i.body.as_str()).collect();
        assert_eq!(
            bodies,
            vec![
                "full content 1",
                "full content 2",
                "summary 3",
                "full content 4",
                "full content 5"
            ]
        );
    }

    #[test]
    fn test_hung_list_request_times_out() {
        let backend = FakeBackend {
            posts: vec![post(1)],
            hang_list: true,
            ..Default::default()
        };
        let result = block_on(resolve_listing(
            &backend,
            &welfare_state(),
            &PagingPolicy::default(),
            20,
            &expired_deadline(),
        ));
        assert_eq!(result, Err(FetchError::Timeout(10_000)));
        assert!(!backend.calls().iter().any(|c| c.starts_with("detail")));
    }

    #[test]
    fn test_category_request_arguments() {
        let backend = FakeBackend {
            posts: vec![post(1)],
            ..Default::default()
        };
        let state = FilterState {
            region: Region::Dongmun1Dong,
            ..welfare_state()
        };
        block_on(resolve_listing(
            &backend,
            &state,
            &PagingPolicy::default(),
            20,
            &no_deadline(),
        )).unwrap();
        assert_eq!(backend.calls()[0], "posts WELFARE_YOUTH 동문1동 1 5");
    }

    #[test]
    fn test_posts_without_id_are_skipped() {
        let mut anonymous = post(9);
        anonymous.id = None;
        let backend = FakeBackend {
            posts: vec![post(1), anonymous],
            ..Default::default()
        };
        let listing = block_on(resolve_listing(
            &backend,
            &welfare_state(),
            &PagingPolicy::default(),
            20,
            &no_deadline(),
        ))
        .unwrap();
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].id, 1);
    }

    #[test]
    fn test_search_listing_total_is_len() {
        let backend = FakeBackend {
            search_items: (0..12).map(|i| search_item(&format!("기사 {}", i))).collect(),
            ..Default::default()
        };
        let state = FilterState {
            page: 3,
            ..FilterState::default()
        };
        let policy = PagingPolicy::default();
        let listing = block_on(resolve_listing(&backend, &state, &policy, 20, &no_deadline())).unwrap();
        assert_eq!(listing.total, 12);
        assert_eq!(policy.total_pages(listing.total), 3);

        let load = PageLoad::from_result(Ok(listing), &state);
        let ids: Vec<i64> = load.visible(&policy, &state).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![11, 12]);
        assert_eq!(backend.calls(), vec!["search 서산시 news 20".to_string()]);
    }

    #[test]
    fn test_empty_and_error_are_distinct() {
        let state = FilterState::default();
        let empty = PageLoad::from_result(Ok(Listing::default()), &state);
        let failed = PageLoad::from_result(Err(FetchError::Network("down".into())), &state);

        match &empty {
            PageLoad::Empty { message } => {
                assert_eq!(message, "\"서산시\"에 대한 검색 결과가 없습니다.")
            }
            other => panic!("expected empty, got {:?}", other),
        }
        match &failed {
            PageLoad::Failed { placeholder, error } => {
                assert_eq!(placeholder.title, "API 연결 오류");
                assert!(placeholder.body.starts_with("뉴스 목록을 불러오는 중 오류가"));
                assert_eq!(error, &FetchError::Network("down".into()));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        let policy = PagingPolicy::default();
        let page_two = FilterState {
            page: 2,
            ..FilterState::default()
        };
        assert!(empty.visible(&policy, &state).is_empty());
        assert_eq!(failed.visible(&policy, &page_two).len(), 1);
        assert_ne!(empty, failed);
    }

    #[test]
    fn test_list_failure_propagates() {
        let backend = FakeBackend {
            list_error: Some(FetchError::Status(502)),
            ..Default::default()
        };
        let result = block_on(resolve_listing(
            &backend,
            &welfare_state(),
            &PagingPolicy::default(),
            20,
            &no_deadline(),
        ));
        assert_eq!(result, Err(FetchError::Status(502)));
        assert!(!backend.calls().iter().any(|c| c.starts_with("detail")));
    }
}
