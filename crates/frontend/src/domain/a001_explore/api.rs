use crate::shared::api_utils::{get_json, post_json, query_string, FetchError, HttpBackend};
use async_trait::async_trait;
use contracts::domain::a001_explore::dto::{
    PostDetail, PostPage, RawSearchItem, SearchResponse, SummaryRequest, SummaryResponse,
};
use contracts::enums::{PostCategory, SearchKind};

/// Трейт доступа к backend обозревателя
#[async_trait(?Send)]
pub trait BackendClient: Send + Sync {
    /// External search; the whole result set in one call
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        display: u32,
    ) -> Result<Vec<RawSearchItem>, FetchError>;

    /// One server-side page of a category. `page_index` is zero-based
    async fn posts_by_category(
        &self,
        category: PostCategory,
        region: Option<&str>,
        page_index: u32,
        size: u32,
    ) -> Result<PostPage, FetchError>;

    async fn post_detail(&self, id: i64) -> Result<PostDetail, FetchError>;

    /// AI summary of an external page; `None` when the backend has nothing to say
    async fn summarize_url(&self, url: &str) -> Result<Option<String>, FetchError>;
}

#[async_trait(?Send)]
impl BackendClient for HttpBackend {
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        display: u32,
    ) -> Result<Vec<RawSearchItem>, FetchError> {
        let qs = query_string(&[
            ("q", query.to_string()),
            ("types", kind.code().to_string()),
            ("display", display.to_string()),
        ]);
        let url = self.url(&format!("/api/v1/explore/naver?{}", qs));
        let response: Option<SearchResponse> = get_json(&url).await?;
        Ok(response.map(SearchResponse::into_items).unwrap_or_default())
    }

    async fn posts_by_category(
        &self,
        category: PostCategory,
        region: Option<&str>,
        page_index: u32,
        size: u32,
    ) -> Result<PostPage, FetchError> {
        let mut params = vec![
            ("category", category.code().to_string()),
            ("page", page_index.to_string()),
            ("size", size.to_string()),
        ];
        if let Some(region) = region {
            params.push(("region", region.to_string()));
        }
        let url = self.url(&format!("/api/v1/posts?{}", query_string(&params)));
        let page: Option<PostPage> = get_json(&url).await?;
        Ok(page.unwrap_or(PostPage::Bare(Vec::new())))
    }

    async fn post_detail(&self, id: i64) -> Result<PostDetail, FetchError> {
        let url = self.url(&format!("/api/v1/posts/{}", id));
        let detail: Option<PostDetail> = get_json(&url).await?;
        detail.ok_or_else(|| FetchError::Decode(format!("empty detail for post {}", id)))
    }

    async fn summarize_url(&self, url: &str) -> Result<Option<String>, FetchError> {
        let endpoint = self.url("/api/v1/explore/summary");
        let request = SummaryRequest {
            url: url.to_string(),
        };
        match post_json::<_, SummaryResponse>(&endpoint, &request).await {
            Ok(response) => Ok(response.and_then(SummaryResponse::into_text)),
            Err(FetchError::Status(400)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
