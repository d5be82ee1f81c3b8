use crate::shared::api_utils::{post_json, FetchError, HttpBackend};
use crate::shared::text::strip_html;
use async_trait::async_trait;
use contracts::domain::a002_ai_search::dto::{AiSearchRequest, AiSearchResult};
use serde::Deserialize;
use serde_json::Value;

const MAX_EXTERNAL: u32 = 3;

pub const NO_RESULT_TEXT: &str = "죄송합니다. 검색 결과를 찾을 수 없습니다.";

/// Трейт AI поиска
#[async_trait(?Send)]
pub trait AiSearchClient: Send + Sync {
    /// Raw JSON answer; decoding happens once in `AiSearchState::from_response`
    async fn ai_search(&self, query: &str, detailed: bool) -> Result<Value, FetchError>;
}

#[async_trait(?Send)]
impl AiSearchClient for HttpBackend {
    async fn ai_search(&self, query: &str, detailed: bool) -> Result<Value, FetchError> {
        let path = if detailed {
            "/api/v1/ai-search/detail"
        } else {
            "/api/v1/ai-search"
        };
        let request = AiSearchRequest {
            query: query.to_string(),
            max_external: MAX_EXTERNAL,
        };
        let value: Option<Value> = post_json(&self.url(path), &request).await?;
        Ok(value.unwrap_or(Value::Null))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiSearchState {
    Idle,
    Loading,
    Empty(String),
    Ok(AiSearchResult),
    Failed(String),
}

impl AiSearchState {
    pub fn from_response(response: Result<Value, FetchError>) -> Self {
        let value = match response {
            Ok(value) => value,
            Err(e) => return AiSearchState::Failed(e.user_message()),
        };
        match AiSearchResult::decode(&value) {
            AiSearchResult::Failure(message) => AiSearchState::Failed(message),
            result if result.is_empty() => AiSearchState::Empty(NO_RESULT_TEXT.to_string()),
            result => AiSearchState::Ok(result),
        }
    }

    pub fn toast(&self) -> &'static str {
        match self {
            AiSearchState::Idle => "",
            AiSearchState::Loading => "AI가 정보를 수집하고 있어요 🔍",
            AiSearchState::Empty(_) | AiSearchState::Failed(_) => "AI 답변이 불가능합니다 ✨",
            AiSearchState::Ok(_) => "AI 답변이 완료되었습니다 ✨",
        }
    }
}

/// Answer text as display paragraphs; markup from the backend is dropped
pub fn answer_paragraphs(answer: &str) -> Vec<String> {
    let text = if answer.contains('<') {
        strip_html(&answer.replace("<br>", "\n").replace("<br/>", "\n"))
    } else {
        answer.to_string()
    };
    text.lines()
        .map(|line| line.trim().replace("**", ""))
        .filter(|line| !line.is_empty())
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct AiSearchQuery {
    q: Option<String>,
}

/// `?q=` of the current URL, trimmed; blank means no query
pub fn query_from_search(search: &str) -> Option<String> {
    serde_qs::from_str::<AiSearchQuery>(search.trim_start_matches('?'))
        .unwrap_or_default()
        .q
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
}

pub fn query_string_for(query: &str) -> String {
    format!("q={}", urlencoding::encode(query))
}
