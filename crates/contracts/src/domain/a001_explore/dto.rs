//! Wire shapes of the explore backend and the normalized list item.
//!
//! Every raw field is optional: upstream payloads are best-effort and the
//! reader supplies fallbacks at each read site.

use serde::{Deserialize, Serialize};

// ============================================================================
// External search (news / cafe / blog)
// ============================================================================

/// Один результат внешнего поиска (HTML-подсветка в title/description)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSearchItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub originallink: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub postdate: Option<String>,
    pub date: Option<String>,
    pub cafename: Option<String>,
    pub bloggername: Option<String>,
}

/// The search endpoint answers either with a bare array or with `{ "items": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Bare(Vec<RawSearchItem>),
    Wrapped {
        #[serde(default)]
        items: Vec<RawSearchItem>,
    },
}

impl SearchResponse {
    pub fn into_items(self) -> Vec<RawSearchItem> {
        match self {
            SearchResponse::Bare(items) => items,
            SearchResponse::Wrapped { items } => items,
        }
    }
}

// ============================================================================
// Category posts (welfare / culture / city hall)
// ============================================================================

/// Пост в списке категории
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPost {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
}

impl RawPost {
    /// List-level summary text, used when the detail fetch for this post fails
    pub fn summary(&self) -> Option<&str> {
        [&self.description, &self.content, &self.title]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|s| !s.trim().is_empty())
    }

    pub fn date(&self) -> Option<&str> {
        self.pub_date.as_deref().or(self.date.as_deref())
    }
}

/// Страница постов: Spring-style envelope или голый массив
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostPage {
    Envelope {
        #[serde(default)]
        content: Vec<RawPost>,
        #[serde(rename = "totalElements", default)]
        total_elements: Option<u64>,
    },
    Bare(Vec<RawPost>),
}

impl PostPage {
    pub fn reported_total(&self) -> Option<u64> {
        match self {
            PostPage::Envelope { total_elements, .. } => *total_elements,
            PostPage::Bare(_) => None,
        }
    }

    pub fn into_posts(self) -> Vec<RawPost> {
        match self {
            PostPage::Envelope { content, .. } => content,
            PostPage::Bare(posts) => posts,
        }
    }
}

/// Детальная карточка поста `/posts/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDetail {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
}

impl PostDetail {
    pub fn full_text(&self) -> Option<&str> {
        [&self.content, &self.description, &self.body]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|s| !s.trim().is_empty())
    }
}

// ============================================================================
// URL summarization
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub url: String,
}

/// Ответ сервиса суммаризации: `{ url, title, summary, sourceType, publishedAt }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryResponse {
    pub summary: Option<String>,
    pub result: Option<String>,
    pub text: Option<String>,
}

impl SummaryResponse {
    pub fn into_text(self) -> Option<String> {
        [self.summary, self.result, self.text]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

// ============================================================================
// Normalized projection
// ============================================================================

/// Элемент списка обозревателя после нормализации любого из исходных форматов
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub date: String,
    pub category_path: String,
    pub link: Option<String>,
    /// Original article URL for search results (preferred for summarization)
    pub original_link: Option<String>,
    /// Cafe or blogger name for community search results
    pub author: Option<String>,
}

impl ListItem {
    /// Usable outbound link; `#` placeholders do not count
    pub fn external_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.is_empty() && *l != "#")
    }

    pub fn summary_source(&self) -> Option<&str> {
        self.original_link
            .as_deref()
            .filter(|l| !l.is_empty())
            .or_else(|| self.external_link())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_page_envelope() {
        let json = r#"{"content":[{"id":7,"title":"공지"}],"totalElements":42,"totalPages":9}"#;
        let page: PostPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.reported_total(), Some(42));
        let posts = page.into_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, Some(7));
    }

    #[test]
    fn test_post_page_bare_array() {
        let json = r#"[{"id":1},{"id":2,"pubDate":"2025-08-15"}]"#;
        let page: PostPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.reported_total(), None);
        assert_eq!(page.into_posts()[1].date(), Some("2025-08-15"));
    }

    #[test]
    fn test_search_response_shapes() {
        let bare: SearchResponse = serde_json::from_str(r#"[{"title":"a"}]"#).unwrap();
        assert_eq!(bare.into_items().len(), 1);
        let wrapped: SearchResponse =
            serde_json::from_str(r#"{"items":[{"title":"a"},{"link":"x"}],"total":2}"#).unwrap();
        assert_eq!(wrapped.into_items().len(), 2);
    }

    #[test]
    fn test_raw_post_summary_skips_blank() {
        let post = RawPost {
            description: Some("  ".to_string()),
            content: None,
            title: Some("제목".to_string()),
            ..Default::default()
        };
        assert_eq!(post.summary(), Some("제목"));
    }

    #[test]
    fn test_external_link_ignores_placeholder() {
        let item = ListItem {
            id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
            date: "2025.08.15".to_string(),
            category_path: "뉴스 > 전체".to_string(),
            link: Some("#".to_string()),
            original_link: None,
            author: None,
        };
        assert_eq!(item.external_link(), None);
        assert_eq!(item.summary_source(), None);
    }
}
