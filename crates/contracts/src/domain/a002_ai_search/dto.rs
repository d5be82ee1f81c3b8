//! AI search responses.
//!
//! The backend has shipped several response layouts over time. They are
//! decoded once here, in priority order, into a single `AiSearchResult`;
//! anything that matches no known layout lands in `Unrecognized`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Тело запроса AI поиска
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSearchRequest {
    pub query: String,
    #[serde(rename = "maxExternal")]
    pub max_external: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSearchItem {
    pub title: String,
    pub url: Option<String>,
    pub summary: String,
}

/// Источник, на который ссылается ответ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSource {
    pub title: String,
    pub link: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiSearchResult {
    /// No body at all
    Empty,
    /// Backend reported an error in-band
    Failure(String),
    /// Map-reduce layout: `{ tldr, items[], sources? }`
    Detailed {
        tldr: String,
        items: Vec<AiSearchItem>,
        sources: Vec<AiSource>,
    },
    /// One-shot layout: a single answer text plus optional sources
    Brief { answer: String, sources: Vec<AiSource> },
    /// Catch-all; carries the best human-readable text that could be found
    Unrecognized(String),
}

const DEFAULT_PROVIDER: &str = "서산시";
const ITEM_SUMMARY_LIMIT: usize = 300;

/// `{ error }` reported in-band
#[derive(Deserialize)]
struct FailureLayout {
    error: Value,
}

/// Map-reduce layout `{ tldr, items[], sources? }`
#[derive(Deserialize)]
struct DetailedLayout {
    tldr: String,
    items: Vec<RawItem>,
    #[serde(default)]
    sources: Option<Vec<RawSource>>,
}

/// One-shot layout; the first non-blank answer field wins
#[derive(Deserialize)]
struct BriefLayout {
    result: Option<String>,
    detailed_answer: Option<String>,
    summary: Option<String>,
    answer: Option<String>,
    content: Option<String>,
    response: Option<String>,
    #[serde(rename = "answerHtml")]
    answer_html: Option<String>,
    sources: Option<Vec<RawSource>>,
    references: Option<Vec<RawSource>>,
    related_links: Option<Vec<RawSource>>,
    links: Option<Vec<RawSource>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem {
    Fields {
        title: Option<String>,
        url: Option<String>,
        summary: Option<String>,
        content: Option<String>,
    },
    Other(Value),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Link(String),
    Entry {
        #[serde(alias = "name")]
        title: Option<String>,
        #[serde(alias = "url")]
        link: Option<String>,
        #[serde(alias = "source")]
        provider: Option<String>,
    },
    Other(Value),
}

fn layout<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

impl FailureLayout {
    fn into_result(self) -> Option<AiSearchResult> {
        let message = match self.error {
            Value::Null | Value::Bool(false) => return None,
            Value::String(s) if s.is_empty() => return None,
            Value::String(s) => s,
            other => other.to_string(),
        };
        Some(AiSearchResult::Failure(message))
    }
}

impl DetailedLayout {
    fn into_result(self) -> Option<AiSearchResult> {
        if self.tldr.is_empty() {
            return None;
        }
        let items: Vec<AiSearchItem> = self.items.into_iter().map(RawItem::into_item).collect();
        let sources = match self.sources {
            Some(raw) => into_sources(raw),
            None => items
                .iter()
                .filter_map(|item| {
                    let url = item.url.clone()?;
                    Some(AiSource {
                        title: item.title.clone(),
                        provider: host_of(&url).unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
                        link: url,
                    })
                })
                .collect(),
        };
        Some(AiSearchResult::Detailed {
            tldr: self.tldr,
            items,
            sources,
        })
    }
}

impl BriefLayout {
    fn into_result(self) -> Option<AiSearchResult> {
        let sources = [self.sources, self.references, self.related_links, self.links]
            .into_iter()
            .flatten()
            .next()
            .map(into_sources)
            .unwrap_or_default();
        let answer = [
            self.result,
            self.detailed_answer,
            self.summary,
            self.answer,
            self.content,
            self.response,
            self.answer_html,
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty());

        match answer {
            Some(answer) => Some(AiSearchResult::Brief { answer, sources }),
            None if !sources.is_empty() => Some(AiSearchResult::Brief {
                answer: String::new(),
                sources,
            }),
            None => None,
        }
    }
}

impl RawItem {
    fn into_item(self) -> AiSearchItem {
        let (title, url, summary, content) = match self {
            RawItem::Fields {
                title,
                url,
                summary,
                content,
            } => (title, url, summary, content),
            RawItem::Other(_) => (None, None, None, None),
        };
        let summary = summary
            .filter(|s| !s.is_empty())
            .or_else(|| content.map(|c| c.chars().take(ITEM_SUMMARY_LIMIT).collect()))
            .unwrap_or_else(|| "내용 없음".to_string());
        AiSearchItem {
            title: title.unwrap_or_else(|| "제목 없음".to_string()),
            url,
            summary,
        }
    }
}

fn into_sources(raw: Vec<RawSource>) -> Vec<AiSource> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, source)| {
            let fallback_title = format!("참고 자료 {}", idx + 1);
            match source {
                RawSource::Link(link) => AiSource {
                    title: fallback_title,
                    provider: host_of(&link).unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
                    link,
                },
                RawSource::Entry {
                    title,
                    link,
                    provider,
                } => AiSource {
                    title: title.unwrap_or(fallback_title),
                    link: link.unwrap_or_else(|| "#".to_string()),
                    provider: provider.unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
                },
                RawSource::Other(_) => AiSource {
                    title: fallback_title,
                    link: "#".to_string(),
                    provider: DEFAULT_PROVIDER.to_string(),
                },
            }
        })
        .collect()
}

/// Best human-readable text of an object no layout matched
fn unrecognized_text(value: &Value) -> String {
    ["message", "text"]
        .iter()
        .find_map(|f| value.get(*f).and_then(Value::as_str).map(str::to_string))
        .or_else(|| {
            value.get("data").map(|d| match d.as_str() {
                Some(s) => s.to_string(),
                None => serde_json::to_string_pretty(d).unwrap_or_default(),
            })
        })
        .unwrap_or_else(|| serde_json::to_string_pretty(value).unwrap_or_default())
}

impl AiSearchResult {
    pub fn decode(value: &Value) -> Self {
        match value {
            Value::Null => AiSearchResult::Empty,
            Value::String(s) if s.trim().is_empty() => AiSearchResult::Empty,
            Value::String(s) => AiSearchResult::Brief {
                answer: s.clone(),
                sources: Vec::new(),
            },
            Value::Object(_) => Self::from_layouts(value)
                .unwrap_or_else(|| AiSearchResult::Unrecognized(unrecognized_text(value))),
            other => AiSearchResult::Unrecognized(other.to_string()),
        }
    }

    /// Known layouts in priority order
    fn from_layouts(value: &Value) -> Option<Self> {
        layout::<FailureLayout>(value)
            .and_then(FailureLayout::into_result)
            .or_else(|| layout::<DetailedLayout>(value).and_then(DetailedLayout::into_result))
            .or_else(|| layout::<BriefLayout>(value).and_then(BriefLayout::into_result))
    }

    pub fn sources(&self) -> &[AiSource] {
        match self {
            AiSearchResult::Detailed { sources, .. } | AiSearchResult::Brief { sources, .. } => {
                sources
            }
            _ => &[],
        }
    }

    /// Whether the result has nothing worth rendering as an answer
    pub fn is_empty(&self) -> bool {
        match self {
            AiSearchResult::Empty | AiSearchResult::Failure(_) => true,
            AiSearchResult::Detailed { tldr, items, .. } => tldr.is_empty() && items.is_empty(),
            AiSearchResult::Brief { answer, sources } => answer.is_empty() && sources.is_empty(),
            AiSearchResult::Unrecognized(text) => text.trim().is_empty(),
        }
    }
}

/// Host part of an absolute http(s) URL
pub fn host_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .rsplit('@')
        .next()
        .unwrap_or_default()
        .split(':')
        .next()
        .unwrap_or_default();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_empty() {
        assert_eq!(AiSearchResult::decode(&Value::Null), AiSearchResult::Empty);
    }

    #[test]
    fn test_error_wins_over_payload() {
        let v = json!({ "error": "quota", "summary": "ignored" });
        assert_eq!(
            AiSearchResult::decode(&v),
            AiSearchResult::Failure("quota".to_string())
        );
    }

    #[test]
    fn test_detailed_layout_derives_sources_from_items() {
        let v = json!({
            "tldr": "요약",
            "items": [
                { "title": "해미읍성 축제", "url": "https://www.seosan.go.kr/a/1", "summary": "10월 개최" },
                { "content": "본문만 있음" }
            ]
        });
        match AiSearchResult::decode(&v) {
            AiSearchResult::Detailed { tldr, items, sources } => {
                assert_eq!(tldr, "요약");
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].title, "제목 없음");
                assert_eq!(items[1].summary, "본문만 있음");
                assert_eq!(sources.len(), 1);
                assert_eq!(sources[0].provider, "www.seosan.go.kr");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_brief_field_priority() {
        let v = json!({ "summary": "second", "result": "first", "references": ["http://x.kr/p"] });
        match AiSearchResult::decode(&v) {
            AiSearchResult::Brief { answer, sources } => {
                assert_eq!(answer, "first");
                assert_eq!(sources[0].title, "참고 자료 1");
                assert_eq!(sources[0].provider, "x.kr");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_shape_is_isolated() {
        let v = json!({ "message": "점검 중" });
        assert_eq!(
            AiSearchResult::decode(&v),
            AiSearchResult::Unrecognized("점검 중".to_string())
        );
        assert!(matches!(
            AiSearchResult::decode(&json!([1, 2])),
            AiSearchResult::Unrecognized(_)
        ));
    }

    #[test]
    fn test_object_sources() {
        let v = json!({ "answer": "a", "sources": [{ "name": "시청", "url": "https://seosan.go.kr" }] });
        let result = AiSearchResult::decode(&v);
        assert_eq!(result.sources()[0].title, "시청");
        assert_eq!(result.sources()[0].link, "https://seosan.go.kr");
        assert_eq!(result.sources()[0].provider, "서산시");
    }

    #[test]
    fn test_blank_tldr_falls_through_to_brief() {
        let v = json!({ "tldr": "", "items": [], "result": "답변" });
        assert_eq!(
            AiSearchResult::decode(&v),
            AiSearchResult::Brief {
                answer: "답변".to_string(),
                sources: Vec::new(),
            }
        );
    }

    #[test]
    fn test_null_items_is_not_detailed() {
        let v = json!({ "tldr": "요약", "items": null, "summary": "간략" });
        assert!(matches!(
            AiSearchResult::decode(&v),
            AiSearchResult::Brief { answer, .. } if answer == "간략"
        ));
    }

    #[test]
    fn test_blank_error_is_ignored() {
        let v = json!({ "error": "", "answer": "정상" });
        assert!(matches!(
            AiSearchResult::decode(&v),
            AiSearchResult::Brief { answer, .. } if answer == "정상"
        ));
        let v = json!({ "error": { "code": 429 } });
        assert_eq!(
            AiSearchResult::decode(&v),
            AiSearchResult::Failure(r#"{"code":429}"#.to_string())
        );
    }

    #[test]
    fn test_odd_entries_get_fallbacks() {
        let v = json!({
            "tldr": "요약",
            "items": [42],
            "sources": [{ "title": 7 }, "https://seosan.go.kr/x"]
        });
        match AiSearchResult::decode(&v) {
            AiSearchResult::Detailed { items, sources, .. } => {
                assert_eq!(items[0].title, "제목 없음");
                assert_eq!(items[0].summary, "내용 없음");
                assert_eq!(sources[0].title, "참고 자료 1");
                assert_eq!(sources[0].link, "#");
                assert_eq!(sources[1].provider, "seosan.go.kr");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://a.b.kr:8080/x?y"), Some("a.b.kr".to_string()));
        assert_eq!(host_of("ftp://a"), None);
        assert_eq!(host_of("https:///path"), None);
    }
}
