use crate::domain::a001_explore::resolver::{NO_BODY, NO_TITLE};
use crate::shared::api_utils::FetchError;
use crate::shared::date_utils::display_date;
use crate::shared::text::{clean_fragment, leading_lines, strip_html, to_bullets, truncate_chars};
use contracts::domain::a001_explore::dto::{ListItem, PostDetail};
use contracts::enums::ExploreTab;

const FALLBACK_SUMMARY_CHARS: usize = 200;
const FALLBACK_LINES: usize = 5;

pub const NO_LINK_NOTICE: &str = "자세한 사항 및 파일첨부 등은 링크에서 확인하세요!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Ready(ListItem),
    NotFound,
}

/// Состояние AI-резюме
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    Idle,
    Loading,
    /// `generated` is false when the bullets come from the body itself
    Ready { bullets: Vec<String>, generated: bool },
    Failed { error: String, lines: Vec<String> },
}

impl SummaryState {
    pub fn badge(&self) -> &'static str {
        match self {
            SummaryState::Idle => "AI 요약",
            SummaryState::Loading => "AI 요약 중…",
            SummaryState::Ready { .. } => "AI 요약 완료",
            SummaryState::Failed { .. } => "요약 실패(원문 요약 표시)",
        }
    }

    pub fn lines(&self) -> &[String] {
        match self {
            SummaryState::Idle | SummaryState::Loading => &[],
            SummaryState::Ready { bullets, .. } => bullets,
            SummaryState::Failed { lines, .. } => lines,
        }
    }
}

/// News and blog details get an automatic summary of the source page
pub fn wants_summary(tab: ExploreTab) -> bool {
    matches!(tab, ExploreTab::News | ExploreTab::Blog)
}

pub fn lead_text(tab: ExploreTab, title: &str) -> String {
    let subject = if title.trim().is_empty() {
        match tab {
            ExploreTab::News => "해당 뉴스".to_string(),
            _ => "해당 글".to_string(),
        }
    } else {
        title.to_string()
    };
    format!("{}의 핵심 요약입니다.", subject)
}

pub fn link_label(tab: ExploreTab) -> &'static str {
    match tab {
        ExploreTab::News => "원본 기사 보기 - 클릭하여 이동",
        ExploreTab::Cafe | ExploreTab::Blog => "원본 글 보기 - 클릭하여 이동",
        _ => "원본 페이지 보기 - 클릭하여 이동",
    }
}

/// First characters of the tag-stripped body, used when no AI summary exists
pub fn body_excerpt(body: &str) -> String {
    truncate_chars(strip_html(body).trim(), FALLBACK_SUMMARY_CHARS)
}

pub fn summary_from_result(result: Result<Option<String>, FetchError>, body: &str) -> SummaryState {
    match result {
        Ok(Some(text)) if !to_bullets(&text).is_empty() => SummaryState::Ready {
            bullets: to_bullets(&text),
            generated: true,
        },
        Ok(_) => {
            let excerpt = body_excerpt(body);
            let bullets = if excerpt.is_empty() {
                vec!["요약을 생성할 수 없습니다.".to_string()]
            } else {
                to_bullets(&excerpt)
            };
            SummaryState::Ready {
                bullets,
                generated: false,
            }
        }
        Err(e) => {
            let mut lines = leading_lines(body, FALLBACK_LINES);
            if lines.is_empty() {
                lines.push("-".to_string());
            }
            SummaryState::Failed {
                error: e.to_string(),
                lines,
            }
        }
    }
}

/// Full post merged over the list entry (if the page had one)
pub fn merge_detail(
    id: i64,
    base: Option<&ListItem>,
    detail: PostDetail,
    tab: ExploreTab,
    sub: Option<&str>,
) -> ListItem {
    let title = detail
        .title
        .as_deref()
        .map(clean_fragment)
        .filter(|t| !t.is_empty())
        .or_else(|| base.map(|b| b.title.clone()))
        .unwrap_or_else(|| NO_TITLE.to_string());
    let body = detail
        .full_text()
        .map(clean_fragment)
        .filter(|b| !b.is_empty())
        .or_else(|| base.map(|b| b.body.clone()))
        .unwrap_or_else(|| NO_BODY.to_string());
    let raw_date = detail.pub_date.as_deref().or(detail.date.as_deref());
    let date = match (raw_date, base) {
        (None, Some(b)) => b.date.clone(),
        (raw, _) => display_date(raw),
    };
    let category_path = base
        .map(|b| b.category_path.clone())
        .unwrap_or_else(|| format!("{} > {}", tab.label(), sub.unwrap_or("전체")));

    ListItem {
        id,
        title,
        body,
        date,
        category_path,
        link: detail
            .link
            .filter(|l| !l.is_empty())
            .or_else(|| base.and_then(|b| b.link.clone())),
        original_link: base.and_then(|b| b.original_link.clone()),
        author: base.and_then(|b| b.author.clone()),
    }
}
