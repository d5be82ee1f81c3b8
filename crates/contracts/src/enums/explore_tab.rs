use super::{PagingStrategy, PostCategory, SearchKind};
use serde::{Deserialize, Serialize};

/// Вкладки обозревателя (верхняя панель)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExploreTab {
    #[default]
    News,
    Welfare,
    CultureTourism,
    CityHall,
    Cafe,
    Blog,
}

impl ExploreTab {
    pub fn label(&self) -> &'static str {
        match self {
            ExploreTab::News => "뉴스",
            ExploreTab::Welfare => "복지",
            ExploreTab::CultureTourism => "문화관광",
            ExploreTab::CityHall => "서산시청",
            ExploreTab::Cafe => "카페",
            ExploreTab::Blog => "블로그",
        }
    }

    /// Tabs in display order; the first one is the default
    pub fn all() -> Vec<ExploreTab> {
        vec![
            ExploreTab::News,
            ExploreTab::Welfare,
            ExploreTab::CultureTourism,
            ExploreTab::CityHall,
            ExploreTab::Cafe,
            ExploreTab::Blog,
        ]
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.label() == label)
    }

    pub fn has_subcategories(&self) -> bool {
        !self.subcategories().is_empty()
    }

    /// Ordered dropdown labels
    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            ExploreTab::Welfare => &["어르신", "장애인", "여성 / 가족", "아동 / 청소년", "청년"],
            ExploreTab::CultureTourism => &["문화소식", "시티투어", "관광 / 안내"],
            ExploreTab::CityHall => &["보건/건강", "공지사항", "보도자료"],
            ExploreTab::News | ExploreTab::Cafe | ExploreTab::Blog => &[],
        }
    }

    /// Returns the canonical sub label if it belongs to this tab
    pub fn validate_sub(&self, sub: &str) -> Option<&'static str> {
        self.subcategories().iter().copied().find(|s| *s == sub)
    }

    /// Backend operation behind the tab; unknown or missing sub routes to the tab default
    pub fn source(&self, sub: Option<&str>) -> TabSource {
        match self {
            ExploreTab::News => TabSource::Search(SearchKind::News),
            ExploreTab::Cafe => TabSource::Search(SearchKind::Cafe),
            ExploreTab::Blog => TabSource::Search(SearchKind::Blog),
            ExploreTab::Welfare => TabSource::Category(match sub {
                Some("장애인") => PostCategory::WelfareDisabled,
                Some("여성 / 가족") => PostCategory::WelfareWomenFamily,
                Some("아동 / 청소년") => PostCategory::WelfareChildYouth,
                Some("청년") => PostCategory::WelfareYouth,
                _ => PostCategory::WelfareSenior,
            }),
            ExploreTab::CultureTourism => TabSource::Category(match sub {
                Some("시티투어") => PostCategory::CityTour,
                Some("관광 / 안내") => PostCategory::TourGuide,
                _ => PostCategory::CultureNews,
            }),
            ExploreTab::CityHall => TabSource::Category(match sub {
                Some("보건/건강") => PostCategory::HealthWellness,
                Some("보도자료") => PostCategory::PressRelease,
                _ => PostCategory::Notice,
            }),
        }
    }

    pub fn paging(&self) -> PagingStrategy {
        match self.source(None) {
            TabSource::Search(_) => PagingStrategy::Client,
            TabSource::Category(_) => PagingStrategy::Server,
        }
    }
}

/// Операция backend, обслуживающая вкладку
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabSource {
    Search(SearchKind),
    Category(PostCategory),
}
