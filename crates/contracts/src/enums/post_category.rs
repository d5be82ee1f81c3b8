use serde::{Deserialize, Serialize};

/// Категории постов на стороне backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostCategory {
    WelfareSenior,
    WelfareDisabled,
    WelfareWomenFamily,
    WelfareChildYouth,
    WelfareYouth,
    HealthWellness,
    Notice,
    PressRelease,
    CultureNews,
    CityTour,
    TourGuide,
}

impl PostCategory {
    /// Код категории в запросе `/posts?category=`
    pub fn code(&self) -> &'static str {
        match self {
            PostCategory::WelfareSenior => "WELFARE_SENIOR",
            PostCategory::WelfareDisabled => "WELFARE_DISABLED",
            PostCategory::WelfareWomenFamily => "WELFARE_WOMEN_FAMILY",
            PostCategory::WelfareChildYouth => "WELFARE_CHILD_YOUTH",
            PostCategory::WelfareYouth => "WELFARE_YOUTH",
            PostCategory::HealthWellness => "HEALTH_WELLNESS",
            PostCategory::Notice => "NOTICE",
            PostCategory::PressRelease => "PRESS_RELEASE",
            PostCategory::CultureNews => "CULTURE_NEWS",
            PostCategory::CityTour => "CITY_TOUR",
            PostCategory::TourGuide => "TOUR_GUIDE",
        }
    }
}

impl std::fmt::Display for PostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
