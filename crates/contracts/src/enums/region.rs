use serde::{Deserialize, Serialize};

/// Административные районы города (фильтр левой панели)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    All,
    DaesanEup,
    JigokMyeon,
    PalbongMyeon,
    SeongyeonMyeon,
    EumamMyeon,
    UnsanMyeon,
    BuchunDong,
    Dongmun1Dong,
    Dongmun2Dong,
    SuseokDong,
    InjiMyeon,
    SeoknamDong,
    BuseokMyeon,
    GobukMyeon,
    HaemiMyeon,
}

impl Region {
    /// Label shown in the sidebar and carried in the `region` query parameter
    pub fn label(&self) -> &'static str {
        match self {
            Region::All => "전체",
            Region::DaesanEup => "대산읍",
            Region::JigokMyeon => "지곡면",
            Region::PalbongMyeon => "팔봉면",
            Region::SeongyeonMyeon => "성연면",
            Region::EumamMyeon => "음암면",
            Region::UnsanMyeon => "운산면",
            Region::BuchunDong => "부춘동",
            Region::Dongmun1Dong => "동문1동",
            Region::Dongmun2Dong => "동문2동",
            Region::SuseokDong => "수석동",
            Region::InjiMyeon => "인지면",
            Region::SeoknamDong => "석남동",
            Region::BuseokMyeon => "부석면",
            Region::GobukMyeon => "고북면",
            Region::HaemiMyeon => "해미면",
        }
    }

    /// All regions in sidebar order, "전체" first
    pub fn all() -> Vec<Region> {
        vec![
            Region::All,
            Region::DaesanEup,
            Region::JigokMyeon,
            Region::PalbongMyeon,
            Region::SeongyeonMyeon,
            Region::EumamMyeon,
            Region::UnsanMyeon,
            Region::BuchunDong,
            Region::Dongmun1Dong,
            Region::Dongmun2Dong,
            Region::SuseokDong,
            Region::InjiMyeon,
            Region::SeoknamDong,
            Region::BuseokMyeon,
            Region::GobukMyeon,
            Region::HaemiMyeon,
        ]
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|r| r.label() == label)
    }

    /// Value for the backend `region` filter; `None` means the whole city
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Region::All => None,
            other => Some(other.label()),
        }
    }

    /// Search phrase for the external search API
    pub fn search_query(&self) -> String {
        match self {
            Region::All => "서산시".to_string(),
            other => format!("서산시 {}", other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Region::from_label("해미면"), Some(Region::HaemiMyeon));
        assert_eq!(Region::from_label("전체"), Some(Region::All));
        assert_eq!(Region::from_label("서울"), None);
    }

    #[test]
    fn test_search_query() {
        assert_eq!(Region::All.search_query(), "서산시");
        assert_eq!(Region::DaesanEup.search_query(), "서산시 대산읍");
        assert_eq!(Region::All.query_value(), None);
    }

    #[test]
    fn test_sixteen_regions() {
        assert_eq!(Region::all().len(), 16);
    }
}
