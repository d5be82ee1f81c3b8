use serde::{Deserialize, Serialize};

/// Тип поиска во внешнем поисковом API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    News,
    Cafe,
    Blog,
}

impl SearchKind {
    /// Value of the `types` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            SearchKind::News => "news",
            SearchKind::Cafe => "cafearticle",
            SearchKind::Blog => "blog",
        }
    }
}
