use serde::{Deserialize, Serialize};

/// Где происходит постраничная нарезка списка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagingStrategy {
    /// Backend returns the whole bounded result set, the page is sliced locally
    Client,
    /// Backend receives page/size and returns an already sliced page
    Server,
}
