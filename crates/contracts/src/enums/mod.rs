pub mod explore_tab;
pub mod paging_strategy;
pub mod post_category;
pub mod region;
pub mod search_kind;

pub use explore_tab::{ExploreTab, TabSource};
pub use paging_strategy::PagingStrategy;
pub use post_category::PostCategory;
pub use region::Region;
pub use search_kind::SearchKind;
