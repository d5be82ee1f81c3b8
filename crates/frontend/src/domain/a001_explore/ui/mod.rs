pub mod details;
pub mod list;
mod page;

pub use page::ExplorePage;
