pub mod a001_explore;
pub mod a002_ai_search;
