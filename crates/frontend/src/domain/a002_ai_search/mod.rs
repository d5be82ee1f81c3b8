//! AI search page: one question, a brief or detailed answer and its sources.

pub mod model;
pub mod ui;

pub use ui::AiSearchPage;
