//! Item details UI module
//!
//! MVVM split:
//! - model.rs: detail merge and summary presentation rules
//! - view_model.rs: detail/summary loading with its own generation guard
//! - view.rs: Leptos component (pure UI)

mod model;
mod view;
mod view_model;

pub use view::ItemDetails;
