//! Explore view: tabbed, region-filtered list/detail browser over the
//! portal backend.
//!
//! - state.rs: `FilterState` and the URL synchronizer
//! - transitions.rs: pure navigation transitions
//! - paging.rs: paging policy shared by client- and server-paged tabs
//! - api.rs: backend client seam
//! - resolver.rs: filter tuple -> fetch plan -> normalized listing
//! - view_model.rs: reactive controller
//! - ui: Leptos components

pub mod api;
pub mod paging;
pub mod resolver;
pub mod state;
pub mod transitions;
pub mod ui;
pub mod view_model;

pub use ui::ExplorePage;
