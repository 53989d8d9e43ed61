//! UI components shared across pages.

pub mod force_graph;
pub mod journey_history;
pub mod navigation;
pub mod search_bar;
