//! Force-directed visualization of pub/sub graphs.
//!
//! Renders a [`crate::graph::GraphData`] on an HTML canvas with:
//! - Physics-based layout via force simulation
//! - Node color by entity kind, link color and arrows by relation direction
//! - Pan, zoom, node dragging, hover highlighting, and click-to-navigate
//! - Recency ring markers for previously visited entities
//! - Automatic fit-to-view once the layout settles after a data change

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
