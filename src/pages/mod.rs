//! Routed pages.

pub mod home;
pub mod nodes;
pub mod not_found;
pub mod topics;

pub use home::HomePage;
pub use nodes::NodesPage;
pub use not_found::NotFound;
pub use topics::TopicsPage;
