//! Loaders for the fixed (non-scrolling) pages.

pub mod detail;
pub mod home;

pub use detail::{load_detail, DetailSummary};
pub use home::{load_home, HomeSummary};
