//! Dashboard block for course recommendations.
//!
//! This crate is the presentation layer around the scorer: viewer gating,
//! localized strings, course links and images, the desktop card deck and the
//! mobile payload.

pub mod desktop;
pub mod images;
pub mod links;
pub mod mobile;
pub mod strings;
pub mod summary;
pub mod viewer;
pub mod widget;

pub use desktop::BlockContent;
pub use images::{ImageLookup, OverviewImageLookup};
pub use links::LinkBuilder;
pub use mobile::MobileResponse;
pub use strings::{EnglishStrings, StringKey, StringProvider};
pub use viewer::Viewer;
pub use widget::RecommendationBlock;
