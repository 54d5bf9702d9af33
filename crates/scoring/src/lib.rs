//! Course recommendation scoring.
//!
//! This crate provides:
//! - `CourseScorer`, the single collaborative-filtering pass
//! - `ScoredCourse` and the final ranking order
//!
//! ## Example Usage
//! ```ignore
//! use scoring::CourseScorer;
//!
//! let index = EnrollmentIndex::load_from_files(Path::new("data/demo"))?;
//! let recommendations = CourseScorer::new().recommend(&index, user_id)?;
//! ```
//!
//! Both the desktop card deck and the mobile payload are built from the
//! same `recommend` call.

pub mod ranking;
pub mod scorer;

pub use ranking::ScoredCourse;
pub use scorer::{CourseScorer, ScorerConfig};
