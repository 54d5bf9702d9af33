//! # Sources Crate
//!
//! The data-access boundary between the recommendation scorer and whatever
//! stores enrollments.
//!
//! ## Components
//!
//! - **traits**: `EnrollmentSource`, the four read queries the scorer needs
//! - **types**: `CandidateCourse`, a co-enrolled course with its frequency
//! - **index_source**: `EnrollmentSource` over the in-memory `EnrollmentIndex`
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::EnrollmentIndex;
//! use sources::EnrollmentSource;
//!
//! let index = EnrollmentIndex::load_from_files(Path::new("data/demo"))?;
//! let enrolled = index.enrolled_courses(1)?;
//! let peers = index.co_enrolled_users(&enrolled, 1)?;
//! let candidates = index.candidate_courses(&peers, &enrolled, 20)?;
//! ```

pub mod types;
pub mod traits;
pub mod index_source;

pub use traits::EnrollmentSource;
pub use types::CandidateCourse;

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::EnrollmentIndex;
    use std::sync::Arc;

    #[test]
    fn test_arc_source_delegates() {
        let source: Arc<dyn EnrollmentSource> = Arc::new(EnrollmentIndex::new());
        assert!(source.enrolled_courses(1).unwrap().is_empty());
    }
}
