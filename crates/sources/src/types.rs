//! Types shared between enrollment sources and the scorer.

use data_loader::{CategoryId, CourseId};
use serde::Serialize;
use std::cmp::Ordering;

/// A course that at least one co-enrolled user takes and the target user does not.
///
/// Carries the category display name so that callers never need a second
/// lookup to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateCourse {
    pub course_id: CourseId,
    pub fullname: String,
    pub category: CategoryId,
    pub category_name: String,
    pub summary: String,
    /// Number of distinct similar users enrolled in this course
    pub frequency: u32,
}

impl CandidateCourse {
    /// Pre-filter order: frequency descending, then display name, then id.
    pub fn frequency_order(a: &Self, b: &Self) -> Ordering {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.fullname.cmp(&b.fullname))
            .then_with(|| a.course_id.cmp(&b.course_id))
    }
}
