//! The read-only data-access boundary used by the recommendation scorer.

use crate::types::CandidateCourse;
use anyhow::Result;
use data_loader::{CategoryId, CourseId, UserId};
use std::collections::HashSet;
use std::sync::Arc;

/// Read access to an enrollment dataset.
///
/// Any store that can answer these four queries can drive the scorer: a
/// relational database, a document store or the in-memory `EnrollmentIndex`.
///
/// ## Design Note
/// - `Send + Sync` lets one source serve concurrent requests for different users
/// - Errors are connectivity or query failures; an empty answer is never an error
pub trait EnrollmentSource: Send + Sync {
    /// Courses the user is enrolled in
    fn enrolled_courses(&self, user_id: UserId) -> Result<HashSet<CourseId>>;

    /// Users, other than `exclude_user`, enrolled in at least one of `courses`
    fn co_enrolled_users(
        &self,
        courses: &HashSet<CourseId>,
        exclude_user: UserId,
    ) -> Result<HashSet<UserId>>;

    /// Visible courses that any of `users` is enrolled in, minus `exclude_courses`.
    ///
    /// Each candidate's `frequency` is the number of distinct `users` enrolled
    /// in it. Results are ordered by `CandidateCourse::frequency_order` and hold
    /// at most `limit` entries.
    fn candidate_courses(
        &self,
        users: &HashSet<UserId>,
        exclude_courses: &HashSet<CourseId>,
        limit: usize,
    ) -> Result<Vec<CandidateCourse>>;

    /// Distinct categories spanned by `courses`
    fn course_categories(&self, courses: &HashSet<CourseId>) -> Result<HashSet<CategoryId>>;
}

impl<T: EnrollmentSource + ?Sized> EnrollmentSource for Arc<T> {
    fn enrolled_courses(&self, user_id: UserId) -> Result<HashSet<CourseId>> {
        (**self).enrolled_courses(user_id)
    }

    fn co_enrolled_users(
        &self,
        courses: &HashSet<CourseId>,
        exclude_user: UserId,
    ) -> Result<HashSet<UserId>> {
        (**self).co_enrolled_users(courses, exclude_user)
    }

    fn candidate_courses(
        &self,
        users: &HashSet<UserId>,
        exclude_courses: &HashSet<CourseId>,
        limit: usize,
    ) -> Result<Vec<CandidateCourse>> {
        (**self).candidate_courses(users, exclude_courses, limit)
    }

    fn course_categories(&self, courses: &HashSet<CourseId>) -> Result<HashSet<CategoryId>> {
        (**self).course_categories(courses)
    }
}
