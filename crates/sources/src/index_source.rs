//! In-memory EnrollmentSource backed by the loaded EnrollmentIndex.
//!
//! ## Algorithm (candidate_courses)
//! 1. For each similar user, walk the courses they are enrolled in
//! 2. Skip courses the target user already has, unknown courses and hidden ones
//! 3. Count distinct users per course (a user's courses form a set, so each
//!    user adds at most one to any course)
//! 4. Attach category metadata, sort by frequency and truncate
//!
//! Counting runs as a Rayon fold/reduce over the similar users.

use crate::traits::EnrollmentSource;
use crate::types::CandidateCourse;
use anyhow::Result;
use data_loader::{CategoryId, CourseId, EnrollmentIndex, UserId};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

impl EnrollmentSource for EnrollmentIndex {
    fn enrolled_courses(&self, user_id: UserId) -> Result<HashSet<CourseId>> {
        Ok(self.get_user_courses(user_id).cloned().unwrap_or_default())
    }

    fn co_enrolled_users(
        &self,
        courses: &HashSet<CourseId>,
        exclude_user: UserId,
    ) -> Result<HashSet<UserId>> {
        let users: HashSet<UserId> = courses
            .iter()
            .filter_map(|course_id| self.get_course_users(*course_id))
            .flatten()
            .copied()
            .filter(|user_id| *user_id != exclude_user)
            .collect();
        Ok(users)
    }

    #[instrument(skip_all, fields(users = users.len(), limit = limit))]
    fn candidate_courses(
        &self,
        users: &HashSet<UserId>,
        exclude_courses: &HashSet<CourseId>,
        limit: usize,
    ) -> Result<Vec<CandidateCourse>> {
        let frequencies = users
            .par_iter()
            .fold(
                HashMap::new,
                |mut local_counts: HashMap<CourseId, u32>, user_id| {
                    let enrolled = match self.get_user_courses(*user_id) {
                        Some(courses) => courses,
                        None => return local_counts,
                    };
                    for course_id in enrolled {
                        if exclude_courses.contains(course_id) {
                            continue;
                        }
                        let visible = self
                            .get_course(*course_id)
                            .is_some_and(|course| course.visible);
                        if visible {
                            *local_counts.entry(*course_id).or_insert(0) += 1;
                        }
                    }
                    local_counts
                },
            )
            .reduce(HashMap::new, |mut acc, local_counts| {
                for (course_id, count) in local_counts {
                    *acc.entry(course_id).or_insert(0) += count;
                }
                acc
            });

        // Courses whose category is missing drop out, like an inner join would
        let mut candidates: Vec<CandidateCourse> = frequencies
            .into_iter()
            .filter_map(|(course_id, frequency)| {
                let course = self.get_course(course_id)?;
                let category = self.get_category(course.category)?;
                Some(CandidateCourse {
                    course_id,
                    fullname: course.fullname.clone(),
                    category: course.category,
                    category_name: category.name.clone(),
                    summary: course.summary.clone(),
                    frequency,
                })
            })
            .collect();

        candidates.sort_by(CandidateCourse::frequency_order);
        let total = candidates.len();
        candidates.truncate(limit);

        debug!("Found {} candidate courses, keeping {}", total, candidates.len());
        Ok(candidates)
    }

    fn course_categories(&self, courses: &HashSet<CourseId>) -> Result<HashSet<CategoryId>> {
        let categories: HashSet<CategoryId> = courses
            .iter()
            .filter_map(|course_id| self.get_course(*course_id))
            .map(|course| course.category)
            .filter(|category| self.get_category(*category).is_some())
            .collect();
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Category, Course, Enrollment};

    /// Courses 1-3 in category 1, 4-6 in category 2; course 6 is hidden.
    ///
    /// User 1 takes 1; users 2 and 3 take 1 + 2 + 4; user 4 takes 1 + 6;
    /// user 5 takes 5 only.
    fn create_test_index() -> EnrollmentIndex {
        let mut index = EnrollmentIndex::new();
        index.insert_category(Category { id: 1, name: "Science".to_string() });
        index.insert_category(Category { id: 2, name: "Arts".to_string() });

        for id in 1..=6 {
            index.insert_course(Course {
                id,
                fullname: format!("Course {}", id),
                category: if id <= 3 { 1 } else { 2 },
                visible: id != 6,
                summary: String::new(),
            });
        }

        let enrollments = [
            (1, 1),
            (2, 1), (2, 2), (2, 4),
            (3, 1), (3, 2), (3, 4),
            (4, 1), (4, 6),
            (5, 5),
        ];
        for (user_id, course_id) in enrollments {
            index.insert_enrollment(Enrollment { user_id, course_id });
        }

        index
    }

    #[test]
    fn test_enrolled_courses() {
        let index = create_test_index();

        let courses = index.enrolled_courses(2).unwrap();
        assert_eq!(courses, HashSet::from([1, 2, 4]));

        assert!(index.enrolled_courses(99).unwrap().is_empty());
    }

    #[test]
    fn test_co_enrolled_users_excludes_target() {
        let index = create_test_index();
        let courses: HashSet<CourseId> = [1].into_iter().collect();

        let users = index.co_enrolled_users(&courses, 1).unwrap();
        assert_eq!(users, HashSet::from([2, 3, 4]));
    }

    #[test]
    fn test_candidate_courses_counts_and_filters() {
        let index = create_test_index();
        let users: HashSet<UserId> = [2, 3, 4].into_iter().collect();
        let exclude: HashSet<CourseId> = [1].into_iter().collect();

        let candidates = index.candidate_courses(&users, &exclude, 20).unwrap();

        // Course 6 is hidden, course 1 is excluded
        let ids: Vec<CourseId> = candidates.iter().map(|c| c.course_id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(candidates[0].frequency, 2);
        assert_eq!(candidates[0].category_name, "Science");
        assert_eq!(candidates[1].frequency, 2);
        assert_eq!(candidates[1].category_name, "Arts");
    }

    #[test]
    fn test_candidate_courses_respects_limit() {
        let index = create_test_index();
        let users: HashSet<UserId> = [2, 3, 4].into_iter().collect();
        let exclude: HashSet<CourseId> = [1].into_iter().collect();

        let candidates = index.candidate_courses(&users, &exclude, 1).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].course_id, 2);
    }

    #[test]
    fn test_course_categories() {
        let index = create_test_index();
        let courses: HashSet<CourseId> = [1, 2, 4].into_iter().collect();

        let categories = index.course_categories(&courses).unwrap();
        assert_eq!(categories, HashSet::from([1, 2]));
    }
}
