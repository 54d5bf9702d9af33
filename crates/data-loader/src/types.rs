//! Core domain types for the enrollment dataset.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - Type aliases for domain clarity (UserId, CourseId, CategoryId)
//! - Read-only projections of the host platform's tables (Course, Category, Enrollment)
//! - EnrollmentIndex, the in-memory store every query is answered from

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with course IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a course
pub type CourseId = u32;

/// Unique identifier for a course category
pub type CategoryId = u32;

// =============================================================================
// Course-related Types
// =============================================================================

/// A course category (e.g. "Mathematics", "Languages")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Represents a course offered on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Display name shown on cards and used as the ranking tie-break
    pub fullname: String,
    pub category: CategoryId,
    /// Unpublished courses are never recommended
    pub visible: bool,
    /// Course description, may contain HTML markup
    pub summary: String,
}

/// A single (user, course) enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// A file attached to a course's "overview" area.
///
/// Course cards use the first image found here as their background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewFile {
    pub course_id: CourseId,
    /// Directory inside the file area, always starts and ends with '/'
    pub filepath: String,
    pub filename: String,
    pub mimetype: String,
}

impl OverviewFile {
    /// Whether the file is an image a browser can render as a card background
    pub fn is_valid_image(&self) -> bool {
        matches!(
            self.mimetype.as_str(),
            "image/gif" | "image/jpeg" | "image/png" | "image/webp" | "image/svg+xml"
        )
    }
}

// =============================================================================
// EnrollmentIndex - The Core In-Memory Store
// =============================================================================

/// Main data structure that holds all data and indices.
///
/// Enrollments are indexed in both directions so that "courses of a user" and
/// "users of a course" are O(1) lookups. The index is immutable once loaded and
/// is shared across requests behind an `Arc`.
#[derive(Debug)]
pub struct EnrollmentIndex {
    // Primary data stores
    pub(crate) courses: HashMap<CourseId, Course>,
    pub(crate) categories: HashMap<CategoryId, Category>,

    // Enrollment indices for fast lookups
    /// Courses each user is enrolled in
    pub(crate) user_courses: HashMap<UserId, HashSet<CourseId>>,
    /// Users enrolled in each course
    pub(crate) course_users: HashMap<CourseId, HashSet<UserId>>,

    /// Overview-area files per course, in insertion order
    pub(crate) overview_files: HashMap<CourseId, Vec<OverviewFile>>,
}

impl EnrollmentIndex {
    /// Creates a new, empty EnrollmentIndex
    pub fn new() -> Self {
        Self {
            courses: HashMap::new(),
            categories: HashMap::new(),
            user_courses: HashMap::new(),
            course_users: HashMap::new(),
            overview_files: HashMap::new(),
        }
    }

    /// Get a course by ID
    pub fn get_course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Get a category by ID
    pub fn get_category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    /// Display name of a course's category, if the category is known
    pub fn category_name_of(&self, course_id: CourseId) -> Option<&str> {
        let course = self.courses.get(&course_id)?;
        self.categories
            .get(&course.category)
            .map(|c| c.name.as_str())
    }

    /// Get all courses a user is enrolled in
    ///
    /// Returns `None` if the user has no enrollments at all
    pub fn get_user_courses(&self, user_id: UserId) -> Option<&HashSet<CourseId>> {
        self.user_courses.get(&user_id)
    }

    /// Get all users enrolled in a course
    pub fn get_course_users(&self, course_id: CourseId) -> Option<&HashSet<UserId>> {
        self.course_users.get(&course_id)
    }

    /// Get the overview-area files of a course
    pub fn get_overview_files(&self, course_id: CourseId) -> &[OverviewFile] {
        self.overview_files
            .get(&course_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over every course in the index (unordered)
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    // Mutators - used during data loading and by test fixtures

    /// Insert a category into the index
    pub fn insert_category(&mut self, category: Category) {
        self.categories.insert(category.id, category);
    }

    /// Insert a course into the index
    pub fn insert_course(&mut self, course: Course) {
        self.courses.insert(course.id, course);
    }

    /// Insert an enrollment and update both directions of the index.
    ///
    /// Duplicate enrollments (a user enrolled through two enrolment methods)
    /// collapse into one.
    pub fn insert_enrollment(&mut self, enrollment: Enrollment) {
        self.user_courses
            .entry(enrollment.user_id)
            .or_default()
            .insert(enrollment.course_id);

        self.course_users
            .entry(enrollment.course_id)
            .or_default()
            .insert(enrollment.user_id);
    }

    /// Attach a file to a course's overview area
    pub fn insert_overview_file(&mut self, file: OverviewFile) {
        self.overview_files
            .entry(file.course_id)
            .or_default()
            .push(file);
    }

    /// Get counts for debugging/validation: (categories, courses, enrollments)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_enrollments = self.user_courses.values().map(|v| v.len()).sum();
        (self.categories.len(), self.courses.len(), total_enrollments)
    }
}

impl Default for EnrollmentIndex {
    fn default() -> Self {
        Self::new()
    }
}
