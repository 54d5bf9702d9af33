//! EnrollmentIndex building and indexing logic.
//!
//! This module builds the EnrollmentIndex from parsed data:
//! - Parse the dataset files in parallel
//! - Create primary indices (courses, categories, enrollments both ways)
//! - Validate cross-file references

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl EnrollmentIndex {
    /// Load the whole dataset from a directory
    ///
    /// Steps:
    /// 1. Parse categories, courses, enrollments and overview files
    /// 2. Build the course/user indices and attach overview files
    /// 3. Validate data integrity
    ///
    /// `overviewfiles.dat` is optional; every other file must exist.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading enrollment dataset from {:?}", data_dir);

        let categories_path = data_dir.join("categories.dat");
        let courses_path = data_dir.join("courses.dat");
        let enrollments_path = data_dir.join("enrollments.dat");
        let overview_path = data_dir.join("overviewfiles.dat");

        // Enrollments dominate the dataset, so they get a thread of their own
        let ((categories, courses), (enrollments, overview_files)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_categories(&categories_path),
                    || parser::parse_courses(&courses_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_enrollments(&enrollments_path),
                    || {
                        if overview_path.exists() {
                            parser::parse_overview_files(&overview_path)
                        } else {
                            Ok(Vec::new())
                        }
                    },
                )
            },
        );

        let categories = categories?;
        let courses = courses?;
        let enrollments = enrollments?;
        let overview_files = overview_files?;

        info!(
            "Loaded {} categories, {} courses, {} enrollments, {} overview files",
            categories.len(),
            courses.len(),
            enrollments.len(),
            overview_files.len()
        );

        let mut index = EnrollmentIndex::new();

        for category in categories {
            index.insert_category(category);
        }

        for course in courses {
            index.insert_course(course);
        }

        for enrollment in enrollments {
            index.insert_enrollment(enrollment);
        }

        for file in overview_files {
            index.insert_overview_file(file);
        }

        index.validate()?;

        info!("EnrollmentIndex successfully built and validated");
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - every course's category exists
    /// - every enrollment references an existing course
    /// - every overview file references an existing course
    pub fn validate(&self) -> Result<()> {
        for course in self.courses.values() {
            if !self.categories.contains_key(&course.category) {
                return Err(DataLoadError::MissingReference {
                    entity: "Category".to_string(),
                    id: course.category,
                });
            }
        }

        for course_id in self.course_users.keys() {
            if !self.courses.contains_key(course_id) {
                return Err(DataLoadError::MissingReference {
                    entity: "Course".to_string(),
                    id: *course_id,
                });
            }
        }

        for course_id in self.overview_files.keys() {
            if !self.courses.contains_key(course_id) {
                return Err(DataLoadError::MissingReference {
                    entity: "Course".to_string(),
                    id: *course_id,
                });
            }
        }

        Ok(())
    }
}
