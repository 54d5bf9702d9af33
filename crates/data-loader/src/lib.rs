//! # Data Loader Crate
//!
//! This crate handles loading and indexing the course enrollment dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Course, Category, Enrollment, EnrollmentIndex)
//! - **parser**: Parse .dat files into Rust structs
//! - **index**: Build indices and validate references
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::EnrollmentIndex;
//! use std::path::Path;
//!
//! let index = EnrollmentIndex::load_from_files(Path::new("data/demo"))?;
//!
//! let course = index.get_course(101).unwrap();
//! let enrolled = index.get_user_courses(1);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    CourseId,
    CategoryId,
    // Core types
    Category,
    Course,
    Enrollment,
    OverviewFile,
    EnrollmentIndex,
};
