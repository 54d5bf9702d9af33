//! Course card images.

use crate::links::LinkBuilder;
use data_loader::{CourseId, EnrollmentIndex};
use std::sync::Arc;

/// Looks up the image shown on a course card
pub trait ImageLookup: Send + Sync {
    /// URL of the course's image, or `None` to use the placeholder
    fn course_image(&self, course_id: CourseId) -> Option<String>;
}

/// Uses the first valid image in a course's overview file area
pub struct OverviewImageLookup {
    index: Arc<EnrollmentIndex>,
    links: LinkBuilder,
}

impl OverviewImageLookup {
    pub fn new(index: Arc<EnrollmentIndex>, links: LinkBuilder) -> Self {
        Self { index, links }
    }
}

impl ImageLookup for OverviewImageLookup {
    fn course_image(&self, course_id: CourseId) -> Option<String> {
        self.index
            .get_overview_files(course_id)
            .iter()
            .find(|file| file.is_valid_image())
            .map(|file| {
                self.links
                    .overview_file_url(course_id, &file.filepath, &file.filename)
            })
    }
}
