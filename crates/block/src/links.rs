//! URL construction relative to the site root.

use data_loader::CourseId;

/// Builds navigable URLs for courses and shared assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    www_root: String,
}

impl LinkBuilder {
    /// `www_root` is the public site address, e.g. "https://learn.example.org"
    pub fn new(www_root: impl Into<String>) -> Self {
        let www_root = www_root.into().trim_end_matches('/').to_string();
        Self { www_root }
    }

    pub fn www_root(&self) -> &str {
        &self.www_root
    }

    /// Course landing page
    pub fn course_url(&self, course_id: CourseId) -> String {
        format!("{}/course/view.php?id={}", self.www_root, course_id)
    }

    /// Generic course icon used when a course has no overview image
    pub fn placeholder_image_url(&self) -> String {
        format!(
            "{}/theme/image.php?theme=boost&component=core&image=i/course",
            self.www_root
        )
    }

    /// Public URL of a file in a course's overview area
    pub fn overview_file_url(&self, course_id: CourseId, filepath: &str, filename: &str) -> String {
        format!(
            "{}/pluginfile.php/{}/course/overviewfiles{}{}",
            self.www_root, course_id, filepath, filename
        )
    }
}
