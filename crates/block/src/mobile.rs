//! Mobile app payload: a template, its data and a click handler.

use crate::desktop::escape_html;
use crate::links::LinkBuilder;
use crate::summary::format_summary;
use data_loader::CourseId;
use scoring::ScoredCourse;
use serde::Serialize;
use std::fmt::Write;

/// Id of the single template the app renders
pub const MAIN_TEMPLATE_ID: &str = "main";

/// What the mobile app receives for the block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MobileResponse {
    pub templates: Vec<MobileTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MobileData>,
}

impl MobileResponse {
    /// A response that only shows a message
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            templates: vec![MobileTemplate {
                id: MAIN_TEMPLATE_ID.to_string(),
                html: text.into(),
            }],
            javascript: None,
            data: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MobileTemplate {
    pub id: String,
    pub html: String,
}

/// Structured data behind the course list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MobileData {
    pub courses: Vec<MobileCourse>,
    pub title: String,
    pub courseimgurl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MobileCourse {
    pub id: CourseId,
    pub fullname: String,
    pub categoryname: String,
    pub score: u32,
    /// Plain text, at most 200 characters
    pub formatted_summary: String,
}

impl From<&ScoredCourse> for MobileCourse {
    fn from(course: &ScoredCourse) -> Self {
        Self {
            id: course.course_id,
            fullname: course.fullname.clone(),
            categoryname: course.category_name.clone(),
            score: course.score,
            formatted_summary: format_summary(&course.summary),
        }
    }
}

impl MobileData {
    pub fn new(courses: &[ScoredCourse], title: String, links: &LinkBuilder) -> Self {
        Self {
            courses: courses.iter().map(MobileCourse::from).collect(),
            title,
            courseimgurl: links.placeholder_image_url(),
        }
    }
}

/// Handler the app calls when a course is tapped; opens the course outside the app
pub fn click_handler(links: &LinkBuilder) -> String {
    format!(
        "this.courseClicked = function(courseId) {{ window.open(\"{}/course/view.php?id=\" + courseId, \"_system\"); }};",
        links.www_root()
    )
}

/// Render the list template for the app
pub fn render_list(data: &MobileData) -> String {
    let mut items = String::new();

    for course in &data.courses {
        // Writing into a String cannot fail
        let _ = write!(
            items,
            concat!(
                "<ion-item button (click)=\"courseClicked({id})\">",
                "<ion-thumbnail slot=\"start\"><img src=\"{image}\" alt=\"\"></ion-thumbnail>",
                "<ion-label>",
                "<h2>{name}</h2>",
                "<p class=\"c-cat-name\">{category}</p>",
                "<p>{summary}</p>",
                "</ion-label>",
                "</ion-item>\n"
            ),
            id = course.id,
            image = escape_html(&data.courseimgurl),
            name = escape_html(&course.fullname),
            category = escape_html(&course.categoryname),
            summary = escape_html(&course.formatted_summary),
        );
    }

    format!(
        "<div class=\"block-course-recommendation\">\n<h3>{}</h3>\n<ion-list>\n{}</ion-list>\n</div>",
        escape_html(&data.title),
        items
    )
}
