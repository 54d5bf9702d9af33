//! Desktop dashboard rendering: a deck of course cards.

use crate::images::ImageLookup;
use crate::links::LinkBuilder;
use scoring::ScoredCourse;
use std::fmt::Write;

/// Content handed back to the host page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContent {
    pub text: String,
    pub footer: String,
}

impl BlockContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            footer: String::new(),
        }
    }
}

/// Escape text for use inside HTML content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the recommended courses as a card deck.
///
/// Each card links to the course and shows its image (or the placeholder),
/// name and category.
pub fn render_cards(
    courses: &[ScoredCourse],
    images: &dyn ImageLookup,
    links: &LinkBuilder,
) -> String {
    let mut cards = String::new();

    for course in courses {
        let image = images
            .course_image(course.course_id)
            .unwrap_or_else(|| links.placeholder_image_url());

        // Writing into a String cannot fail
        let _ = write!(
            cards,
            concat!(
                "<a class=\"card dashboard-card\" href=\"{link}\">",
                "<div class=\"card-img dashboard-card-img\" style=\"background-image: url(&quot;{image}&quot;);\"></div>",
                "<div class=\"card-body pr-1 course-info-container c-card-cont\">",
                "<p class=\"c-name\">{name}</p>",
                "<p class=\"c-cat-name\">{category}</p>",
                "</div>",
                "</a>\n"
            ),
            link = escape_html(&links.course_url(course.course_id)),
            image = escape_html(&image),
            name = escape_html(&course.fullname),
            category = escape_html(&course.category_name),
        );
    }

    format!("<div class=\"card-deck dashboard-card-deck\">\n{}</div>", cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::CourseId;

    struct FixedImages;

    impl ImageLookup for FixedImages {
        fn course_image(&self, course_id: CourseId) -> Option<String> {
            (course_id == 1).then(|| "http://img/one.png".to_string())
        }
    }

    fn scored(course_id: CourseId, fullname: &str) -> ScoredCourse {
        ScoredCourse {
            course_id,
            fullname: fullname.to_string(),
            category: 1,
            category_name: "Science & Tech".to_string(),
            summary: String::new(),
            frequency: 1,
            score: 10,
            category_match: false,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_render_cards() {
        let links = LinkBuilder::new("http://localhost");
        let html = render_cards(&[scored(1, "Physics"), scored(2, "<Chem>")], &FixedImages, &links);

        assert!(html.starts_with("<div class=\"card-deck dashboard-card-deck\">"));
        assert_eq!(html.matches("class=\"card dashboard-card\"").count(), 2);
        assert!(html.contains("href=\"http://localhost/course/view.php?id=1\""));
        assert!(html.contains("http://img/one.png"));
        // Course 2 has no image
        assert!(html.contains("image=i/course"));
        assert!(html.contains("&lt;Chem&gt;"));
        assert!(html.contains("Science &amp; Tech"));
    }
}
