//! # Recommendation Block
//!
//! Wires the scorer to the two callers of the dashboard widget:
//! 1. Gate on the viewer (anonymous and guest visitors get "login required")
//! 2. Run the single `recommend` pass
//! 3. Empty result -> "no recommendations"
//! 4. Otherwise hand the courses to the desktop or mobile renderer
//!
//! Every collaborator is injected, so one block can serve any number of
//! concurrent requests.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::desktop::{BlockContent, render_cards};
use crate::images::ImageLookup;
use crate::links::LinkBuilder;
use crate::mobile::{self, MobileData, MobileResponse, MobileTemplate, MAIN_TEMPLATE_ID};
use crate::strings::{StringKey, StringProvider};
use crate::viewer::Viewer;
use data_loader::UserId;
use scoring::{CourseScorer, ScoredCourse};
use sources::EnrollmentSource;

/// The dashboard widget with all of its collaborators
#[derive(Clone)]
pub struct RecommendationBlock {
    source: Arc<dyn EnrollmentSource>,
    scorer: CourseScorer,
    images: Arc<dyn ImageLookup>,
    strings: Arc<dyn StringProvider>,
    links: LinkBuilder,
}

impl RecommendationBlock {
    pub fn new(
        source: Arc<dyn EnrollmentSource>,
        images: Arc<dyn ImageLookup>,
        strings: Arc<dyn StringProvider>,
        links: LinkBuilder,
    ) -> Self {
        Self {
            source,
            scorer: CourseScorer::new(),
            images,
            strings,
            links,
        }
    }

    /// Replace the default scorer
    pub fn with_scorer(mut self, scorer: CourseScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Block title
    pub fn title(&self) -> String {
        self.string(StringKey::PluginName)
    }

    /// Localized text from the block's string provider
    pub fn string(&self, key: StringKey) -> String {
        self.strings.get(key)
    }

    /// Ranked courses for a user, shared by both renderers
    pub fn recommendations(&self, user_id: UserId) -> Result<Vec<ScoredCourse>> {
        let start = Instant::now();
        let courses = self
            .scorer
            .recommend(self.source.as_ref(), user_id)
            .with_context(|| format!("Failed to recommend courses for user {}", user_id))?;
        info!(
            "Recommended {} courses for user {} in {:.2?}",
            courses.len(),
            user_id,
            start.elapsed()
        );
        Ok(courses)
    }

    /// Content for the desktop dashboard
    pub fn desktop_content(&self, viewer: Viewer) -> Result<BlockContent> {
        let Some(user_id) = viewer.user_id() else {
            return Ok(BlockContent::text(self.strings.get(StringKey::LoginRequired)));
        };

        let courses = self.recommendations(user_id)?;
        if courses.is_empty() {
            return Ok(BlockContent::text(self.strings.get(StringKey::NoRecommendations)));
        }

        Ok(BlockContent::text(render_cards(
            &courses,
            self.images.as_ref(),
            &self.links,
        )))
    }

    /// Payload for the mobile app
    pub fn mobile_view(&self, viewer: Viewer) -> Result<MobileResponse> {
        let Some(user_id) = viewer.user_id() else {
            return Ok(MobileResponse::message(self.strings.get(StringKey::LoginRequired)));
        };

        let courses = self.recommendations(user_id)?;
        if courses.is_empty() {
            return Ok(MobileResponse::message(
                self.strings.get(StringKey::NoRecommendations),
            ));
        }

        let data = MobileData::new(
            &courses,
            self.strings.get(StringKey::RecommendedCourses),
            &self.links,
        );
        Ok(MobileResponse {
            templates: vec![MobileTemplate {
                id: MAIN_TEMPLATE_ID.to_string(),
                html: mobile::render_list(&data),
            }],
            javascript: Some(mobile::click_handler(&self.links)),
            data: Some(data),
        })
    }
}
