//! Course Scorer - co-enrollment collaborative filtering
//!
//! "Learners who took your courses also took these"
//!
//! ## Algorithm
//! 1. E = courses the user is enrolled in (empty -> no recommendations)
//! 2. S = other users enrolled in at least one course of E (empty -> none)
//! 3. C = visible courses of S not in E, with the number of S users in each;
//!    only the top `candidate_limit` by (frequency desc, name asc) go on
//! 4. U = categories spanned by E
//! 5. score = frequency * `frequency_weight`, + `category_boost` if in U
//! 6. Sort by score desc, name asc
//! 7. Return the first `result_limit`
//!
//! The frequency cap in step 3 runs before the category boost, so a course
//! just outside the cap never surfaces even if its boost would rank it high.

use crate::ranking::{ScoredCourse, rank};
use anyhow::Result;
use data_loader::{CourseId, UserId};
use sources::{CandidateCourse, EnrollmentSource};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Tunable constants of the scoring pass.
///
/// The defaults are the platform's long-standing values; changing them
/// changes which courses users see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorerConfig {
    /// How many candidates survive the frequency pre-filter
    pub candidate_limit: usize,
    /// How many recommendations are returned
    pub result_limit: usize,
    /// Points per co-enrolled user
    pub frequency_weight: u32,
    /// Bonus for sharing a category with one of the user's courses
    pub category_boost: u32,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            candidate_limit: 20,
            result_limit: 6,
            frequency_weight: 10,
            category_boost: 50,
        }
    }
}

/// Produces ranked course recommendations from any `EnrollmentSource`.
#[derive(Debug, Clone, Default)]
pub struct CourseScorer {
    config: ScorerConfig,
}

impl CourseScorer {
    /// Create a scorer with the default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the frequency pre-filter size (default: 20)
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.config.candidate_limit = limit;
        self
    }

    /// Configure how many recommendations to return (default: 6)
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.config.result_limit = limit;
        self
    }

    /// Configure points per co-enrolled user (default: 10)
    pub fn with_frequency_weight(mut self, weight: u32) -> Self {
        self.config.frequency_weight = weight;
        self
    }

    /// Configure the same-category bonus (default: 50)
    pub fn with_category_boost(mut self, boost: u32) -> Self {
        self.config.category_boost = boost;
        self
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Recommend courses for a user.
    ///
    /// An empty result means there was nothing to recommend from; only a
    /// failing data source produces an error.
    #[instrument(skip(self, source))]
    pub fn recommend<S>(&self, source: &S, user_id: UserId) -> Result<Vec<ScoredCourse>>
    where
        S: EnrollmentSource + ?Sized,
    {
        // Step 1: the user's own courses
        let enrolled = source.enrolled_courses(user_id)?;
        if enrolled.is_empty() {
            debug!("User {} has no enrollments", user_id);
            return Ok(Vec::new());
        }

        // Step 2: similar users
        let similar_users = source.co_enrolled_users(&enrolled, user_id)?;
        if similar_users.is_empty() {
            debug!("No co-enrolled users for user {}", user_id);
            return Ok(Vec::new());
        }
        debug!("Found {} similar users", similar_users.len());

        // Step 3: candidates, capped by frequency
        let candidates = source.candidate_courses(
            &similar_users,
            &enrolled,
            self.config.candidate_limit,
        )?;
        let candidates = self.prefilter(candidates, &enrolled);
        if candidates.is_empty() {
            debug!("Similar users share no other visible courses");
            return Ok(Vec::new());
        }

        // Step 4: the user's categories
        let categories = source.course_categories(&enrolled)?;

        // Steps 5-7: score, rank, cut
        let scored: Vec<ScoredCourse> = candidates
            .into_iter()
            .map(|candidate| {
                let category_match = categories.contains(&candidate.category);
                let score = self.score(candidate.frequency, category_match);
                ScoredCourse::new(candidate, score, category_match)
            })
            .collect();

        let recommendations = rank(scored, self.config.result_limit);
        debug!("Recommending {} courses", recommendations.len());
        Ok(recommendations)
    }

    /// Score a candidate from its frequency and category match
    pub fn score(&self, frequency: u32, category_match: bool) -> u32 {
        let base = frequency.saturating_mul(self.config.frequency_weight);
        if category_match {
            base.saturating_add(self.config.category_boost)
        } else {
            base
        }
    }

    /// Re-apply the candidate contract locally.
    ///
    /// Sources that return enrolled courses, ignore the order or ignore the
    /// limit cannot change the outcome this way.
    fn prefilter(
        &self,
        mut candidates: Vec<CandidateCourse>,
        enrolled: &HashSet<CourseId>,
    ) -> Vec<CandidateCourse> {
        candidates.retain(|c| !enrolled.contains(&c.course_id));
        candidates.sort_by(CandidateCourse::frequency_order);
        candidates.truncate(self.config.candidate_limit);
        candidates
    }
}
