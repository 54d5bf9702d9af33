//! Scored courses and their final ordering.

use data_loader::{CategoryId, CourseId};
use serde::Serialize;
use sources::CandidateCourse;
use std::cmp::Ordering;

/// A recommended course with its score.
///
/// Transient: built per request and handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredCourse {
    pub course_id: CourseId,
    pub fullname: String,
    pub category: CategoryId,
    pub category_name: String,
    pub summary: String,
    pub frequency: u32,
    pub score: u32,
    /// Whether the category boost was applied
    pub category_match: bool,
}

impl ScoredCourse {
    pub fn new(candidate: CandidateCourse, score: u32, category_match: bool) -> Self {
        Self {
            course_id: candidate.course_id,
            fullname: candidate.fullname,
            category: candidate.category,
            category_name: candidate.category_name,
            summary: candidate.summary,
            frequency: candidate.frequency,
            score,
            category_match,
        }
    }

    /// Short human-readable reason for the score
    pub fn explanation(&self) -> String {
        let peers = if self.frequency == 1 { "learner" } else { "learners" };
        if self.category_match {
            format!(
                "{} similar {} enrolled; same category as one of your courses",
                self.frequency, peers
            )
        } else {
            format!("{} similar {} enrolled", self.frequency, peers)
        }
    }
}

/// Final order: score descending, then display name, then id
pub fn score_order(a: &ScoredCourse, b: &ScoredCourse) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.fullname.cmp(&b.fullname))
        .then_with(|| a.course_id.cmp(&b.course_id))
}

/// Sort by `score_order` and keep the first `limit`
pub fn rank(mut scored: Vec<ScoredCourse>, limit: usize) -> Vec<ScoredCourse> {
    scored.sort_by(score_order);
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(course_id: CourseId, fullname: &str, score: u32) -> ScoredCourse {
        ScoredCourse {
            course_id,
            fullname: fullname.to_string(),
            category: 1,
            category_name: "General".to_string(),
            summary: String::new(),
            frequency: 1,
            score,
            category_match: false,
        }
    }

    #[test]
    fn test_rank_sorts_by_score_then_name() {
        let ranked = rank(
            vec![
                scored(1, "Physics", 30),
                scored(2, "Astronomy", 30),
                scored(3, "Chemistry", 80),
                scored(4, "Biology", 10),
            ],
            10,
        );

        let ids: Vec<CourseId> = ranked.iter().map(|c| c.course_id).collect();
        assert_eq!(ids, vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_rank_truncates() {
        let ranked = rank((1..=10).map(|id| scored(id, "Same", id)).collect(), 6);
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].course_id, 10);
        assert_eq!(ranked[5].course_id, 5);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new(), 6).is_empty());
    }

    #[test]
    fn test_explanation() {
        let mut course = scored(1, "Physics", 80);
        course.frequency = 3;
        course.category_match = true;
        assert!(course.explanation().starts_with("3 similar learners"));
        assert!(course.explanation().contains("same category"));
    }
}
