//! Integration tests for the scorer.
//!
//! These tests drive `CourseScorer` through the in-memory `EnrollmentIndex`
//! exactly as the presentation layer does.

use data_loader::{Category, CategoryId, Course, CourseId, Enrollment, EnrollmentIndex, UserId};
use scoring::{CourseScorer, ScoredCourse};
use std::cmp::Ordering;
use std::collections::HashSet;

const SCIENCE: CategoryId = 1;
const ARTS: CategoryId = 2;

fn base_index() -> EnrollmentIndex {
    let mut index = EnrollmentIndex::new();
    index.insert_category(Category { id: SCIENCE, name: "Science".to_string() });
    index.insert_category(Category { id: ARTS, name: "Arts".to_string() });
    index
}

fn add_course(index: &mut EnrollmentIndex, id: CourseId, fullname: &str, category: CategoryId, visible: bool) {
    index.insert_course(Course {
        id,
        fullname: fullname.to_string(),
        category,
        visible,
        summary: format!("<p>About {}</p>", fullname),
    });
}

fn enroll(index: &mut EnrollmentIndex, user_id: UserId, courses: &[CourseId]) {
    for &course_id in courses {
        index.insert_enrollment(Enrollment { user_id, course_id });
    }
}

fn ids(recs: &[ScoredCourse]) -> Vec<CourseId> {
    recs.iter().map(|r| r.course_id).collect()
}

/// User 1 takes C1; users 2-4 take C1 and C2
fn scenario_a_index(c2_category: CategoryId) -> EnrollmentIndex {
    let mut index = base_index();
    add_course(&mut index, 1, "Physics", SCIENCE, true);
    add_course(&mut index, 2, "Chemistry", c2_category, true);
    enroll(&mut index, 1, &[1]);
    for user in 2..=4 {
        enroll(&mut index, user, &[1, 2]);
    }
    index
}

#[test]
fn test_scenario_a_other_category() {
    let index = scenario_a_index(ARTS);
    let recs = CourseScorer::new().recommend(&index, 1).unwrap();

    assert_eq!(ids(&recs), vec![2]);
    assert_eq!(recs[0].frequency, 3);
    assert_eq!(recs[0].score, 30);
    assert!(!recs[0].category_match);
    assert_eq!(recs[0].category_name, "Arts");
}

#[test]
fn test_scenario_b_same_category() {
    let index = scenario_a_index(SCIENCE);
    let recs = CourseScorer::new().recommend(&index, 1).unwrap();

    assert_eq!(ids(&recs), vec![2]);
    assert_eq!(recs[0].score, 80);
    assert!(recs[0].category_match);
}

#[test]
fn test_scenario_c_invisible_course_excluded() {
    let mut index = base_index();
    add_course(&mut index, 1, "Physics", SCIENCE, true);
    add_course(&mut index, 2, "Chemistry", ARTS, true);
    add_course(&mut index, 3, "Unpublished Draft", SCIENCE, false);
    enroll(&mut index, 1, &[1]);
    for user in 2..=6 {
        enroll(&mut index, user, &[1, 3]);
    }
    enroll(&mut index, 7, &[1, 2]);

    let recs = CourseScorer::new().recommend(&index, 1).unwrap();
    assert_eq!(ids(&recs), vec![2]);
}

#[test]
fn test_scenario_d_frequency_cap_applies_before_boost() {
    let mut index = base_index();
    add_course(&mut index, 1, "Course 00", SCIENCE, true);
    enroll(&mut index, 1, &[1]);

    // 25 candidates with equal frequency, so the cap cuts by name.
    // Course 20 (20th) and course 21 (21st) share the user's category.
    let candidates: Vec<CourseId> = (2..=26).collect();
    for &id in &candidates {
        let rank = id - 1;
        let category = if rank == 20 || rank == 21 { SCIENCE } else { ARTS };
        add_course(&mut index, id, &format!("Course {:02}", rank), category, true);
    }
    for user in 2..=4 {
        let mut courses = vec![1];
        courses.extend(&candidates);
        enroll(&mut index, user, &courses);
    }

    let recs = CourseScorer::new().recommend(&index, 1).unwrap();

    // The boosted 20th candidate wins; the boosted 21st never shows up
    assert_eq!(recs.len(), 6);
    assert_eq!(recs[0].fullname, "Course 20");
    assert_eq!(recs[0].score, 80);
    assert!(recs.iter().all(|r| r.fullname != "Course 21"));
    let rest: Vec<&str> = recs[1..].iter().map(|r| r.fullname.as_str()).collect();
    assert_eq!(rest, vec!["Course 01", "Course 02", "Course 03", "Course 04", "Course 05"]);

    // Scoring every candidate would have let it in
    let uncapped = CourseScorer::new()
        .with_candidate_limit(usize::MAX)
        .recommend(&index, 1)
        .unwrap();
    assert!(uncapped.iter().any(|r| r.fullname == "Course 21"));
}

#[test]
fn test_user_without_enrollments() {
    let index = scenario_a_index(ARTS);
    let recs = CourseScorer::new().recommend(&index, 999).unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_user_alone_in_course() {
    let mut index = base_index();
    add_course(&mut index, 1, "Physics", SCIENCE, true);
    enroll(&mut index, 1, &[1]);

    assert!(CourseScorer::new().recommend(&index, 1).unwrap().is_empty());
}

#[test]
fn test_peers_share_nothing_else() {
    let mut index = base_index();
    add_course(&mut index, 1, "Physics", SCIENCE, true);
    add_course(&mut index, 2, "Chemistry", SCIENCE, true);
    enroll(&mut index, 1, &[1, 2]);
    enroll(&mut index, 2, &[1]);
    enroll(&mut index, 3, &[2]);

    assert!(CourseScorer::new().recommend(&index, 1).unwrap().is_empty());
}

/// Deterministic pseudo-random campus: 40 courses, 60 users
fn campus_index() -> EnrollmentIndex {
    let mut index = base_index();
    for id in 1..=40 {
        let category = if id % 3 == 0 { SCIENCE } else { ARTS };
        let visible = id % 7 != 0;
        add_course(&mut index, id, &format!("Course {}", (id * 17) % 40), category, visible);
    }
    for user in 1..=60u32 {
        let courses: Vec<CourseId> = (0..(user % 6))
            .map(|k| ((user * 7 + k * 11) % 40) + 1)
            .collect();
        enroll(&mut index, user, &courses);
    }
    index
}

#[test]
fn test_invariants_hold_for_every_user() {
    let index = campus_index();
    let scorer = CourseScorer::new();

    for user in 1..=60u32 {
        let recs = scorer.recommend(&index, user).unwrap();
        let enrolled: HashSet<CourseId> = index
            .get_user_courses(user)
            .cloned()
            .unwrap_or_default();

        assert!(recs.len() <= 6, "user {} got {} courses", user, recs.len());
        if enrolled.is_empty() {
            assert!(recs.is_empty());
        }

        for rec in &recs {
            assert!(!enrolled.contains(&rec.course_id), "user {} already takes {}", user, rec.course_id);
            assert!(index.get_course(rec.course_id).unwrap().visible);
        }

        for pair in recs.windows(2) {
            let order = pair[1]
                .score
                .cmp(&pair[0].score)
                .then_with(|| pair[0].fullname.cmp(&pair[1].fullname));
            assert_ne!(order, Ordering::Greater, "user {} results out of order", user);
        }
    }
}

#[test]
fn test_recommend_is_repeatable() {
    let index = campus_index();
    let scorer = CourseScorer::new();

    for user in [5, 17, 29, 41] {
        let first = scorer.recommend(&index, user).unwrap();
        let second = scorer.recommend(&index, user).unwrap();
        assert_eq!(first, second);
    }
}
