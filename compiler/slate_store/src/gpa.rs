//! Weighted grade point average.
//!
//! Each completed course contributes `4 - 3 * (100 - score)^2 / 1600`
//! grade points, weighted by its credit. Courses without a score, or with a
//! score of zero, are not yet completed and do not count.

/// One enrollment as seen by the GPA calculation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradedCourse {
    pub credit: f64,
    pub score: Option<f64>,
}

/// Grade points for a single score out of 100.
#[inline]
pub fn grade_points(score: f64) -> f64 {
    let gap = 100.0 - score;
    4.0 - 3.0 * gap * gap / 1600.0
}

/// Credit-weighted GPA over completed courses, `0.0` when there are none.
pub fn weighted_gpa<I>(courses: I) -> f64
where
    I: IntoIterator<Item = GradedCourse>,
{
    let (points, credits) = courses
        .into_iter()
        .filter_map(|course| match course.score {
            Some(score) if score != 0.0 => {
                Some((course.credit * grade_points(score), course.credit))
            }
            _ => None,
        })
        .fold((0.0, 0.0), |(p, c), (dp, dc)| (p + dp, c + dc));

    if credits == 0.0 {
        0.0
    } else {
        points / credits
    }
}
