//! Cohort-level aggregation over the scoring engine.
//!
//! Everything here is a map/fold over `score_total` / `score_subject`;
//! no scoring rules live in this module.

use crate::error::{Result, ScoreError};
use crate::repository::{AnswerRepository, StudentId};
use crate::scoring::{score_subject, score_total, ExamPolicies, TotalScore};

/// Cohort-wide statistics over total scores.
#[derive(Debug, Clone)]
pub struct CohortSummary {
    pub count: usize,
    pub mean_total: f64,
    pub min_total: i32,
    pub max_total: i32,
    /// Mean subject score per declared subject, in declaration order.
    pub subject_means: Vec<(String, f64)>,
}

/// Score every student in the given order. Duplicate identifiers
/// produce duplicate records, not merged ones.
pub fn scores_for(
    repo: &AnswerRepository,
    policies: &ExamPolicies,
    students: &[StudentId],
) -> Result<Vec<TotalScore>> {
    students
        .iter()
        .map(|student| score_total(repo, policies, student))
        .collect()
}

/// Arithmetic mean of total scores over the cohort.
pub fn mean_total(
    repo: &AnswerRepository,
    policies: &ExamPolicies,
    students: &[StudentId],
) -> Result<f64> {
    if students.is_empty() {
        return Err(ScoreError::EmptyCohort);
    }
    let mut sum = 0i64;
    for student in students {
        sum += i64::from(score_total(repo, policies, student)?.total);
    }
    Ok(sum as f64 / students.len() as f64)
}

/// Arithmetic mean of one subject's score over the cohort.
pub fn mean_subject(
    repo: &AnswerRepository,
    policies: &ExamPolicies,
    subject: &str,
    students: &[StudentId],
) -> Result<f64> {
    if students.is_empty() {
        return Err(ScoreError::EmptyCohort);
    }
    let policy = policies
        .subject(subject)
        .ok_or_else(|| ScoreError::UnknownSubject(subject.to_string()))?;

    let mut sum = 0i64;
    for student in students {
        sum += i64::from(score_subject(repo, policy, student)?.score);
    }
    Ok(sum as f64 / students.len() as f64)
}

/// Count, mean, min and max of totals plus per-subject means.
pub fn summarize(
    repo: &AnswerRepository,
    policies: &ExamPolicies,
    students: &[StudentId],
) -> Result<CohortSummary> {
    let records = scores_for(repo, policies, students)?;
    if records.is_empty() {
        return Err(ScoreError::EmptyCohort);
    }

    let count = records.len();
    let sum: i64 = records.iter().map(|r| i64::from(r.total)).sum();
    let min_total = records.iter().map(|r| r.total).min().unwrap_or(0);
    let max_total = records.iter().map(|r| r.total).max().unwrap_or(0);

    let subject_means = policies
        .subjects
        .iter()
        .enumerate()
        .map(|(i, policy)| {
            let subject_sum: i64 = records
                .iter()
                .map(|r| i64::from(r.subjects[i].score))
                .sum();
            (policy.name.clone(), subject_sum as f64 / count as f64)
        })
        .collect();

    Ok(CohortSummary {
        count,
        mean_total: sum as f64 / count as f64,
        min_total,
        max_total,
        subject_means,
    })
}
