use serde::Serialize;

use super::policy::{ExamPolicies, SubjectPolicy};
use crate::error::{Result, ScoreError};
use crate::repository::{AnswerRepository, QuestionNumber, StudentId};

/// How one question was marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
    Unattempted,
    /// Attempted optional question beyond the attempt cap. Carries zero
    /// marks; recorded only so the detail view can show it.
    OverCap,
}

/// One question's contribution to a subject score.
#[derive(Debug, Clone)]
pub struct QuestionMark {
    pub number: QuestionNumber,
    pub verdict: Verdict,
    pub marks: i32,
}

/// A subject score with its per-question breakdown.
#[derive(Debug, Clone)]
pub struct SubjectScore {
    pub score: i32,
    /// True when the raw sum exceeded the subject cap.
    pub clamped: bool,
    pub marks: Vec<QuestionMark>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectTotal {
    pub subject: String,
    pub score: i32,
}

/// Per-subject and total score for one student.
#[derive(Debug, Clone, Serialize)]
pub struct TotalScore {
    pub student: StudentId,
    pub subjects: Vec<SubjectTotal>,
    pub total: i32,
}

/// Score one student on one subject.
///
/// Required pass: every required question present in the repository is
/// scored as correct / wrong / unattempted; numbers absent from the
/// repository are skipped without penalty. Optional pass: attempted
/// optional questions, in the policy's declaration order, are scored up
/// to the attempt cap; attempts beyond the cap are ignored. The sum is
/// then clamped to at most the subject cap. No lower bound is applied.
pub fn score_subject(
    repo: &AnswerRepository,
    policy: &SubjectPolicy,
    student: &str,
) -> Result<SubjectScore> {
    let responses = repo
        .responses_for(student)
        .ok_or_else(|| ScoreError::UnknownStudent(student.to_string()))?;

    let mut marks = Vec::new();
    let mut raw = 0i32;

    for &number in &policy.required {
        let Some(question) = repo.question(number) else {
            continue;
        };
        let answer = responses.answer(number);
        let (verdict, delta) = if !answer.is_attempted() {
            (Verdict::Unattempted, policy.unattempted_mark)
        } else if answer.matches(&question.correct_answer) {
            (Verdict::Correct, policy.correct_mark)
        } else {
            (Verdict::Wrong, policy.wrong_mark)
        };
        raw += delta;
        marks.push(QuestionMark { number, verdict, marks: delta });
    }

    let mut counted = 0usize;
    for &number in &policy.optional {
        let Some(question) = repo.question(number) else {
            continue;
        };
        let answer = responses.answer(number);
        if !answer.is_attempted() {
            continue;
        }
        let (verdict, delta) = if counted >= policy.optional_attempt_cap {
            (Verdict::OverCap, 0)
        } else if answer.matches(&question.correct_answer) {
            counted += 1;
            (Verdict::Correct, policy.correct_mark)
        } else {
            counted += 1;
            (Verdict::Wrong, policy.wrong_mark)
        };
        raw += delta;
        marks.push(QuestionMark { number, verdict, marks: delta });
    }

    Ok(SubjectScore {
        score: raw.min(policy.subject_score_cap),
        clamped: raw > policy.subject_score_cap,
        marks,
    })
}

/// Score one student across every declared subject, in declaration order.
pub fn score_total(
    repo: &AnswerRepository,
    policies: &ExamPolicies,
    student: &str,
) -> Result<TotalScore> {
    let mut subjects = Vec::with_capacity(policies.subjects.len());
    let mut total = 0i32;

    for policy in &policies.subjects {
        let subject_score = score_subject(repo, policy, student)?;
        total += subject_score.score;
        subjects.push(SubjectTotal {
            subject: policy.name.clone(),
            score: subject_score.score,
        });
    }

    Ok(TotalScore {
        student: student.to_string(),
        subjects,
        total,
    })
}
