use std::collections::HashSet;

use super::policy::{ExamPolicies, SubjectPolicy};
use crate::error::ScoreError;
use crate::repository::QuestionNumber;

/// Validate the policy set at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_policies(policies: &ExamPolicies) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_names = HashSet::new();

    for (i, subject) in policies.subjects.iter().enumerate() {
        if subject.name.trim().is_empty() {
            errors.push(format!("subjects[{}].name: must not be empty", i));
        } else if !seen_names.insert(subject.name.as_str()) {
            errors.push(format!("subjects[{}].name: duplicate subject '{}'", i, subject.name));
        }

        check_duplicates(&subject.required, &format!("subjects[{}].required", i), &mut errors);
        check_duplicates(&subject.optional, &format!("subjects[{}].optional", i), &mut errors);
        check_overlap(subject, i, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `validate_policies` folded into a single typed error, for callers
/// that don't print violations individually.
pub fn ensure_valid(policies: &ExamPolicies) -> Result<(), ScoreError> {
    validate_policies(policies).map_err(|errors| ScoreError::InvalidPolicy(errors.join("; ")))
}

fn check_duplicates(numbers: &[QuestionNumber], field: &str, errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for &number in numbers {
        if !seen.insert(number) {
            errors.push(format!("{}: duplicate question {}", field, number));
        }
    }
}

fn check_overlap(subject: &SubjectPolicy, index: usize, errors: &mut Vec<String>) {
    let required: HashSet<QuestionNumber> = subject.required.iter().copied().collect();
    let mut overlap: Vec<QuestionNumber> = subject
        .optional
        .iter()
        .copied()
        .filter(|n| required.contains(n))
        .collect();
    overlap.sort_unstable();
    overlap.dedup();
    if !overlap.is_empty() {
        errors.push(format!(
            "subjects[{}]: required and optional sets overlap: {:?}",
            index, overlap
        ));
    }
}
