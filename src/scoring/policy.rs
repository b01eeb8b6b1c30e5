use serde::{Deserialize, Serialize};

use crate::repository::QuestionNumber;

/// Marking policy for one subject.
///
/// Required questions are always scored; optional questions are scored
/// up to `optional_attempt_cap` attempts, taken in declaration order of
/// the `optional` list. The subject total is clamped to at most
/// `subject_score_cap` (upper bound only, no floor).
///
/// Example YAML:
/// ```yaml
/// subjects:
///   - name: Physics
///     required: [1, 2, 3, 4, 5]
///     optional: [6, 7, 8]
///     optional_attempt_cap: 2
///     correct_mark: 4
///     wrong_mark: -1
///     unattempted_mark: 0
///     subject_score_cap: 100
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubjectPolicy {
    pub name: String,

    /// Always-scored question numbers. Numbers absent from the dataset
    /// are skipped, so a policy may cover a superset of exam slots.
    pub required: Vec<QuestionNumber>,

    /// Optional question numbers, in the order the cap is applied.
    #[serde(default)]
    pub optional: Vec<QuestionNumber>,

    /// Maximum number of attempted optional questions that count.
    #[serde(default)]
    pub optional_attempt_cap: usize,

    pub correct_mark: i32,

    pub wrong_mark: i32,

    /// Mark for an unattempted required question (typically 0).
    #[serde(default)]
    pub unattempted_mark: i32,

    /// Upper bound on the subject total after both passes.
    pub subject_score_cap: i32,
}

/// The full policy set for one exam, in subject declaration order.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExamPolicies {
    pub subjects: Vec<SubjectPolicy>,
}

impl ExamPolicies {
    pub fn subject(&self, name: &str) -> Option<&SubjectPolicy> {
        self.subjects.iter().find(|s| s.name == name)
    }

    pub fn subject_names(&self) -> Vec<String> {
        self.subjects.iter().map(|s| s.name.clone()).collect()
    }
}

impl Default for ExamPolicies {
    /// The 90-question paper the tool was written for: three subjects of
    /// 20 required + 10 optional questions, at most 5 optional attempts
    /// counted, +4/-1/0 marks, 100 per subject.
    fn default() -> Self {
        let subject = |name: &str, base: QuestionNumber| SubjectPolicy {
            name: name.to_string(),
            required: (base..base + 20).collect(),
            optional: (base + 20..base + 30).collect(),
            optional_attempt_cap: 5,
            correct_mark: 4,
            wrong_mark: -1,
            unattempted_mark: 0,
            subject_score_cap: 100,
        };
        Self {
            subjects: vec![
                subject("Physics", 1),
                subject("Chemistry", 31),
                subject("Mathematics", 61),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let policies = ExamPolicies::default();

        assert_eq!(policies.subjects.len(), 3);
        assert_eq!(policies.subject_names(), vec!["Physics", "Chemistry", "Mathematics"]);

        let physics = policies.subject("Physics").unwrap();
        assert_eq!(physics.required, (1..=20).collect::<Vec<_>>());
        assert_eq!(physics.optional, (21..=30).collect::<Vec<_>>());
        assert_eq!(physics.optional_attempt_cap, 5);
        assert_eq!(physics.correct_mark, 4);
        assert_eq!(physics.wrong_mark, -1);
        assert_eq!(physics.unattempted_mark, 0);
        assert_eq!(physics.subject_score_cap, 100);

        let mathematics = policies.subject("Mathematics").unwrap();
        assert_eq!(mathematics.required[0], 61);
        assert_eq!(*mathematics.optional.last().unwrap(), 90);
    }

    #[test]
    fn test_unknown_subject_lookup() {
        let policies = ExamPolicies::default();
        assert!(policies.subject("Biology").is_none());
    }

    #[test]
    fn test_policies_serde_roundtrip() {
        let policies = ExamPolicies::default();
        let yaml = serde_saphyr::to_string(&policies).unwrap();
        let parsed: ExamPolicies = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(policies, parsed);
    }

    #[test]
    fn test_partial_policy_parse() {
        let yaml = r#"
subjects:
  - name: Physics
    required: [1, 2]
    correct_mark: 4
    wrong_mark: -1
    subject_score_cap: 8
"#;
        let policies: ExamPolicies = serde_saphyr::from_str(yaml).unwrap();
        let physics = &policies.subjects[0];
        assert_eq!(physics.required, vec![1, 2]);
        assert!(physics.optional.is_empty());
        assert_eq!(physics.optional_attempt_cap, 0);
        assert_eq!(physics.unattempted_mark, 0);
    }

    #[test]
    fn test_full_policy_parse() {
        let yaml = r#"
subjects:
  - name: Physics
    required: [1, 2]
    optional: [3, 4, 5]
    optional_attempt_cap: 2
    correct_mark: 4
    wrong_mark: -1
    unattempted_mark: 0
    subject_score_cap: 100
"#;
        let policies: ExamPolicies = serde_saphyr::from_str(yaml).unwrap();
        let physics = &policies.subjects[0];
        assert_eq!(physics.optional, vec![3, 4, 5]);
        assert_eq!(physics.optional_attempt_cap, 2);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
subjects:
  - name: Physics
    required: [1]
    correct_mark: 4
    wrong_mark: -1
    subject_score_cap: 4
    bonus_mark: 2
"#;
        assert!(serde_saphyr::from_str::<ExamPolicies>(yaml).is_err());
    }
}
