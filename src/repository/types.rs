use std::collections::{BTreeMap, HashMap};

pub type QuestionNumber = u32;
pub type StudentId = String;

/// A single cell of the response matrix (or of the answer key).
///
/// Two answers match only if both are attempted and the codes are
/// identical. "Unattempted" is a distinct state, never a wrong answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Attempted(String),
    Unattempted,
}

impl Answer {
    pub fn is_attempted(&self) -> bool {
        matches!(self, Answer::Attempted(_))
    }

    pub fn matches(&self, other: &Answer) -> bool {
        match (self, other) {
            (Answer::Attempted(a), Answer::Attempted(b)) => a == b,
            _ => false,
        }
    }
}

/// One row of the answer key. `number` is the natural key.
#[derive(Debug, Clone)]
pub struct Question {
    pub number: QuestionNumber,
    pub correct_answer: Answer,
    pub chapter: String,
}

/// One student's column of the response matrix.
///
/// Questions the student has no entry for read as unattempted.
#[derive(Debug, Clone, Default)]
pub struct StudentResponses {
    answers: BTreeMap<QuestionNumber, Answer>,
}

impl StudentResponses {
    pub fn answer(&self, number: QuestionNumber) -> &Answer {
        static UNATTEMPTED: Answer = Answer::Unattempted;
        self.answers.get(&number).unwrap_or(&UNATTEMPTED)
    }

    pub fn record(&mut self, number: QuestionNumber, answer: Answer) {
        self.answers.insert(number, answer);
    }
}

/// Read-only view over the answer key and the per-student response
/// matrix, indexed by question number.
///
/// Built once by a loader (or by hand in tests) and treated as an
/// immutable snapshot afterwards; every score is recomputed fresh from
/// it on each query.
#[derive(Debug, Clone, Default)]
pub struct AnswerRepository {
    questions: BTreeMap<QuestionNumber, Question>,
    responses: HashMap<StudentId, StudentResponses>,
    students: Vec<StudentId>,
}

impl AnswerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key row. Returns false if the question number was
    /// already present (the caller decides whether that is fatal).
    pub fn insert_question(&mut self, question: Question) -> bool {
        use std::collections::btree_map::Entry;
        match self.questions.entry(question.number) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(question);
                true
            }
        }
    }

    /// Register a student column, preserving dataset column order.
    /// Returns false on a duplicate identifier.
    pub fn add_student(&mut self, student: impl Into<StudentId>) -> bool {
        let student = student.into();
        if self.responses.contains_key(&student) {
            return false;
        }
        self.responses.insert(student.clone(), StudentResponses::default());
        self.students.push(student);
        true
    }

    /// Record one student's answer to one question. The student must
    /// have been registered with `add_student` first.
    pub fn record_answer(
        &mut self,
        student: &str,
        number: QuestionNumber,
        answer: Answer,
    ) -> bool {
        match self.responses.get_mut(student) {
            Some(responses) => {
                responses.record(number, answer);
                true
            }
            None => false,
        }
    }

    pub fn question(&self, number: QuestionNumber) -> Option<&Question> {
        self.questions.get(&number)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn responses_for(&self, student: &str) -> Option<&StudentResponses> {
        self.responses.get(student)
    }

    /// Candidate student identifiers, in dataset column order.
    pub fn list_students(&self) -> &[StudentId] {
        &self.students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempted(code: &str) -> Answer {
        Answer::Attempted(code.to_string())
    }

    #[test]
    fn test_answer_match_requires_both_attempted() {
        assert!(attempted("3").matches(&attempted("3")));
        assert!(!attempted("3").matches(&attempted("4")));
        assert!(!attempted("3").matches(&Answer::Unattempted));
        assert!(!Answer::Unattempted.matches(&Answer::Unattempted));
    }

    #[test]
    fn test_missing_entry_reads_as_unattempted() {
        let responses = StudentResponses::default();
        assert_eq!(*responses.answer(7), Answer::Unattempted);
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let mut repo = AnswerRepository::new();
        let q = Question {
            number: 1,
            correct_answer: attempted("2"),
            chapter: "Kinematics".to_string(),
        };
        assert!(repo.insert_question(q.clone()));
        assert!(!repo.insert_question(q));
        assert_eq!(repo.question_count(), 1);
    }

    #[test]
    fn test_student_order_preserved() {
        let mut repo = AnswerRepository::new();
        assert!(repo.add_student("s2"));
        assert!(repo.add_student("s1"));
        assert!(!repo.add_student("s2"));
        assert_eq!(repo.list_students(), &["s2".to_string(), "s1".to_string()]);
    }

    #[test]
    fn test_record_answer_requires_known_student() {
        let mut repo = AnswerRepository::new();
        assert!(!repo.record_answer("ghost", 1, attempted("1")));
        repo.add_student("s1");
        assert!(repo.record_answer("s1", 1, attempted("1")));
        let responses = repo.responses_for("s1").unwrap();
        assert_eq!(*responses.answer(1), attempted("1"));
    }
}
