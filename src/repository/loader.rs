use anyhow::{bail, Context, Result};

use super::types::{Answer, AnswerRepository, Question};

/// How raw dataset cells are interpreted.
///
/// The dataset marks "no answer given" with a single sentinel value.
/// Blank cells are treated the same way. The sentinel must be applied
/// uniformly: the engine treats it as semantically distinct from a
/// wrong answer.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub sentinel: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sentinel: "0".to_string(),
        }
    }
}

impl LoadOptions {
    fn cell_to_answer(&self, cell: &str) -> Answer {
        let cell = cell.trim();
        if cell.is_empty() || cell == self.sentinel {
            Answer::Unattempted
        } else {
            Answer::Attempted(cell.to_string())
        }
    }
}

/// Parse the answer-key dataset into a repository snapshot.
///
/// Expected layout: a header row of `question_no, correct_answer_key
/// [, chapter]` followed by one column per student identifier, then one
/// data row per question number. The dataset is a plain comma-separated
/// matrix; quoted fields are not supported.
pub fn load_csv(text: &str, options: &LoadOptions) -> Result<AnswerRepository> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().context("dataset is empty")?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    if columns.len() < 2 || columns[1] != "correct_answer_key" {
        bail!("dataset header must start with 'question_no, correct_answer_key', got '{}'", header);
    }
    let has_chapter = columns.get(2) == Some(&"chapter");
    let student_start = if has_chapter { 3 } else { 2 };

    let students = &columns[student_start..];
    if students.is_empty() {
        bail!("dataset has no student columns after the metadata prefix");
    }

    let mut repo = AnswerRepository::new();
    for student in students {
        if !repo.add_student(*student) {
            bail!("duplicate student column: {}", student);
        }
    }

    for (row_index, line) in lines.enumerate() {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != columns.len() {
            bail!(
                "row {}: expected {} cells, got {}",
                row_index + 2,
                columns.len(),
                cells.len()
            );
        }

        let number = cells[0]
            .parse()
            .with_context(|| format!("row {}: invalid question number '{}'", row_index + 2, cells[0]))?;

        let correct_answer = options.cell_to_answer(cells[1]);
        if !correct_answer.is_attempted() {
            bail!("question {}: correct_answer_key is blank or equals the unattempted sentinel", number);
        }

        let chapter = if has_chapter { cells[2] } else { "" };
        let inserted = repo.insert_question(Question {
            number,
            correct_answer,
            chapter: chapter.to_string(),
        });
        if !inserted {
            bail!("duplicate question number: {}", number);
        }

        for (student, cell) in students.iter().zip(&cells[student_start..]) {
            let answer = options.cell_to_answer(cell);
            if answer.is_attempted() {
                repo.record_answer(student, number, answer);
            }
        }
    }

    if repo.question_count() == 0 {
        bail!("dataset has a header but no question rows");
    }

    Ok(repo)
}
