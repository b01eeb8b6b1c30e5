use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::cohort::CohortSummary;
use crate::repository::AnswerRepository;
use crate::scoring::{SubjectScore, TotalScore, Verdict};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a chapter label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format score records as a ranked table.
/// Columns: index, total, one column per subject, student id.
/// Index column: 3 chars (fits "99."), right-aligned.
pub fn format_score_table(records: &[TotalScore], use_colors: bool) -> String {
    if records.is_empty() {
        return "No students found.".to_string();
    }

    // Subject columns sized to max(header, score) width
    let subject_widths: Vec<usize> = records[0]
        .subjects
        .iter()
        .map(|s| s.subject.chars().count().max(5))
        .collect();

    let header = {
        let subjects = records[0]
            .subjects
            .iter()
            .zip(&subject_widths)
            .map(|(s, w)| format!("{:>width$}", s.subject, width = *w))
            .collect::<Vec<_>>()
            .join("  ");
        let line = format!("{:>3} {:>7}  {}  Student", "#", "Total", subjects);
        if use_colors {
            line.dimmed().to_string()
        } else {
            line
        }
    };

    let rows = records.iter().enumerate().map(|(idx, record)| {
        let index_str = format!("{:>2}.", idx + 1);
        let total_padded = format!("{:>7}", record.total);
        let subjects = record
            .subjects
            .iter()
            .zip(&subject_widths)
            .map(|(s, w)| format!("{:>width$}", s.score, width = *w))
            .collect::<Vec<_>>()
            .join("  ");

        if use_colors {
            format!(
                "{} {}  {}  {}",
                index_str.dimmed(),
                total_padded.bold(),
                subjects,
                record.student.cyan()
            )
        } else {
            format!("{} {}  {}  {}", index_str, total_padded, subjects, record.student)
        }
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format records as tab-separated values for scripting.
/// Columns: student, total, one per subject (no headers, no colors).
pub fn format_tsv(records: &[TotalScore]) -> String {
    if records.is_empty() {
        return String::new();
    }

    records
        .iter()
        .map(|record| {
            let mut cells = vec![record.student.clone(), record.total.to_string()];
            cells.extend(record.subjects.iter().map(|s| s.score.to_string()));
            cells.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "correct",
        Verdict::Wrong => "wrong",
        Verdict::Unattempted => "unattempted",
        Verdict::OverCap => "over cap",
    }
}

/// Format one student's full per-question breakdown (for `student <id>`)
pub fn format_student_detail(
    record: &TotalScore,
    breakdowns: &[(String, SubjectScore)],
    repo: &AnswerRepository,
    use_colors: bool,
) -> String {
    let term_width = get_terminal_width();
    let mut lines = Vec::new();

    if use_colors {
        lines.push(format!("{}  total {}", record.student.bold(), record.total.bold()));
    } else {
        lines.push(format!("{}  total {}", record.student, record.total));
    }

    for (subject, score) in breakdowns {
        let cap_note = if score.clamped { " (capped)" } else { "" };
        if use_colors {
            lines.push(format!("{}: {}{}", subject.cyan(), score.score, cap_note));
        } else {
            lines.push(format!("{}: {}{}", subject, score.score, cap_note));
        }

        for mark in &score.marks {
            let chapter = repo
                .question(mark.number)
                .map(|q| q.chapter.as_str())
                .unwrap_or("");
            // "  Q07  unattempted   +0  " = 24 fixed chars before chapter
            let chapter = match term_width {
                Some(width) if width > 34 => truncate_label(chapter, width - 24),
                Some(_) => truncate_label(chapter, 10),
                None => chapter.to_string(),
            };

            let label = verdict_label(mark.verdict);
            let line = format!("  Q{:02}  {:<11}  {:>+3}  {}", mark.number, label, mark.marks, chapter);
            if use_colors {
                match mark.verdict {
                    Verdict::Correct => lines.push(line.green().to_string()),
                    Verdict::Wrong => lines.push(line.red().to_string()),
                    _ => lines.push(line.dimmed().to_string()),
                }
            } else {
                lines.push(line);
            }
        }
    }

    lines.join("\n")
}

/// Format cohort statistics (for `summary`)
pub fn format_summary(summary: &CohortSummary, use_colors: bool) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Students: {}", summary.count));
    let mean_line = format!("Mean total: {:.2}", summary.mean_total);
    if use_colors {
        lines.push(mean_line.bold().to_string());
    } else {
        lines.push(mean_line);
    }
    lines.push(format!("Min total: {}", summary.min_total));
    lines.push(format!("Max total: {}", summary.max_total));

    for (subject, mean) in &summary.subject_means {
        if use_colors {
            lines.push(format!("  {} mean: {:.2}", subject.cyan(), mean));
        } else {
            lines.push(format!("  {} mean: {:.2}", subject, mean));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{QuestionMark, SubjectTotal};

    fn sample_record(student: &str, physics: i32, chemistry: i32) -> TotalScore {
        TotalScore {
            student: student.to_string(),
            subjects: vec![
                SubjectTotal {
                    subject: "Physics".to_string(),
                    score: physics,
                },
                SubjectTotal {
                    subject: "Chemistry".to_string(),
                    score: chemistry,
                },
            ],
            total: physics + chemistry,
        }
    }

    #[test]
    fn test_format_score_table_empty() {
        let result = format_score_table(&[], false);
        assert_eq!(result, "No students found.");
    }

    #[test]
    fn test_format_score_table_rows() {
        let records = vec![sample_record("s01", 95, 88), sample_record("s02", 40, 52)];
        let result = format_score_table(&records, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Physics"));
        assert!(lines[0].contains("Chemistry"));
        assert!(lines[0].contains("Student"));
        assert!(lines[1].contains(" 1."));
        assert!(lines[1].contains("183"));
        assert!(lines[1].contains("s01"));
        assert!(lines[2].contains(" 2."));
        assert!(lines[2].contains("92"));
        assert!(lines[2].contains("s02"));
    }

    #[test]
    fn test_format_tsv() {
        let records = vec![sample_record("s01", 95, 88)];
        let result = format_tsv(&records);
        assert_eq!(result, "s01\t183\t95\t88");
    }

    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_student_detail() {
        let record = sample_record("s01", 3, 0);
        let breakdowns = vec![(
            "Physics".to_string(),
            SubjectScore {
                score: 3,
                clamped: false,
                marks: vec![
                    QuestionMark {
                        number: 1,
                        verdict: Verdict::Correct,
                        marks: 4,
                    },
                    QuestionMark {
                        number: 2,
                        verdict: Verdict::Wrong,
                        marks: -1,
                    },
                    QuestionMark {
                        number: 3,
                        verdict: Verdict::OverCap,
                        marks: 0,
                    },
                ],
            },
        )];
        let repo = AnswerRepository::new();
        let result = format_student_detail(&record, &breakdowns, &repo, false);
        assert!(result.contains("s01  total 3"));
        assert!(result.contains("Physics: 3"));
        assert!(result.contains("Q01  correct"));
        assert!(result.contains("+4"));
        assert!(result.contains("Q02  wrong"));
        assert!(result.contains(" -1"));
        assert!(result.contains("Q03  over cap"));
    }

    #[test]
    fn test_format_student_detail_capped_marker() {
        let record = sample_record("s01", 100, 0);
        let breakdowns = vec![(
            "Physics".to_string(),
            SubjectScore {
                score: 100,
                clamped: true,
                marks: vec![],
            },
        )];
        let repo = AnswerRepository::new();
        let result = format_student_detail(&record, &breakdowns, &repo, false);
        assert!(result.contains("Physics: 100 (capped)"));
    }

    #[test]
    fn test_format_summary() {
        let summary = CohortSummary {
            count: 2,
            mean_total: 5.5,
            min_total: 3,
            max_total: 8,
            subject_means: vec![("Physics".to_string(), 5.5)],
        };
        let result = format_summary(&summary, false);
        assert!(result.contains("Students: 2"));
        assert!(result.contains("Mean total: 5.50"));
        assert!(result.contains("Min total: 3"));
        assert!(result.contains("Max total: 8"));
        assert!(result.contains("Physics mean: 5.50"));
    }

    #[test]
    fn test_truncate_label_short() {
        assert_eq!(truncate_label("Optics", 20), "Optics");
    }

    #[test]
    fn test_truncate_label_long() {
        assert_eq!(truncate_label("Electromagnetic Induction", 15), "Electromagne...");
    }

    #[test]
    fn test_truncate_label_very_narrow() {
        assert_eq!(truncate_label("Optics", 3), "Opt");
    }
}
