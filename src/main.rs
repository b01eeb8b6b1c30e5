use clap::{Parser, Subcommand};
use std::path::PathBuf;

const EXIT_SUCCESS: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all students ranked by total score (default if no subcommand)
    List {
        /// Output tab-separated values for scripting
        #[arg(long)]
        tsv: bool,

        /// Output JSON records
        #[arg(long)]
        json: bool,
    },
    /// Show one student's per-question breakdown
    Student {
        /// Student identifier (a dataset column)
        id: String,
    },
    /// Show cohort statistics (mean, min, max per subject and total)
    Summary,
    /// Write the default scoring policy to the config path
    Init {
        /// Overwrite an existing policy file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "marksheet")]
#[command(about = "Exam score calculator with required and capped optional question groups", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to policy file (defaults to ~/.config/marksheet/policy.yaml)
    #[arg(short, long, global = true)]
    policy: Option<String>,

    /// Path to the answer-key dataset CSV
    #[arg(short, long, global = true)]
    dataset: Option<String>,

    /// URL of a published answer-key dataset CSV
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Cell value marking an unattempted answer (default "0")
    #[arg(long, global = true)]
    sentinel: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List {
        tsv: false,
        json: false,
    });

    // Init needs no dataset; handle it before anything else
    if let Commands::Init { force } = command {
        let path = cli.policy.map(PathBuf::from);
        match marksheet::config::write_default_policy(path, force) {
            Ok(written) => {
                println!("Wrote default policy to {}", written.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Init error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load scoring policies
    let policy_path = cli.policy.map(PathBuf::from);
    let policies = match marksheet::config::load_policies(policy_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Policy error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate policies at startup
    if let Err(errors) = marksheet::scoring::validate_policies(&policies) {
        eprintln!("Policy errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!("Loaded {} subject policies", policies.subjects.len());
        for subject in &policies.subjects {
            eprintln!(
                "  {}: {} required, {} optional (cap {})",
                subject.name,
                subject.required.len(),
                subject.optional.len(),
                subject.optional_attempt_cap
            );
        }
    }

    // Acquire the dataset: exactly one of --dataset or --url
    let text = match (&cli.dataset, &cli.url) {
        (Some(path), None) => match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Failed to read dataset {}: {}", path, e);
                std::process::exit(EXIT_DATA);
            }
        },
        (None, Some(url)) => match marksheet::fetch::fetch_dataset(url).await {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Fetch error: {}", e);
                std::process::exit(EXIT_DATA);
            }
        },
        _ => {
            eprintln!("Provide exactly one of --dataset <file> or --url <url>.");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let mut options = marksheet::repository::LoadOptions::default();
    if let Some(sentinel) = cli.sentinel {
        options.sentinel = sentinel;
    }

    let repo = match marksheet::repository::load_csv(&text, &options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Dataset error: {}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} questions, {} students",
            repo.question_count(),
            repo.list_students().len()
        );
    }

    let use_colors = marksheet::output::should_use_colors();

    match command {
        Commands::List { tsv, json } => {
            let students = repo.list_students().to_vec();
            let mut records = match marksheet::cohort::scores_for(&repo, &policies, &students) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Scoring error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            // Rank by total descending, student id ascending on ties
            records.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.student.cmp(&b.student)));

            if json {
                match serde_json::to_string_pretty(&records) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("JSON error: {}", e);
                        std::process::exit(EXIT_DATA);
                    }
                }
            } else if tsv {
                let out = marksheet::output::format_tsv(&records);
                if !out.is_empty() {
                    println!("{}", out);
                }
            } else {
                println!("{}", marksheet::output::format_score_table(&records, use_colors));
            }
        }
        Commands::Student { id } => {
            let record = match marksheet::scoring::score_total(&repo, &policies, &id) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_USAGE);
                }
            };

            let mut breakdowns = Vec::with_capacity(policies.subjects.len());
            for subject in &policies.subjects {
                match marksheet::scoring::score_subject(&repo, subject, &id) {
                    Ok(score) => breakdowns.push((subject.name.clone(), score)),
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(EXIT_USAGE);
                    }
                }
            }

            println!(
                "{}",
                marksheet::output::format_student_detail(&record, &breakdowns, &repo, use_colors)
            );
        }
        Commands::Summary => {
            let students = repo.list_students().to_vec();
            match marksheet::cohort::summarize(&repo, &policies, &students) {
                Ok(summary) => {
                    println!("{}", marksheet::output::format_summary(&summary, use_colors));
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_DATA);
                }
            }
        }
        Commands::Init { .. } => unreachable!("handled above"),
    }

    std::process::exit(EXIT_SUCCESS);
}
