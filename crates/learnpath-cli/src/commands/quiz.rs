//! Diagnostic quiz commands.
//!
//! `take` drives a [`QuizSession`] from stdin, `score` evaluates a saved
//! answers file, `questions` dumps the active question bank.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use learnpath_core::{AnswerRecord, Config, QuestionBank, QuizResult, QuizSession, SessionState};

#[derive(Subcommand)]
pub enum QuizAction {
    /// Take the diagnostic quiz interactively
    Take {
        /// Question bank (JSON or TOML); defaults to the configured or built-in bank
        #[arg(long)]
        bank: Option<PathBuf>,
        /// Print the result as JSON on stdout (prompts go to stderr)
        #[arg(long)]
        json: bool,
    },
    /// Score a JSON answers file ({"0": "option", ...})
    Score {
        /// Answers file
        #[arg(long)]
        answers: PathBuf,
        /// Question bank (JSON or TOML)
        #[arg(long)]
        bank: Option<PathBuf>,
    },
    /// Print the question bank as JSON
    Questions {
        /// Question bank (JSON or TOML)
        #[arg(long)]
        bank: Option<PathBuf>,
    },
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        QuizAction::Take { bank, json } => {
            let bank = load_bank(bank.as_deref(), &config)?;
            let mut session = QuizSession::with_thresholds(bank, config.thresholds()?);

            let stdin = io::stdin();
            if json {
                take(&mut session, stdin.lock(), io::stderr(), config.quiz.show_progress)?;
            } else {
                take(&mut session, stdin.lock(), io::stdout(), config.quiz.show_progress)?;
            }

            match session.result() {
                Some(result) if json => println!("{}", serde_json::to_string_pretty(result)?),
                Some(result) => print_result(result),
                None => println!("Quiz skipped; no results recorded."),
            }
        }
        QuizAction::Score { answers, bank } => {
            let bank = load_bank(bank.as_deref(), &config)?;
            let answers: AnswerRecord = serde_json::from_str(&std::fs::read_to_string(&answers)?)?;
            warn_unknown_options(&bank, &answers);
            let result = bank.evaluate(&answers, &config.thresholds()?)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        QuizAction::Questions { bank } => {
            let bank = load_bank(bank.as_deref(), &config)?;
            println!("{}", bank.to_json_pretty()?);
        }
    }
    Ok(())
}

fn load_bank(path: Option<&Path>, config: &Config) -> Result<QuestionBank, Box<dyn std::error::Error>> {
    let configured = config.quiz.question_bank.as_deref().map(Path::new);
    match path.or(configured) {
        Some(path) => Ok(QuestionBank::load(path)?),
        None => Ok(QuestionBank::diagnostic()),
    }
}

/// Warn about answers that are not among a question's options; they score
/// as incorrect. Answers past the last question are left to `evaluate`.
fn warn_unknown_options(bank: &QuestionBank, answers: &AnswerRecord) -> usize {
    let mut unknown = 0;
    for (index, option) in answers.iter() {
        if let Some(question) = bank.get(index).filter(|q| !q.has_option(option)) {
            tracing::warn!(index, option, question = question.id(), "answer is not one of the options");
            unknown += 1;
        }
    }
    unknown
}

/// Run the interactive loop until the session completes or is skipped.
///
/// Input per line: an option number selects it and moves on, `n` moves on
/// with the current selection, `p` goes back, `s` skips the quiz. End of
/// input skips the quiz.
fn take<R: BufRead, W: Write>(
    session: &mut QuizSession,
    mut input: R,
    mut out: W,
    show_progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut line = String::new();

    while !session.is_finished() {
        render_question(session, &mut out, show_progress)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            log_event(session.skip()?);
            break;
        }

        let event = match line.trim() {
            "s" | "skip" => session.skip()?,
            "p" | "prev" => session.go_previous()?,
            "n" | "next" => {
                if session.selected().is_empty() {
                    writeln!(out, "Select an answer first.")?;
                }
                session.go_next()?
            }
            choice => match choice.parse::<usize>() {
                Ok(n) if (1..=session.current_question().options().len()).contains(&n) => {
                    let option = session.current_question().options()[n - 1].clone();
                    log_event(session.select_answer(&option)?);
                    session.go_next()?
                }
                _ => {
                    writeln!(out, "Enter an option number, or n/p/s.")?;
                    None
                }
            },
        };
        log_event(event);
    }

    if session.state() == SessionState::Complete {
        writeln!(out, "Quiz complete! Analyzing your results...")?;
    }
    Ok(())
}

fn render_question<W: Write>(session: &QuizSession, out: &mut W, show_progress: bool) -> io::Result<()> {
    let question = session.current_question();
    writeln!(out)?;
    if show_progress {
        writeln!(
            out,
            "Question {} of {} ({:.0}%)",
            session.current_index() + 1,
            session.bank().len(),
            session.progress_pct()
        )?;
    }
    writeln!(out, "[{}] {}", question.category(), question.prompt())?;
    for (i, option) in question.options().iter().enumerate() {
        let marker = if session.selected() == option { "*" } else { " " };
        writeln!(out, " {marker}{}. {option}", i + 1)?;
    }
    write!(out, "> ")?;
    out.flush()
}

fn log_event(event: Option<learnpath_core::QuizEvent>) {
    if let Some(event) = event {
        tracing::debug!(?event, "quiz event");
    }
}

fn print_result(result: &QuizResult) {
    println!("Score: {}%", result.score);
    if !result.weak_areas.is_empty() {
        println!("Weak areas: {}", result.weak_areas.join(", "));
    }
    if !result.strong_areas.is_empty() {
        println!("Strong areas: {}", result.strong_areas.join(", "));
    }
    for line in &result.recommendations {
        println!("- {line}");
    }
}
