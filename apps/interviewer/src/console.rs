//! Line-oriented terminal front end for one interview, on `rustyline`
//! (history, `/command` completion and hints).
//!
//! Plain lines are routed to whatever the current step expects; lines
//! starting with `/` are commands.

use anyhow::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::info;

use crate::errors::{Notice, NoticeLevel};
use crate::interview::messages;
use crate::interview::models::{Role, Session, Step, TranscriptEntry};
use crate::interview::{Action, Interview, Outcome};
use crate::llm_client::GeminiClient;
use crate::questions::is_error_marker;

const HELP: &str = "Commands: /end (finish early), /reset (start over), /submit (send all answers), \
/answer N <text> (set or revise an answer), /models (list available models), /quit\n\
While answering questions, a line starting with an unrecognized /word is taken as the answer.";

const COMMANDS: &[&str] = &[
    "/end", "/reset", "/submit", "/answer", "/models", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    End,
    Reset,
    Submit,
    Answer { index: usize, text: String },
    Models,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Text(line.to_string());
    };

    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    match name.to_ascii_lowercase().as_str() {
        "end" => Command::End,
        "reset" => Command::Reset,
        "submit" => Command::Submit,
        "models" => Command::Models,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "answer" => {
            let args = args.trim_start();
            let (index, text) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            match index.parse() {
                Ok(index) => Command::Answer {
                    index,
                    text: text.trim().to_string(),
                },
                Err(_) => Command::Unknown(trimmed.to_string()),
            }
        }
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Commands that complete the `/word` typed so far.
fn command_completions(prefix: &str) -> Vec<&'static str> {
    if !prefix.starts_with('/') || prefix.contains(char::is_whitespace) {
        return Vec::new();
    }
    COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.starts_with(prefix))
        .collect()
}

/// Tab completion and inline hints for `/commands`.
struct CommandHelper;

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = command_completions(&line[..pos])
            .into_iter()
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let typed = &line[..pos];
        command_completions(typed)
            .into_iter()
            .find(|cmd| cmd.len() > typed.len())
            .map(|cmd| cmd[typed.len()..].to_string())
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

/// Maps free text to the action the current step expects.
/// `None` means there is nothing to do with text right now.
pub fn action_for_text(session: &Session, text: String) -> Option<Action> {
    match session.step() {
        Step::Greeting => Some(Action::Start),
        step if step.is_profile_field() => Some(Action::Input(text)),
        Step::AskTechStack => Some(Action::TechStack(text)),
        Step::TechnicalQuestions => session
            .next_unanswered()
            .map(|index| Action::Answer { index, text }),
        _ => None,
    }
}

/// An unrecognized `/word` line is still a valid answer while questions are open.
fn unknown_command_as_answer(session: &Session, line: &str) -> Option<Action> {
    if session.step() == Step::TechnicalQuestions {
        action_for_text(session, line.to_string())
    } else {
        None
    }
}

pub async fn run(mut interview: Interview, client: GeminiClient) -> Result<()> {
    println!("TalentScout AI Interviewer 🌟");
    println!("{HELP}\n");

    let mut rl: Editor<CommandHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CommandHelper));

    render(&interview.handle(Action::Start).await);

    loop {
        prompt(interview.session());
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("Ctrl-C detected. Type /quit to exit.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        let action = match parse_line(&line) {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                None
            }
            Command::Unknown(_) => {
                let answer = unknown_command_as_answer(interview.session(), &line);
                if answer.is_none() {
                    println!("{}", messages::FALLBACK);
                    println!("{HELP}");
                }
                answer
            }
            Command::Models => {
                list_models(&client).await;
                None
            }
            Command::End => Some(Action::EndEarly),
            Command::Reset => Some(Action::Reset),
            Command::Submit => Some(Action::SubmitAnswers),
            Command::Answer { index, text } => Some(Action::Answer { index, text }),
            Command::Text(text) => action_for_text(interview.session(), text),
        };

        if let Some(action) = action {
            let restart = action == Action::Reset;
            render(&interview.handle(action).await);
            if restart {
                render(&interview.handle(Action::Start).await);
            }
        }
    }

    info!("Console closed");
    Ok(())
}

async fn list_models(client: &GeminiClient) {
    match client.list_models().await {
        Ok(models) if models.is_empty() => {
            println!("⚠️ No models found. Check API key permissions.")
        }
        Ok(models) => {
            for m in models {
                println!("- {} ({})", m.name, m.supported_generation_methods.join(", "));
            }
        }
        Err(e) => println!("Error listing models: {e}"),
    }
}

fn render(outcome: &Outcome) {
    for entry in &outcome.appended {
        render_entry(entry);
    }
    if let Some(notice) = &outcome.notice {
        render_notice(notice);
    }
    if let Some(path) = &outcome.saved_to {
        info!("Candidate record written to {}", path.display());
    }
}

fn render_entry(entry: &TranscriptEntry) {
    // The candidate already sees what they typed; only synthesized
    // user entries (tech stack summary, consolidated answers) are echoed.
    match entry.role {
        Role::Assistant => println!("\n🤖 {}\n", entry.content),
        Role::User if entry.content.starts_with("Here are my answers")
            || entry.content.starts_with("My tech stack includes") =>
        {
            println!("\n🙂 {}\n", entry.content)
        }
        Role::User => {}
    }
}

fn render_notice(notice: &Notice) {
    let tag = match notice.level {
        NoticeLevel::Warning if is_error_marker(&notice.text) => "",
        NoticeLevel::Info => "ℹ️ ",
        NoticeLevel::Success => "",
        NoticeLevel::Warning => "⚠️ ",
        NoticeLevel::Error => "❌ ",
    };
    println!("{tag}{}", notice.text);
}

fn prompt(session: &Session) {
    match session.step() {
        Step::TechnicalQuestions => match session.next_unanswered() {
            Some(index) => {
                let question = &session.questions()[index - 1];
                println!("**Question {index}:** {question}");
            }
            None => println!(
                "✅ All questions answered. Type /submit to send them, or /answer N <text> to revise."
            ),
        },
        step => println!("{}", step.hint()),
    }
}
