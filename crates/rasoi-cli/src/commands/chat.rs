//! Interactive ChefGuru conversation.

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use rasoi_core::RasoiError;
use rasoi_core::dialogue::{DialogueSession, FlowEngine, TurnOutput};
use rasoi_core::prediction::{
    PredictionError, PredictionPayload, render_prediction, render_prediction_error,
};

use super::{AppContext, chosen_option, print_prompt};
use crate::helper::{CliHelper, HELP_COMMAND, NEW_COMMAND, RETRY_COMMAND};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Quit,
    New,
    Retry,
    Help,
    Unknown(String),
    /// Anything else goes to the engine as-is, including blank lines.
    Input(String),
}

impl ReplCommand {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "quit" | "exit" => Self::Quit,
            NEW_COMMAND => Self::New,
            RETRY_COMMAND => Self::Retry,
            HELP_COMMAND => Self::Help,
            command if command.starts_with('/') => Self::Unknown(command.to_string()),
            _ => Self::Input(line.to_string()),
        }
    }
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let t = ctx.translator();
    let engine = ctx.flow_engine()?;

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!(
        "{}",
        format!("=== {} - {} ===", t.t("app.name"), t.t("app.subtitle"))
            .bright_magenta()
            .bold()
    );
    println!("{}", t.t("chefguru.title").bright_white());
    println!("{}", usage().bright_black());
    println!();
    println!("{}", t.t("chefguru.greeting").bright_blue());

    let mut session = start_session(&engine)?;

    loop {
        sync_completions(&mut rl, &engine, &session);

        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match ReplCommand::parse(&line) {
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            ReplCommand::New => {
                println!();
                println!("{}", t.t("chefguru.greeting").bright_blue());
                session = start_session(&engine)?;
            }
            ReplCommand::Retry => retry(&engine, &session).await,
            ReplCommand::Help => println!("{}", usage().bright_black()),
            ReplCommand::Unknown(command) => {
                println!("{}", format!("Unknown command: {}", command).bright_black());
            }
            ReplCommand::Input(input) => {
                if session.is_terminal() {
                    println!(
                        "{}",
                        format!(
                            "This conversation is finished. Type '{}' to start again or '{}' to ask again.",
                            NEW_COMMAND, RETRY_COMMAND
                        )
                        .yellow()
                    );
                    continue;
                }
                submit(&engine, &mut session, &input).await?;
            }
        }
    }

    Ok(())
}

fn usage() -> String {
    format!(
        "Answer each question (Tab completes choices). '{}' asks again after a prediction, '{}' starts over, 'quit' exits.",
        RETRY_COMMAND, NEW_COMMAND
    )
}

fn start_session(engine: &FlowEngine) -> Result<DialogueSession> {
    let session = DialogueSession::chef_guru();
    tracing::debug!(session_id = %session.id(), "Session started");
    print_prompt(&engine.current_prompt(&session)?);
    Ok(session)
}

async fn submit(engine: &FlowEngine, session: &mut DialogueSession, input: &str) -> Result<()> {
    match engine.submit(session, input).await {
        Ok(turn) => {
            match turn.output {
                TurnOutput::Prompt(prompt) => print_prompt(&prompt),
                TurnOutput::Predicted(payload) => print_payload(session, &payload),
                TurnOutput::PredictionFailed(err) => print_failure(&err),
            }
            Ok(())
        }
        Err(RasoiError::Validation { reason, .. }) => {
            println!("{}", format!("⚠️ {}", reason).yellow());
            print_prompt(&engine.current_prompt(session)?);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn retry(engine: &FlowEngine, session: &DialogueSession) {
    if !session.is_terminal() {
        println!(
            "{}",
            "Nothing to retry yet; answer the remaining questions first.".yellow()
        );
        return;
    }

    match engine.invoker().invoke(session.values()).await {
        Ok(payload) => print_payload(session, &payload),
        Err(err) => print_failure(&err),
    }
}

fn print_payload(session: &DialogueSession, payload: &PredictionPayload) {
    println!();
    println!(
        "{}",
        render_prediction(payload, chosen_option(session.values())).bright_green()
    );
    println!();
    println!("{}", format!("Type '{}' for another dish.", NEW_COMMAND).bright_black());
}

fn print_failure(err: &PredictionError) {
    println!("{}", render_prediction_error(err).red());
    if err.is_retryable() {
        println!("{}", format!("Type '{}' to try again.", RETRY_COMMAND).bright_black());
    }
}

fn sync_completions(
    rl: &mut Editor<CliHelper, DefaultHistory>,
    engine: &FlowEngine,
    session: &DialogueSession,
) {
    let tokens: Vec<String> = match engine.current_prompt(session) {
        Ok(prompt) => prompt.choices.into_iter().map(|c| c.token).collect(),
        Err(_) => Vec::new(),
    };
    if let Some(helper) = rl.helper_mut() {
        helper.set_choices(tokens);
    }
}
