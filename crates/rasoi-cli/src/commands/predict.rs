//! One-shot prediction: the same dialogue, answered from flags.

use anyhow::{Result, anyhow, bail};

use rasoi_core::RasoiError;
use rasoi_core::dialogue::{DialogueSession, FlowEngine, TurnOutput};
use rasoi_core::prediction::{PredictionPayload, render_prediction, render_prediction_error};

use super::{AppContext, chosen_option};

pub struct PredictInputs {
    pub dish: String,
    pub date: String,
    pub option: String,
    pub language: String,
}

pub async fn run(ctx: &AppContext, inputs: &PredictInputs, json: bool) -> Result<()> {
    let engine = ctx.flow_engine()?;
    let mut session = DialogueSession::chef_guru();

    let payload = answer_all(&engine, &mut session, inputs).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(payload.as_json())?);
    } else {
        println!("{}", render_prediction(&payload, chosen_option(session.values())));
    }
    Ok(())
}

/// Answers every collecting step, then confirms.
async fn answer_all(
    engine: &FlowEngine,
    session: &mut DialogueSession,
    inputs: &PredictInputs,
) -> Result<PredictionPayload> {
    let answers = [
        inputs.dish.as_str(),
        inputs.date.as_str(),
        inputs.option.as_str(),
        inputs.language.as_str(),
    ];

    for answer in answers {
        let turn = engine.submit(session, answer).await.map_err(|err| match err {
            RasoiError::Validation { slot, reason } => anyhow!("invalid {}: {}", slot, reason),
            other => other.into(),
        })?;
        if turn.is_terminal() {
            return finish(turn.output);
        }
    }

    let Some(confirm) = confirm_token(engine, session) else {
        bail!("the conversation asked for more than the given answers");
    };
    let turn = engine.submit(session, &confirm).await?;
    finish(turn.output)
}

/// Token of the confirmation step, when that is the step being asked.
fn confirm_token(engine: &FlowEngine, session: &DialogueSession) -> Option<String> {
    if !session.current_slot()?.is_confirmation() {
        return None;
    }
    engine
        .current_prompt(session)
        .ok()?
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.token)
}

fn finish(output: TurnOutput) -> Result<PredictionPayload> {
    match output {
        TurnOutput::Predicted(payload) => Ok(payload),
        TurnOutput::PredictionFailed(err) => bail!(render_prediction_error(&err)),
        TurnOutput::Prompt(prompt) => bail!("unexpected question: {}", prompt.text),
    }
}
