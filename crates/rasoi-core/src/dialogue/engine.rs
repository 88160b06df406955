//! Flow engine: validates one input at a time and advances a session.

use super::session::DialogueSession;
use super::slot::{Choice, InputKind, Slot};
use crate::error::{RasoiError, Result};
use crate::prediction::{PredictionError, PredictionPayload, TerminalActionInvoker};
use serde::Serialize;

/// A question to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub slot_id: String,
    pub text: String,
    /// Ordered `(label, token)` choices; empty for free-text slots.
    pub choices: Vec<Choice>,
}

impl Prompt {
    fn for_slot(slot: &Slot) -> Self {
        let choices = match slot.kind {
            InputKind::SingleChoice => slot.choices.clone(),
            InputKind::FreeText => Vec::new(),
        };
        Self {
            slot_id: slot.id.clone(),
            text: slot.prompt.clone(),
            choices,
        }
    }

    pub fn is_choice(&self) -> bool {
        !self.choices.is_empty()
    }
}

/// What the engine produced for one accepted input.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutput {
    /// The next slot to fill.
    Prompt(Prompt),
    /// The terminal action succeeded.
    Predicted(PredictionPayload),
    /// The terminal action failed; the session is still terminal.
    PredictionFailed(PredictionError),
}

/// One request/response unit. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub input: String,
    pub output: TurnOutput,
}

impl Turn {
    pub fn is_terminal(&self) -> bool {
        !matches!(self.output, TurnOutput::Prompt(_))
    }
}

/// Drives sessions through their step table.
///
/// Holds no per-session state; one engine can serve any number of sessions.
#[derive(Clone)]
pub struct FlowEngine {
    invoker: TerminalActionInvoker,
}

impl FlowEngine {
    pub fn new(invoker: TerminalActionInvoker) -> Self {
        Self { invoker }
    }

    pub fn invoker(&self) -> &TerminalActionInvoker {
        &self.invoker
    }

    /// Prompt of the step the session is waiting on.
    ///
    /// # Errors
    ///
    /// `SessionMisuse` when the session is already terminal.
    pub fn current_prompt(&self, session: &DialogueSession) -> Result<Prompt> {
        if session.is_terminal() {
            return Err(RasoiError::session_misuse(session.id()));
        }
        session
            .current_slot()
            .map(Prompt::for_slot)
            .ok_or_else(|| RasoiError::session_misuse(session.id()))
    }

    /// Applies one input to the session.
    ///
    /// On rejection the session is left untouched and a `Validation` error
    /// carries the reason. On acceptance the value is stored (except for
    /// confirmation slots) and the step advances; after the last step the
    /// terminal action runs once and its outcome is returned as data.
    ///
    /// The session is marked terminal before the outbound call is awaited, so
    /// a dropped future cannot leave a session that would fire a second call.
    ///
    /// # Errors
    ///
    /// - `Validation`: input rejected, same step
    /// - `SessionMisuse`: the session is already terminal; nothing changes
    pub async fn submit(&self, session: &mut DialogueSession, raw_input: &str) -> Result<Turn> {
        if session.is_terminal() {
            tracing::warn!(session_id = %session.id(), "submit on a completed session");
            return Err(RasoiError::session_misuse(session.id()));
        }

        let slot = session
            .current_slot()
            .ok_or_else(|| RasoiError::session_misuse(session.id()))?;

        if let Err(reason) = slot.check(raw_input) {
            tracing::debug!(
                session_id = %session.id(),
                slot = %slot.id,
                %reason,
                "Input rejected"
            );
            return Err(RasoiError::validation(slot.id.clone(), reason));
        }

        tracing::debug!(
            session_id = %session.id(),
            slot = %slot.id,
            step = session.step_index(),
            "Input accepted"
        );
        session.accept_current(raw_input);

        if let Some(next) = session.current_slot() {
            return Ok(Turn {
                input: raw_input.to_string(),
                output: TurnOutput::Prompt(Prompt::for_slot(next)),
            });
        }

        session.mark_terminal();
        tracing::info!(
            session_id = %session.id(),
            collected = session.values().len(),
            "All slots filled, invoking terminal action"
        );

        let output = match self.invoker.invoke(session.values()).await {
            Ok(payload) => TurnOutput::Predicted(payload),
            Err(err) => TurnOutput::PredictionFailed(err),
        };

        Ok(Turn {
            input: raw_input.to_string(),
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::slot_ids;
    use crate::prediction::{PredictionRequest, PredictionService};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct CountingService {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl PredictionService for CountingService {
        async fn predict(
            &self,
            request: &PredictionRequest,
        ) -> std::result::Result<PredictionPayload, PredictionError> {
            *self.calls.lock().unwrap() += 1;
            Ok(PredictionPayload::new(json!({ "dish_name": request.dish_name })))
        }
    }

    fn engine() -> (FlowEngine, Arc<CountingService>) {
        let service = Arc::new(CountingService::default());
        let engine = FlowEngine::new(TerminalActionInvoker::new(service.clone()));
        (engine, service)
    }

    #[tokio::test]
    async fn test_prompt_advances_with_choices() {
        let (engine, _) = engine();
        let mut session = DialogueSession::chef_guru();

        let first = engine.current_prompt(&session).unwrap();
        assert_eq!(first.slot_id, slot_ids::DISH_NAME);
        assert!(!first.is_choice());

        engine.submit(&mut session, "Pav Bhaji").await.unwrap();
        let turn = engine.submit(&mut session, "2025-10-20").await.unwrap();

        let TurnOutput::Prompt(prompt) = turn.output else {
            panic!("expected a prompt");
        };
        assert_eq!(prompt.slot_id, slot_ids::OPTION_TYPE);
        let tokens: Vec<&str> = prompt.choices.iter().map(|c| c.token.as_str()).collect();
        assert_eq!(tokens, vec!["topping", "addon", "both"]);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let (engine, _) = engine();
        let mut session = DialogueSession::chef_guru();

        let err = engine.submit(&mut session, "   ").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(session.step_index(), 0);
    }

    #[tokio::test]
    async fn test_confirmation_must_match_token() {
        let (engine, service) = engine();
        let mut session = DialogueSession::chef_guru();
        for input in ["Pav Bhaji", "2025-10-20", "topping", "english"] {
            engine.submit(&mut session, input).await.unwrap();
        }

        let err = engine.submit(&mut session, "Predict").await.unwrap_err();

        assert!(err.is_validation());
        assert!(!session.is_terminal());
        assert_eq!(*service.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_current_prompt_on_terminal_session_is_misuse() {
        let (engine, _) = engine();
        let mut session = DialogueSession::chef_guru();
        for input in ["Pav Bhaji", "2025-10-20", "topping", "english", "predict"] {
            engine.submit(&mut session, input).await.unwrap();
        }

        assert!(engine.current_prompt(&session).unwrap_err().is_session_misuse());
    }
}
