use crate::core::FieldId;
use crate::core::flow::Flow;
use crate::core::form_record::FormRecord;
use crate::core::step::Step;
use crate::core::value::Value;
use crate::wizard::submit::SubmitAction;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome<T> {
    /// Moved forward; carries the id of the new current step.
    Advanced { step: String },
    /// Current step failed validation; nothing moved.
    Rejected { message: String },
    /// Terminal submit succeeded and the session was torn down.
    Completed(T),
    /// Terminal submit failed; the session stays open for another attempt.
    SubmitFailed { message: String },
    /// The session is closed and ignores navigation.
    Closed,
}

/// One open run of a wizard: the step cursor, the shared record and the
/// inline error. Dropping or closing it discards everything.
#[derive(Debug)]
pub struct WizardSession {
    name: String,
    flow: Flow,
    defaults: FormRecord,
    record: FormRecord,
    last_error: Option<String>,
    is_submitting: bool,
    is_open: bool,
}

impl WizardSession {
    pub fn new(name: impl Into<String>, flow: Flow, defaults: FormRecord) -> Self {
        Self {
            name: name.into(),
            flow,
            record: defaults.clone(),
            defaults,
            last_error: None,
            is_submitting: false,
            is_open: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn current_step(&self) -> &Step {
        self.flow.current_step()
    }

    pub fn current_step_id(&self) -> &str {
        self.flow.current_step().id.as_str()
    }

    pub fn current_index(&self) -> usize {
        self.flow.current_index()
    }

    pub fn is_last_step(&self) -> bool {
        self.flow.is_last()
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Input handler: stores the value and drops the inline error.
    pub fn set(&mut self, id: impl Into<FieldId>, value: impl Into<Value>) {
        self.record.set(id, value);
        self.last_error = None;
    }

    /// Structured edit of the record (row lists and the like).
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut FormRecord) -> R) -> R {
        self.last_error = None;
        f(&mut self.record)
    }

    pub fn next<S: SubmitAction>(&mut self, submit: &mut S) -> NextOutcome<S::Output> {
        if !self.is_open {
            return NextOutcome::Closed;
        }

        let result = self.flow.current_step().validate(&self.record);
        if let Some(message) = result.message() {
            debug!(
                wizard = %self.name,
                step = %self.current_step_id(),
                %message,
                "step rejected"
            );
            self.last_error = Some(message.to_string());
            return NextOutcome::Rejected {
                message: message.to_string(),
            };
        }

        if self.flow.advance() {
            self.last_error = None;
            let step = self.current_step_id().to_string();
            debug!(wizard = %self.name, %step, "advanced");
            return NextOutcome::Advanced { step };
        }

        self.run_submit(submit)
    }

    pub fn previous(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.last_error = None;
        let moved = self.flow.retreat();
        if moved {
            debug!(wizard = %self.name, step = %self.current_step_id(), "went back");
        }
        moved
    }

    /// Back to the first step with the initial defaults; stays open.
    pub fn reset(&mut self) {
        self.flow.reset();
        self.record.reset_to(&self.defaults);
        self.last_error = None;
        self.is_submitting = false;
    }

    pub fn cancel(&mut self) {
        self.reset();
        self.is_open = false;
        debug!(wizard = %self.name, "cancelled");
    }

    pub fn open(&mut self) {
        if !self.is_open {
            self.reset();
            self.is_open = true;
        }
    }

    fn run_submit<S: SubmitAction>(&mut self, submit: &mut S) -> NextOutcome<S::Output> {
        self.is_submitting = true;
        self.last_error = None;
        let result = submit.submit(&self.record);
        self.is_submitting = false;

        match result {
            Ok(output) => {
                self.flow.complete_current();
                info!(wizard = %self.name, "submitted");
                self.reset();
                self.is_open = false;
                NextOutcome::Completed(output)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(wizard = %self.name, error = %message, "submit failed");
                self.last_error = Some(message.clone());
                NextOutcome::SubmitFailed { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::step::Step;
    use crate::core::validation::ValidationResult;
    use crate::error::SubmitError;

    fn session(len: usize) -> WizardSession {
        let steps = (0..len)
            .map(|i| {
                let field = format!("f{i}");
                Step::builder(format!("s{i}"), format!("Step {i}"))
                    .require([field.as_str()], format!("fill f{i}"))
                    .build()
            })
            .collect();
        let flow = Flow::new(steps).expect("flow");
        WizardSession::new("test", flow, FormRecord::new().with("seed", "x"))
    }

    fn fill_all(session: &mut WizardSession, len: usize) {
        for i in 0..len {
            session.set(format!("f{i}"), "value");
        }
    }

    fn never(_: &FormRecord) -> Result<(), SubmitError> {
        panic!("submit must not run");
    }

    #[test]
    fn passing_step_advances_one_at_a_time() {
        for len in 2..6 {
            let mut s = session(len);
            fill_all(&mut s, len);
            for i in 0..len - 1 {
                assert_eq!(s.current_index(), i);
                let outcome = s.next(&mut never);
                assert_eq!(
                    outcome,
                    NextOutcome::Advanced {
                        step: format!("s{}", i + 1)
                    }
                );
            }
            assert!(s.is_last_step());
        }
    }

    #[test]
    fn last_step_submits_exactly_once() {
        let mut s = session(3);
        fill_all(&mut s, 3);
        s.next(&mut never);
        s.next(&mut never);

        let mut calls = 0;
        let mut submit = |record: &FormRecord| -> Result<String, SubmitError> {
            calls += 1;
            Ok(record.text_or_empty("f2"))
        };
        let outcome = s.next(&mut submit);

        assert_eq!(outcome, NextOutcome::Completed("value".to_string()));
        assert_eq!(calls, 1);
        assert!(!s.is_open());
        assert_eq!(s.current_index(), 0);
        assert!(s.record().is_empty("f0"));
        assert_eq!(s.next(&mut never), NextOutcome::Closed);
    }

    #[test]
    fn failing_step_keeps_position_and_sets_error() {
        let mut s = session(3);
        let outcome = s.next(&mut never);
        assert_eq!(
            outcome,
            NextOutcome::Rejected {
                message: "fill f0".to_string()
            }
        );
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.last_error(), Some("fill f0"));
    }

    #[test]
    fn previous_moves_back_and_clears_error_without_validating() {
        let mut s = session(3);
        s.set("f0", "value");
        s.next(&mut never);
        assert!(matches!(s.next(&mut never), NextOutcome::Rejected { .. }));
        assert!(s.last_error().is_some());

        assert!(s.previous());
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.last_error(), None);

        assert!(!s.previous());
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn submit_failure_keeps_session_open_for_retry() {
        let mut s = session(1);
        s.set("f0", "value");

        let mut failing = |_: &FormRecord| -> Result<(), SubmitError> {
            Err(SubmitError::Rejected("Server unavailable".into()))
        };
        assert_eq!(
            s.next(&mut failing),
            NextOutcome::SubmitFailed {
                message: "Server unavailable".into()
            }
        );
        assert!(s.is_open());
        assert!(!s.is_submitting());
        assert_eq!(s.last_error(), Some("Server unavailable"));
        assert_eq!(s.record().text("f0"), Some("value"));

        let mut ok = |_: &FormRecord| -> Result<u8, SubmitError> { Ok(1) };
        assert_eq!(s.next(&mut ok), NextOutcome::Completed(1));
    }

    #[test]
    fn reset_restores_defaults_and_first_step() {
        let mut s = session(3);
        fill_all(&mut s, 3);
        s.set("seed", "changed");
        s.next(&mut never);
        s.next(&mut never);

        s.reset();

        assert_eq!(s.current_index(), 0);
        assert_eq!(s.record(), &FormRecord::new().with("seed", "x"));
        assert!(s.is_open());
    }

    #[test]
    fn input_clears_inline_error() {
        let mut s = session(2);
        s.next(&mut never);
        assert!(s.last_error().is_some());
        s.set("f0", "v");
        assert_eq!(s.last_error(), None);
    }

    #[test]
    fn cancel_closes_and_open_starts_fresh() {
        let mut s = session(2);
        s.set("f0", "v");
        s.next(&mut never);
        s.cancel();
        assert!(!s.is_open());
        assert!(!s.previous());

        s.open();
        assert!(s.is_open());
        assert_eq!(s.current_index(), 0);
        assert!(s.record().is_empty("f0"));
    }

    #[test]
    fn validators_see_whole_record() {
        let step = Step::builder("hours", "Hours")
            .validate(|record| {
                if record.text("a") == record.text("b") {
                    ValidationResult::fail("must differ")
                } else {
                    ValidationResult::Pass
                }
            })
            .build();
        let flow = Flow::new(vec![step]).expect("flow");
        let mut s = WizardSession::new("t", flow, FormRecord::new());
        s.set("a", "1");
        s.set("b", "1");
        assert!(matches!(s.next(&mut never), NextOutcome::Rejected { .. }));
    }
}
