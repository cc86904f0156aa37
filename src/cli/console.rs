//! Line-mode driver for the wizards. Generic over the reader and writer so
//! whole sessions can be scripted.

use crate::backend::{Backend, OtpChannel};
use crate::cli::render::Theme;
use crate::core::FieldId;
use crate::core::field::{FieldKind, FieldSpec, RowsSpec};
use crate::core::form_record::FormRecord;
use crate::core::value::Value;
use crate::flows::password_reset::{
    self, PasswordReset, ResetMethod, ResetOutcome, ResetState,
};
use crate::wizard::{NextOutcome, SubmitAction, WizardSession};
use std::io::{self, BufRead, Write};
use std::time::Instant;

const WIZARD_HINT: &str =
    "Enter keeps the current value, '-' clears it, ':back' goes to the previous step, ':cancel' quits.";

enum Reply {
    Line(String),
    Back,
    Cancel,
}

enum Control {
    Continue,
    Back,
    Cancel,
}

pub struct Console<R, W> {
    input: R,
    output: W,
    theme: Theme,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            theme,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn hint(&mut self, text: &str) -> io::Result<()> {
        let painted = self.theme.paint(self.theme.hint, text);
        writeln!(self.output, "{painted}")
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        let painted = self.theme.paint(self.theme.error, text);
        writeln!(self.output, "{painted}")
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        let painted = self.theme.paint(self.theme.success, text);
        writeln!(self.output, "{painted}")
    }

    fn heading(&mut self, text: &str) -> io::Result<()> {
        let painted = self.theme.paint(self.theme.heading, text);
        writeln!(self.output, "{painted}")
    }

    /// End of input counts as cancel.
    fn ask(&mut self, prompt: &str, current: &str) -> io::Result<Reply> {
        let shown = if current.is_empty() {
            format!("{prompt}: ")
        } else {
            format!("{prompt} [{current}]: ")
        };
        write!(self.output, "{}", self.theme.paint(self.theme.prompt, &shown))?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(Reply::Cancel);
        }
        let text = buf.trim_end_matches(['\r', '\n']);
        Ok(match text.trim() {
            ":back" => Reply::Back,
            ":cancel" | ":q" => Reply::Cancel,
            _ => Reply::Line(text.to_string()),
        })
    }

    /// Drives `session` until it completes or the user quits. `None` means
    /// cancelled; the session is closed either way.
    pub fn run_wizard<S: SubmitAction>(
        &mut self,
        session: &mut WizardSession,
        submit: &mut S,
    ) -> io::Result<Option<S::Output>> {
        self.hint(WIZARD_HINT)?;
        while session.is_open() {
            let step = session.current_step();
            let header = format!(
                "[{}/{}] {}",
                session.current_index() + 1,
                session.flow().len(),
                step.title
            );
            let description = step.description.clone();
            let fields = step.fields.clone();

            self.line("")?;
            self.heading(&header)?;
            if let Some(description) = description {
                self.hint(&description)?;
            }

            let mut control = Control::Continue;
            for field in &fields {
                control = self.fill_field(session, field)?;
                if !matches!(control, Control::Continue) {
                    break;
                }
            }

            match control {
                Control::Continue => {}
                Control::Back => {
                    if !session.previous() {
                        self.hint("Already at the first step.")?;
                    }
                    continue;
                }
                Control::Cancel => {
                    session.cancel();
                    self.hint("Cancelled.")?;
                    return Ok(None);
                }
            }

            match session.next(submit) {
                NextOutcome::Advanced { .. } => {}
                NextOutcome::Rejected { message } | NextOutcome::SubmitFailed { message } => {
                    self.error(&message)?;
                }
                NextOutcome::Completed(output) => return Ok(Some(output)),
                NextOutcome::Closed => return Ok(None),
            }
        }
        Ok(None)
    }

    fn fill_field(&mut self, session: &mut WizardSession, field: &FieldSpec) -> io::Result<Control> {
        if let FieldKind::Rows(spec) = &field.kind {
            return self.fill_rows(session, field, spec);
        }
        loop {
            let current = shown_value(field, session.record());
            match self.ask(&field_prompt(field), &current)? {
                Reply::Back => return Ok(Control::Back),
                Reply::Cancel => return Ok(Control::Cancel),
                Reply::Line(text) if text.trim().is_empty() => return Ok(Control::Continue),
                Reply::Line(text) => match parse_input(&field.kind, &text) {
                    Ok(value) => {
                        session.set(field.id.clone(), value);
                        return Ok(Control::Continue);
                    }
                    Err(message) => self.error(&message)?,
                },
            }
        }
    }

    fn fill_rows(
        &mut self,
        session: &mut WizardSession,
        field: &FieldSpec,
        spec: &RowsSpec,
    ) -> io::Result<Control> {
        let id = field.id.clone();
        loop {
            let rows = session.record().rows(id.as_str()).to_vec();
            self.line(&format!("{}:", field.label))?;
            for (idx, row) in rows.iter().enumerate() {
                self.line(&format!("  {}. {}", idx + 1, describe_row(row, &spec.fields)))?;
            }

            let text = match self.ask("add | edit N | remove N | done", "")? {
                Reply::Back => return Ok(Control::Back),
                Reply::Cancel => return Ok(Control::Cancel),
                Reply::Line(text) => text,
            };
            let mut parts = text.split_whitespace();
            let command = parts.next().unwrap_or("done");
            let index = parts
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| (1..=rows.len()).contains(n))
                .map(|n| n - 1);

            match (command, index) {
                ("done", _) => return Ok(Control::Continue),
                ("add", _) => {
                    let template = spec.template.clone();
                    session.edit(|record| record.rows_mut(id.as_str()).push(template));
                }
                ("remove", Some(idx)) => {
                    if rows.len() <= spec.min_rows {
                        self.error(&format!("Keep at least {} row(s)", spec.min_rows))?;
                    } else {
                        session.edit(|record| {
                            record.rows_mut(id.as_str()).remove(idx);
                        });
                    }
                }
                ("edit", Some(idx)) => {
                    if let Control::Cancel = self.edit_row(session, &id, idx, &spec.fields)? {
                        return Ok(Control::Cancel);
                    }
                }
                _ => self.error("Unknown command or row number")?,
            }
        }
    }

    /// `:back` stops editing the row and returns to the row menu.
    fn edit_row(
        &mut self,
        session: &mut WizardSession,
        id: &FieldId,
        idx: usize,
        fields: &[FieldSpec],
    ) -> io::Result<Control> {
        for sub in fields {
            loop {
                let row = session
                    .record()
                    .rows(id.as_str())
                    .get(idx)
                    .cloned()
                    .unwrap_or_default();
                let current = shown_value(sub, &row);
                let text = match self.ask(&format!("  {}", field_prompt(sub)), &current)? {
                    Reply::Back => return Ok(Control::Back),
                    Reply::Cancel => return Ok(Control::Cancel),
                    Reply::Line(text) if text.trim().is_empty() => break,
                    Reply::Line(text) => text,
                };
                match parse_input(&sub.kind, &text) {
                    Ok(value) => {
                        session.edit(|record| {
                            if let Some(row) = record.rows_mut(id.as_str()).get_mut(idx) {
                                row.set(sub.id.clone(), value);
                            }
                        });
                        break;
                    }
                    Err(message) => self.error(&message)?,
                }
            }
        }
        Ok(Control::Continue)
    }

    /// Walks the reset flow to its end. `code_hint` looks up the code a
    /// channel was sent, for backends without a real mailbox. Returns
    /// whether the flow reached success.
    pub fn run_password_reset<B, H>(
        &mut self,
        flow: &mut PasswordReset,
        backend: &mut B,
        code_hint: H,
    ) -> io::Result<bool>
    where
        B: Backend + ?Sized,
        H: Fn(&B, &OtpChannel) -> Option<String>,
    {
        let mut clock = Instant::now();
        while flow.is_open() {
            flow.elapse(clock.elapsed());
            clock = Instant::now();

            let outcome = match flow.state() {
                ResetState::Method => {
                    self.line("")?;
                    self.heading("Reset password")?;
                    for (idx, method) in ResetMethod::ALL.iter().enumerate() {
                        self.line(&format!("  {}. {}", idx + 1, method.label()))?;
                    }
                    match self.ask("Method", "")? {
                        Reply::Back | Reply::Cancel => return self.abandon_reset(flow),
                        Reply::Line(text) => match text
                            .trim()
                            .parse::<usize>()
                            .ok()
                            .and_then(|n| n.checked_sub(1))
                            .and_then(|n| ResetMethod::ALL.get(n))
                        {
                            Some(method) => flow.choose_method(*method),
                            None => ResetOutcome::Rejected {
                                message: "Please choose a method".to_string(),
                            },
                        },
                    }
                }
                ResetState::Contact => {
                    let (id, label) = match flow.method() {
                        Some(ResetMethod::PhoneOtp) => (password_reset::PHONE, "Phone number"),
                        _ => (password_reset::EMAIL, "Email address"),
                    };
                    let current = flow.record().text_or_empty(id);
                    match self.ask(label, &current)? {
                        Reply::Back => {
                            flow.back();
                            continue;
                        }
                        Reply::Cancel => return self.abandon_reset(flow),
                        Reply::Line(text) => {
                            if !text.trim().is_empty() {
                                flow.set(id, text.trim());
                            }
                            let outcome = flow.send_code(backend);
                            if outcome == ResetOutcome::Moved(ResetState::Otp) {
                                self.show_code_hint(flow, backend, &code_hint)?;
                            }
                            outcome
                        }
                    }
                }
                ResetState::Otp => {
                    let prompt = if flow.countdown().can_resend() {
                        format!("{}-digit code (or 'resend')", flow.code_length())
                    } else {
                        format!(
                            "{}-digit code (resend in {}s)",
                            flow.code_length(),
                            flow.countdown().remaining()
                        )
                    };
                    match self.ask(&prompt, "")? {
                        Reply::Back => {
                            flow.back();
                            continue;
                        }
                        Reply::Cancel => return self.abandon_reset(flow),
                        Reply::Line(text) if text.trim().eq_ignore_ascii_case("resend") => {
                            flow.elapse(clock.elapsed());
                            clock = Instant::now();
                            let outcome = flow.resend(backend);
                            if outcome == ResetOutcome::Moved(ResetState::Otp) {
                                self.hint("A new code has been sent.")?;
                                self.show_code_hint(flow, backend, &code_hint)?;
                            }
                            outcome
                        }
                        Reply::Line(text) => {
                            flow.set(password_reset::OTP, text.trim());
                            flow.verify(backend)
                        }
                    }
                }
                ResetState::Reset => {
                    let mut answers = Vec::with_capacity(2);
                    for (id, label) in [
                        (password_reset::NEW_PASSWORD, "New password"),
                        (password_reset::CONFIRM_PASSWORD, "Confirm password"),
                    ] {
                        match self.ask(label, "")? {
                            Reply::Back => break,
                            Reply::Cancel => return self.abandon_reset(flow),
                            Reply::Line(text) => answers.push((id, text)),
                        }
                    }
                    if answers.len() < 2 {
                        flow.back();
                        continue;
                    }
                    for (id, text) in answers {
                        flow.set(id, text);
                    }
                    flow.submit_password(backend)
                }
                ResetState::Success => break,
            };

            match outcome {
                ResetOutcome::Moved(_) | ResetOutcome::Ignored => {}
                ResetOutcome::Rejected { message } | ResetOutcome::Failed { message } => {
                    self.error(&message)?;
                }
                ResetOutcome::CoolingDown { remaining } => {
                    self.error(&format!("You can resend the code in {remaining}s"))?;
                }
                ResetOutcome::Closed => {
                    if flow.method() == Some(ResetMethod::EmailLink) {
                        self.success("A reset link has been sent to your email.")?;
                    } else {
                        self.success("Your password has been reset. You can sign in now.")?;
                    }
                }
            }
        }
        Ok(flow.state() == ResetState::Success)
    }

    fn abandon_reset(&mut self, flow: &mut PasswordReset) -> io::Result<bool> {
        flow.cancel();
        self.hint("Cancelled.")?;
        Ok(false)
    }

    fn show_code_hint<B, H>(
        &mut self,
        flow: &PasswordReset,
        backend: &B,
        code_hint: &H,
    ) -> io::Result<()>
    where
        B: Backend + ?Sized,
        H: Fn(&B, &OtpChannel) -> Option<String>,
    {
        if let Some(code) = flow.channel().and_then(|c| code_hint(backend, &c)) {
            self.hint(&format!("(development) code sent: {code}"))?;
        }
        Ok(())
    }
}

fn field_prompt(field: &FieldSpec) -> String {
    let mut prompt = field.label.clone();
    if field.required {
        prompt.push_str(" *");
    }
    if let FieldKind::Choice(options) = &field.kind {
        let listed: Vec<String> = options
            .iter()
            .map(|o| format!("{}={}", o.code, o.label))
            .collect();
        prompt.push_str(&format!(" ({})", listed.join(", ")));
    } else if let Some(placeholder) = &field.placeholder {
        prompt.push_str(&format!(" <{placeholder}>"));
    }
    prompt
}

fn shown_value(field: &FieldSpec, record: &FormRecord) -> String {
    let value = record
        .get(field.id.as_str())
        .map(Value::display)
        .unwrap_or_default();
    if matches!(field.kind, FieldKind::Password) && !value.is_empty() {
        return "*".repeat(value.chars().count());
    }
    value
}

fn describe_row(row: &FormRecord, fields: &[FieldSpec]) -> String {
    fields
        .iter()
        .map(|f| {
            let raw = row.get(f.id.as_str()).map(Value::display).unwrap_or_default();
            f.options()
                .iter()
                .find(|o| o.code == raw)
                .map(|o| o.label.clone())
                .unwrap_or(raw)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Turns one typed line into a value for `kind`. `-` clears free-text fields.
fn parse_input(kind: &FieldKind, text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    match kind {
        FieldKind::Choice(options) => {
            let by_index = trimmed
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| options.get(n));
            options
                .iter()
                .find(|o| {
                    o.code.eq_ignore_ascii_case(trimmed) || o.label.eq_ignore_ascii_case(trimmed)
                })
                .or(by_index)
                .map(|o| Value::choice(o.code.clone()))
                .ok_or_else(|| {
                    let codes: Vec<&str> = options.iter().map(|o| o.code.as_str()).collect();
                    format!("Choose one of: {}", codes.join(", "))
                })
        }
        FieldKind::Rows(_) => Err("Rows are edited through the row menu".to_string()),
        _ if trimmed == "-" => Ok(Value::text("")),
        FieldKind::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| "Enter a whole number".to_string()),
        FieldKind::Password => Ok(Value::text(text)),
        _ => Ok(Value::text(trimmed)),
    }
}
