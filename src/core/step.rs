use crate::core::FieldId;
use crate::core::field::FieldSpec;
use crate::core::form_record::FormRecord;
use crate::core::validation::{StepValidator, ValidationResult, run_validators};
use crate::core::validators::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

pub struct Step {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub validators: Vec<StepValidator>,
}

impl Step {
    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> StepBuilder {
        StepBuilder::new(id, title)
    }

    /// Pure check of this step against the shared record.
    pub fn validate(&self, record: &FormRecord) -> ValidationResult {
        run_validators(&self.validators, record)
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("fields", &self.fields.len())
            .field("validators", &self.validators.len())
            .finish()
    }
}

pub struct StepBuilder {
    id: String,
    title: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
    validators: Vec<StepValidator>,
}

impl StepBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
            validators: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn validator(mut self, validator: StepValidator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Fails with `message` when any of `field_ids` is empty.
    pub fn require<I, F>(mut self, field_ids: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldId>,
    {
        let ids: Vec<FieldId> = field_ids.into_iter().map(Into::into).collect();
        let msg = message.into();
        self.validators.push(Box::new(move |record: &FormRecord| {
            if ids.iter().any(|id| record.is_empty(id.as_str())) {
                ValidationResult::fail(&msg)
            } else {
                ValidationResult::Pass
            }
        }));
        self
    }

    /// Applies a single-value rule to the text form of one field.
    pub fn rule(mut self, field_id: impl Into<FieldId>, rule: Validator) -> Self {
        let id = field_id.into();
        self.validators.push(Box::new(move |record: &FormRecord| {
            let raw = record
                .get(id.as_str())
                .map(|value| value.display())
                .unwrap_or_default();
            ValidationResult::from(rule(&raw))
        }));
        self
    }

    pub fn validate(
        mut self,
        f: impl Fn(&FormRecord) -> ValidationResult + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Box::new(f));
        self
    }

    pub fn build(self) -> Step {
        Step {
            id: self.id,
            title: self.title,
            description: self.description,
            fields: self.fields,
            validators: self.validators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Step;
    use crate::core::form_record::FormRecord;
    use crate::core::validators;

    #[test]
    fn require_checks_every_listed_field() {
        let step = Step::builder("basic", "Basic Information")
            .require(["name", "description"], "missing")
            .build();

        let partial = FormRecord::new().with("name", "Arena");
        assert_eq!(step.validate(&partial).message(), Some("missing"));

        let full = partial.with("description", "Eight courts");
        assert!(step.validate(&full).is_pass());
    }

    #[test]
    fn rule_runs_against_field_text() {
        let step = Step::builder("contact", "Contact")
            .rule("email", validators::email("bad email"))
            .build();

        let record = FormRecord::new().with("email", "nope");
        assert_eq!(step.validate(&record).message(), Some("bad email"));
    }

    #[test]
    fn validation_does_not_touch_record() {
        let step = Step::builder("basic", "Basic")
            .require(["name"], "missing")
            .build();
        let record = FormRecord::new().with("other", "x");
        let before = record.clone();
        let _ = step.validate(&record);
        assert_eq!(record, before);
    }
}
