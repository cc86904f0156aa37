use crate::core::FieldId;
use crate::core::form_record::FormRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Multiline,
    Email,
    Phone,
    Password,
    /// `HH:MM`, 24h.
    Time,
    Integer,
    Float,
    Choice(Vec<ChoiceOption>),
    /// Repeating group of sub-fields stored as `Value::Rows`.
    Rows(RowsSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowsSpec {
    pub fields: Vec<FieldSpec>,
    /// Record pushed when a row is added.
    pub template: FormRecord,
    /// Removing below this count is refused.
    pub min_rows: usize,
}

/// Presentation metadata for one input on a step. Navigation never looks at
/// this; only front-ends do.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl FieldSpec {
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
        }
    }

    pub fn text(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            FieldKind::Choice(options) => options.as_slice(),
            _ => &[],
        }
    }
}
