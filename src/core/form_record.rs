use crate::core::FieldId;
use crate::core::value::Value;
use indexmap::IndexMap;

/// Flat bag of every field collected across the steps of one wizard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormRecord {
    values: IndexMap<FieldId, Value>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        self.set(id, value);
        self
    }

    pub fn set(&mut self, id: impl Into<FieldId>, value: impl Into<Value>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Value> {
        self.values.shift_remove(id)
    }

    /// Missing fields are empty.
    pub fn is_empty(&self, id: &str) -> bool {
        self.get(id).is_none_or(Value::is_empty)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(Value::as_text)
    }

    /// The code of a choice field; plain text does not count.
    pub fn choice(&self, id: &str) -> Option<&str> {
        match self.get(id) {
            Some(Value::Choice(code)) => Some(code.as_str()),
            _ => None,
        }
    }

    /// Trimmed text, or an empty string when the field is absent.
    pub fn text_or_empty(&self, id: &str) -> String {
        self.text(id).map(str::trim).unwrap_or_default().to_string()
    }

    pub fn integer(&self, id: &str) -> Option<i64> {
        self.get(id).and_then(Value::as_integer)
    }

    pub fn float(&self, id: &str) -> Option<f64> {
        self.get(id).and_then(Value::as_float)
    }

    pub fn rows(&self, id: &str) -> &[FormRecord] {
        self.get(id).and_then(Value::as_rows).unwrap_or(&[])
    }

    /// Mutable access to a row list, creating it when the field is absent or
    /// holds another kind of value.
    pub fn rows_mut(&mut self, id: &str) -> &mut Vec<FormRecord> {
        let slot = self
            .values
            .entry(FieldId::from(id))
            .or_insert_with(|| Value::Rows(Vec::new()));
        if !matches!(slot, Value::Rows(_)) {
            *slot = Value::Rows(Vec::new());
        }
        match slot {
            Value::Rows(rows) => rows,
            _ => unreachable!("slot was just normalised to rows"),
        }
    }

    pub fn reset_to(&mut self, defaults: &FormRecord) {
        self.values.clone_from(&defaults.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::FormRecord;
    use crate::core::value::Value;

    #[test]
    fn absent_fields_are_empty() {
        let record = FormRecord::new().with("name", "Arena");
        assert!(!record.is_empty("name"));
        assert!(record.is_empty("description"));
    }

    #[test]
    fn reset_restores_defaults_and_drops_extra_fields() {
        let defaults = FormRecord::new().with("city", "Ho Chi Minh City");
        let mut record = defaults.clone();
        record.set("city", "Da Nang");
        record.set("ward", "Ward 1");

        record.reset_to(&defaults);

        assert_eq!(record, defaults);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn rows_mut_replaces_scalar_value() {
        let mut record = FormRecord::new().with("slots", "oops");
        record.rows_mut("slots").push(FormRecord::new().with("price", 10));
        assert_eq!(record.rows("slots").len(), 1);
        assert!(matches!(record.get("slots"), Some(Value::Rows(_))));
    }

    #[test]
    fn choice_ignores_plain_text() {
        let record = FormRecord::new()
            .with("status", Value::choice("A"))
            .with("name", "A");
        assert_eq!(record.choice("status"), Some("A"));
        assert_eq!(record.choice("name"), None);
        assert_eq!(record.text("status"), Some("A"));
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let record = FormRecord::new().with("b", 1).with("a", 2);
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
