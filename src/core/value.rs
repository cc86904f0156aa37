use crate::core::form_record::FormRecord;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Text(String),
    Integer(i64),
    Float(f64),
    /// Enum-like code picked from a fixed option list.
    Choice(String),
    Rows(Vec<FormRecord>),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn choice(code: impl Into<String>) -> Self {
        Self::Choice(code.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.trim().is_empty(),
            Self::Choice(v) => v.is_empty(),
            Self::Rows(v) => v.is_empty(),
            Self::Integer(_) | Self::Float(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) | Self::Choice(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Text(v) | Self::Choice(v) => v.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            Self::Text(v) => v.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_rows(&self) -> Option<&[FormRecord]> {
        match self {
            Self::Rows(rows) => Some(rows.as_slice()),
            _ => None,
        }
    }

    /// Human readable rendering used when echoing the current value back.
    pub fn display(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Text(v) | Self::Choice(v) => v.clone(),
            Self::Integer(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Rows(rows) => format!("{} row(s)", rows.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn whitespace_text_counts_as_empty() {
        assert!(Value::text("   ").is_empty());
        assert!(Value::None.is_empty());
        assert!(!Value::Integer(0).is_empty());
    }

    #[test]
    fn numeric_accessors_parse_text() {
        assert_eq!(Value::text(" 42 ").as_integer(), Some(42));
        assert_eq!(Value::text("10.5").as_float(), Some(10.5));
        assert_eq!(Value::Integer(3).as_float(), Some(3.0));
        assert_eq!(Value::text("abc").as_integer(), None);
    }
}
