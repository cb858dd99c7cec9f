// ClassificationInput — the normalized "sequence of text fragments" the
// classifier consumes.
//
// Callers with typed data build it directly from a string or a list of
// phrases. Callers holding loosely-typed JSON go through `from_json`, which
// accepts a string or an array and drops non-string array elements.

use serde_json::Value;

use super::error::ClassifyError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationInput {
    fragments: Vec<String>,
}

impl ClassificationInput {
    /// A single block of text, treated as a one-element sequence.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![text.into()],
        }
    }

    /// An ordered list of phrases (typically key phrases).
    pub fn phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: phrases.into_iter().map(Into::into).collect(),
        }
    }

    /// Validate a JSON value: a string, or an array whose string elements are kept.
    pub fn from_json(value: &Value) -> Result<Self, ClassifyError> {
        match value {
            Value::String(s) => Ok(Self::text(s.clone())),
            Value::Array(items) => Ok(Self::phrases(
                items.iter().filter_map(Value::as_str).map(str::to_string),
            )),
            other => Err(ClassifyError::InvalidInput {
                found: json_type_name(other),
            }),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Space-joined, lower-cased text searched for keywords.
    pub fn corpus(&self) -> String {
        self.fragments.join(" ").to_lowercase()
    }
}

impl From<&str> for ClassificationInput {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for ClassificationInput {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<Vec<String>> for ClassificationInput {
    fn from(fragments: Vec<String>) -> Self {
        Self { fragments }
    }
}

impl From<&[String]> for ClassificationInput {
    fn from(fragments: &[String]) -> Self {
        Self {
            fragments: fragments.to_vec(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_corpus_joins_and_lowercases() {
        let input = ClassificationInput::phrases(["Buena BATERÍA", "Envío rápido"]);
        assert_eq!(input.corpus(), "buena batería envío rápido");
    }

    #[test]
    fn test_from_json_drops_non_strings() {
        let input = ClassificationInput::from_json(&json!(["a", 42, null, "b", {"x": 1}])).unwrap();
        assert_eq!(input.fragments(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_scalars() {
        let err = ClassificationInput::from_json(&json!(42)).unwrap_err();
        assert_eq!(err, ClassifyError::InvalidInput { found: "number" });
        assert!(ClassificationInput::from_json(&json!({"text": "x"})).is_err());
        assert!(ClassificationInput::from_json(&Value::Null).is_err());
    }

    #[test]
    fn test_empty_string_corpus_is_empty() {
        assert_eq!(ClassificationInput::text("").corpus(), "");
        assert_eq!(ClassificationInput::default().corpus(), "");
    }
}
