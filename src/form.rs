//! Submitted form data and the submit event that carries it.

use crate::errors::AppError;

/// Ordered `(name, raw value)` pairs read from a submitted form.
///
/// Names may repeat; the order is the order the controls appear in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping any earlier field with the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Decodes an `application/x-www-form-urlencoded` body, as a browser sends it.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let pairs = url::form_urlencoded::parse(body)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Builds a field set from `name=value` arguments.
    ///
    /// Only the first `=` separates name from value, so values may contain `=`.
    ///
    /// # Arguments
    ///
    /// * `args` - Arguments such as `age=30` or `bnpl_used=true`.
    ///
    /// # Returns
    ///
    /// * `Result<Self, AppError>` - The fields in argument order, or
    ///   `BadRequest` for an argument without `=` or without a name.
    pub fn from_assignments<I, S>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::new();
        for arg in args {
            let arg = arg.as_ref();
            let (name, value) = arg.split_once('=').ok_or_else(|| {
                AppError::BadRequest(format!("expected name=value, got '{}'", arg))
            })?;
            if name.is_empty() {
                return Err(AppError::BadRequest(format!("field name missing in '{}'", arg)));
            }
            fields.append(name, value);
        }
        Ok(fields)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let pairs = iter
            .into_iter()
            .map(|(n, v)| (n.into(), v.into()))
            .collect();
        Self { pairs }
    }
}

/// A submit event raised by the form identified as `form_id`.
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    form_id: String,
    fields: FormFields,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(form_id: impl Into<String>, fields: FormFields) -> Self {
        Self {
            form_id: form_id.into(),
            fields,
            default_prevented: false,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Field values as they were when the form was submitted.
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Cancels the default navigation the host would perform for this submit.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_body_keeps_order_and_decodes() {
        let fields =
            FormFields::from_urlencoded(b"income=5000&bnpl+ratio=0.3&notes=a%26b&income=6000");
        let pairs: Vec<_> = fields.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("income", "5000"),
                ("bnpl ratio", "0.3"),
                ("notes", "a&b"),
                ("income", "6000"),
            ]
        );
    }

    #[test]
    fn empty_body_has_no_fields() {
        assert!(FormFields::from_urlencoded(b"").is_empty());
    }

    #[test]
    fn assignments_split_on_first_equals() {
        let fields = FormFields::from_assignments(["notes=a=b", "age=30", "empty="]).unwrap();
        let pairs: Vec<_> = fields.iter().collect();
        assert_eq!(pairs, vec![("notes", "a=b"), ("age", "30"), ("empty", "")]);
    }

    #[test]
    fn assignments_reject_malformed_args() {
        assert!(matches!(
            FormFields::from_assignments(["age"]),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            FormFields::from_assignments(["=30"]),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn prevent_default_sets_flag() {
        let mut event = SubmitEvent::new("credit-form", FormFields::new());
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
        assert_eq!(event.form_id(), "credit-form");
    }
}
