//! Output regions and the credit form page that hosts them.

use crate::models::Rendered;
use crate::render::escape_html;
use std::sync::{Arc, Mutex, RwLock};

pub const FORM_ID: &str = "credit-form";
pub const RESULT_ID: &str = "result";
pub const SUGGESTIONS_ID: &str = "suggestions";

/// A named container whose inner HTML is replaced wholesale.
pub trait OutputRegion: Send + Sync {
    fn id(&self) -> &str;
    fn set_inner_html(&self, html: String);
    fn inner_html(&self) -> String;
}

/// In-memory region. Writes are serialized; the last write wins.
#[derive(Debug, Default)]
pub struct HtmlRegion {
    id: String,
    content: RwLock<String>,
}

impl HtmlRegion {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: RwLock::new(String::new()),
        }
    }
}

impl OutputRegion for HtmlRegion {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_inner_html(&self, html: String) {
        let mut content = self.content.write().unwrap_or_else(|e| e.into_inner());
        *content = html;
    }

    fn inner_html(&self) -> String {
        self.content
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Handles to the form and the two output regions.
#[derive(Clone)]
pub struct CreditPage {
    pub form_id: String,
    pub result: Arc<dyn OutputRegion>,
    pub suggestions: Arc<dyn OutputRegion>,
    commit_lock: Arc<Mutex<()>>,
}

impl CreditPage {
    pub fn new(
        form_id: impl Into<String>,
        result: Arc<dyn OutputRegion>,
        suggestions: Arc<dyn OutputRegion>,
    ) -> Self {
        Self {
            form_id: form_id.into(),
            result,
            suggestions,
            commit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Writes both regions as one step.
    ///
    /// Concurrent commits never interleave, so the two regions always show
    /// the same response: the one committed last.
    pub fn commit(&self, rendered: &Rendered) {
        let _guard = self.commit_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.result.set_inner_html(rendered.result_html.clone());
        self.suggestions.set_inner_html(rendered.suggestions_html.clone());
    }

    /// A page with empty in-memory regions under the standard ids.
    pub fn in_memory() -> Self {
        Self::new(
            FORM_ID,
            Arc::new(HtmlRegion::new(RESULT_ID)),
            Arc::new(HtmlRegion::new(SUGGESTIONS_ID)),
        )
    }

    /// Full HTML document: the form followed by both regions.
    pub fn to_html(&self) -> String {
        let mut controls = String::new();
        for field in FORM_FIELDS {
            controls.push_str(&field.to_html());
        }

        let (result, suggestions) = {
            let _guard = self.commit_lock.lock().unwrap_or_else(|e| e.into_inner());
            (self.result.inner_html(), self.suggestions.inner_html())
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Credit Score Predictor</title>
</head>
<body>
    <h1>Credit Score Predictor</h1>
    <form id="{form_id}" method="post" action="/submit">
{controls}        <button type="submit">Predict Credit Score</button>
    </form>
    <div id="{result_id}">{result}</div>
    <div id="{suggestions_id}">{suggestions}</div>
</body>
</html>
"#,
            form_id = escape_html(&self.form_id),
            controls = controls,
            result_id = escape_html(self.result.id()),
            result = result,
            suggestions_id = escape_html(self.suggestions.id()),
            suggestions = suggestions,
        )
    }
}

enum Control {
    Number {
        min: &'static str,
        max: &'static str,
        step: &'static str,
        value: &'static str,
    },
    Select(&'static [&'static str]),
}

struct FormField {
    name: &'static str,
    label: &'static str,
    control: Control,
}

impl FormField {
    fn to_html(&self) -> String {
        let input = match &self.control {
            Control::Number { min, max, step, value } => format!(
                r#"<input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" required>"#,
                name = escape_html(self.name),
            ),
            Control::Select(options) => {
                let opts: String = options
                    .iter()
                    .map(|o| format!(r#"<option value="{o}">{o}</option>"#))
                    .collect();
                format!(
                    r#"<select id="{name}" name="{name}">{opts}</select>"#,
                    name = escape_html(self.name),
                )
            }
        };
        format!(
            "        <label for=\"{}\">{}</label>\n        {}\n",
            escape_html(self.name),
            self.label,
            input
        )
    }
}

/// Scoring inputs the prediction service expects.
const FORM_FIELDS: &[FormField] = &[
    number("age", "Age", "18", "80", "1", "30"),
    number("num_occupants", "Number of Occupants", "1", "10", "1", "2"),
    number("cash_inflow", "Monthly Cash Inflow", "0", "10000000", "1", "50000"),
    number("avg_bank_balance", "Average Bank Balance", "0", "10000000", "1", "10000"),
    select(
        "bill_payment_consistency",
        "Bill Payment Consistency",
        &["1.0", "0.7", "0.4", "0.2", "0.0"],
    ),
    select("bnpl_used", "BNPL Used?", &["true", "false"]),
    number("bnpl ratio", "BNPL Ratio", "0", "1", "0.01", "0.3"),
    number("rent_amount", "Rent Amount", "0", "10000000", "1", "10000"),
    select("location_type", "Location Type", &["Urban", "Semi-Urban", "Rural"]),
    select(
        "education_level",
        "Education Level",
        &["12th", "Diploma", "Graduate", "PostGraduate", "PhD"],
    ),
    select("income_type", "Income Type", &["Salaried", "Gig", "Informal"]),
    number("grade_or_cgpa", "Grade or CGPA", "0", "10", "0.1", "7.5"),
    select("housing_type", "Housing Type", &["Owned", "Rented", "Pg"]),
    number("age_to_employment_ratio", "Age to Employment Ratio", "0", "1", "0.01", "0.5"),
];

const fn number(
    name: &'static str,
    label: &'static str,
    min: &'static str,
    max: &'static str,
    step: &'static str,
    value: &'static str,
) -> FormField {
    FormField {
        name,
        label,
        control: Control::Number {
            min,
            max,
            step,
            value,
        },
    }
}

const fn select(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> FormField {
    FormField {
        name,
        label,
        control: Control::Select(options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_replaces_content() {
        let region = HtmlRegion::new(RESULT_ID);
        assert_eq!(region.inner_html(), "");

        region.set_inner_html("<h2>Credit Score: 600</h2>".to_string());
        region.set_inner_html("<h2>Credit Score: 700</h2>".to_string());
        assert_eq!(region.inner_html(), "<h2>Credit Score: 700</h2>");
        assert_eq!(region.id(), "result");
    }

    #[test]
    fn commit_writes_both_regions() {
        let page = CreditPage::in_memory();
        page.commit(&Rendered {
            result_html: "<h2>Credit Score: 650</h2>".to_string(),
            suggestions_html: "<h3>Suggestions:</h3><ul></ul>".to_string(),
        });

        assert_eq!(page.result.inner_html(), "<h2>Credit Score: 650</h2>");
        assert_eq!(
            page.suggestions.inner_html(),
            "<h3>Suggestions:</h3><ul></ul>"
        );
    }

    #[test]
    fn page_html_contains_form_and_regions() {
        let page = CreditPage::in_memory();
        page.result.set_inner_html("<h2>Credit Score: 720</h2>".to_string());

        let html = page.to_html();
        assert!(html.contains(
            r#"<form id="credit-form" method="post" action="/submit">"#
        ));
        assert!(html.contains(
            r#"<div id="result"><h2>Credit Score: 720</h2></div>"#
        ));
        assert!(html.contains(r#"<div id="suggestions"></div>"#));
        assert!(html.contains(r#"name="bnpl_used""#));
        assert!(html.contains(r#"<option value="true">true</option>"#));
        assert!(html.contains(r#"name="bnpl ratio""#));
    }

    #[test]
    fn page_lists_every_scoring_field_once() {
        let html = CreditPage::in_memory().to_html();
        for field in FORM_FIELDS {
            let needle = format!("name=\"{}\"", field.name);
            assert_eq!(html.matches(&needle).count(), 1, "{}", field.name);
        }
    }
}
