//! Best-effort review feedback parsing.
//!
//! Accepted inputs, most to least structured:
//!
//! 1. A bare JSON object
//! 2. A JSON object inside a ```` ```json ```` fence
//! 3. Prose with a JSON object somewhere inside it
//!
//! Missing fields default to empty, scalar fields are wrapped into
//! one-element lists and non-string list items are rendered as JSON text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One concrete edit proposed by the reviewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedPatch {
    pub section: String,
    pub before: String,
    pub after: String,
}

/// Structured interpretation of a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFeedback {
    pub missing_items: Vec<String>,
    pub incorrect_descriptions: Vec<String>,
    pub unclear_sections: Vec<String>,
    pub suggested_patches: Vec<SuggestedPatch>,
}

/// Raw review text plus its structured interpretation, if one was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReview {
    pub raw: String,
    pub feedback: Option<ReviewFeedback>,
}

impl ParsedReview {
    /// `true` only when structure was found and it reports nothing missing
    /// or incorrect. Unparseable reviews are never clean.
    pub fn is_clean(&self) -> bool {
        self.feedback.as_ref().is_some_and(ReviewFeedback::is_clean)
    }
}

impl ReviewFeedback {
    /// Interpret free text as review feedback. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use crew_domain::review::ReviewFeedback;
    ///
    /// let parsed = ReviewFeedback::parse_best_effort(
    ///     "Here you go:\n```json\n{\"missing_items\": [\"License\"]}\n```",
    /// );
    /// let feedback = parsed.feedback.unwrap();
    /// assert_eq!(feedback.missing_items, vec!["License"]);
    /// assert!(!feedback.is_clean());
    ///
    /// let parsed = ReviewFeedback::parse_best_effort("looks fine to me");
    /// assert!(parsed.feedback.is_none());
    /// assert_eq!(parsed.raw, "looks fine to me");
    /// ```
    pub fn parse_best_effort(text: &str) -> ParsedReview {
        let feedback = extract_json_object(text).map(|obj| Self::from_json(&obj));
        ParsedReview {
            raw: text.to_string(),
            feedback,
        }
    }

    fn from_json(obj: &serde_json::Map<String, Value>) -> Self {
        Self {
            missing_items: string_list(obj.get("missing_items")),
            incorrect_descriptions: string_list(obj.get("incorrect_descriptions")),
            unclear_sections: string_list(obj.get("unclear_sections")),
            suggested_patches: patch_list(obj.get("suggested_patches")),
        }
    }

    /// Nothing missing and nothing incorrect.
    pub fn is_clean(&self) -> bool {
        self.missing_items.is_empty() && self.incorrect_descriptions.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.missing_items.len() + self.incorrect_descriptions.len() + self.unclear_sections.len()
    }
}

/// Find the first balanced `{...}` span that parses as a JSON object.
fn extract_json_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find('{') {
        let start = search_from + rel;
        if let Some(end) = balanced_end(&text[start..])
            && let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text[start..start + end])
        {
            return Some(map);
        }
        search_from = start + 1;
    }
    None
}

/// Byte length of the balanced object starting at `s[0] == '{'`.
///
/// Braces inside string literals are ignored.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(item_text).collect(),
        Some(other) => item_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn patch_list(value: Option<&Value>) -> Vec<SuggestedPatch> {
    let items: Vec<&Value> = match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(obj @ Value::Object(_)) => vec![obj],
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(fields) => {
                let field = |k: &str| fields.get(k).and_then(item_text).unwrap_or_default();
                Some(SuggestedPatch {
                    section: field("section"),
                    before: field("before"),
                    after: field("after"),
                })
            }
            Value::String(s) if !s.trim().is_empty() => Some(SuggestedPatch {
                after: s.clone(),
                ..Default::default()
            }),
            _ => None,
        })
        .collect()
}
