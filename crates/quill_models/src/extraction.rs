//! Utilities for extracting structured data from model responses.
//!
//! Models often wrap JSON in markdown code fences or surround it with
//! explanatory text. These helpers find the payload anyway.

use quill_error::{GenerationError, GenerationErrorKind, QuillResult};
use serde::de::DeserializeOwned;

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` (or an unlabelled fence)
/// 2. Whichever balanced `[ ... ]` or `{ ... }` appears first
///
/// # Errors
///
/// Returns `GenerationErrorKind::Malformed` if no JSON is found.
///
/// # Examples
///
/// ```
/// use quill_models::extract_json;
///
/// let response = "Here is the outline:\n\
///     ```json\n\
///     [{\"title\": \"Return\"}]\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('['));
/// ```
pub fn extract_json(response: &str) -> QuillResult<String> {
    if let Some(json) = extract_from_code_block(response) {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');
    let order = match (bracket_pos, brace_pos) {
        (Some(b), Some(c)) if b < c => [('[', ']'), ('{', '}')],
        (Some(_), None) => [('[', ']'), ('{', '}')],
        _ => [('{', '}'), ('[', ']')],
    };
    for (open, close) in order {
        if let Some(json) = extract_balanced(response, open, close) {
            return Ok(json);
        }
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in model response"
    );
    Err(GenerationError::new(GenerationErrorKind::Malformed(format!(
        "no JSON found in response (length: {})",
        response.len()
    )))
    .into())
}

/// Parse extracted JSON into `T`.
///
/// # Errors
///
/// Returns `GenerationErrorKind::Malformed` when the text does not match `T`.
///
/// # Examples
///
/// ```
/// use quill_models::parse_json;
///
/// let numbers: Vec<u32> = parse_json("[1, 2, 3]").unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
pub fn parse_json<T>(json_str: &str) -> QuillResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview: String = json_str.chars().take(100).collect();
        tracing::error!(error = %e, json_preview = %preview, "JSON parsing failed");
        GenerationError::new(GenerationErrorKind::Malformed(format!(
            "{} (JSON: {}...)",
            e, preview
        )))
        .into()
    })
}

fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let fence_end = start + 3;
    // Skip the language tag, if any
    let content_start = response[fence_end..]
        .find('\n')
        .map_or(fence_end, |n| fence_end + n + 1);

    let body = &response[content_start..];
    // An unterminated fence usually means a truncated response
    let content = body.find("```").map_or(body, |end| &body[..end]);
    let content = content.trim();
    (!content.is_empty()).then(|| content.to_string())
}

fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}
