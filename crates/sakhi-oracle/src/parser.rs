//! Parse language-model output into a structured verdict

use crate::OracleError;
use sakhi_domain::Verdict;
use serde::Deserialize;

/// Raw verdict shape the model is instructed to emit
#[derive(Deserialize)]
struct RawVerdict {
    is_verified: bool,
    #[serde(default)]
    verification_notes: String,
}

/// Parse the model's response text into a [`Verdict`]
///
/// Models sometimes wrap JSON in markdown code blocks despite instructions;
/// fences are stripped before parsing.
pub fn parse_verdict(response: &str) -> Result<Verdict, OracleError> {
    let json_str = extract_json(response)?;

    let raw: RawVerdict = serde_json::from_str(&json_str)
        .map_err(|e| OracleError::InvalidVerdict(format!("JSON parse error: {}", e)))?;

    Ok(Verdict {
        is_verified: raw.is_verified,
        notes: raw.verification_notes,
    })
}

/// Extract JSON from a response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, OracleError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```json") || trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(OracleError::InvalidVerdict("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}
