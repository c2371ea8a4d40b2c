//! Estimation service — prompt construction, reply parsing, currency display.
//!
//! DESIGN
//! ======
//! The upstream model is instructed to reply with a single bare integer, but
//! in practice may prepend explanatory text. Parsing therefore takes the LAST
//! maximal run of decimal digits in the reply; that heuristic survives both
//! leading reasoning ("roughly 12000 to 15000") and a clean bare integer.

use serde::{Deserialize, Serialize};

use crate::llm::{GenError, GenerateText};

// =============================================================================
// TYPES
// =============================================================================

/// Material quality tier selected on the estimation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialGrade {
    Standard,
    Premium,
    Luxury,
}

impl MaterialGrade {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        }
    }

    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "Standard" => Some(Self::Standard),
            "Premium" => Some(Self::Premium),
            "Luxury" => Some(Self::Luxury),
            _ => None,
        }
    }
}

/// A fully specified estimation request, built fresh per debounce settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateRequest {
    pub project_name: String,
    pub location: String,
    pub floor_area_sq_m: u32,
    pub floors: u32,
    pub material: MaterialGrade,
}

// =============================================================================
// PROMPT
// =============================================================================

/// Build the natural-language prompt sent to the generation endpoint.
#[must_use]
pub fn build_prompt(req: &EstimateRequest) -> String {
    format!(
        "You are an expert construction cost estimator.\n\
         Estimate the price of a building strictly based on the following parameters:\n\
         \n\
         Project Name: {name}\n\
         Location: {location}\n\
         Area (in sq m): {area}\n\
         Number of Floors: {floors}\n\
         Material Type: {material}\n\
         \n\
         Rules:\n\
         - Return ONLY a single numeric estimated price value.",
        name = req.project_name,
        location = req.location,
        area = req.floor_area_sq_m,
        floors = req.floors,
        material = req.material.as_str(),
    )
}

// =============================================================================
// REPLY PARSER
// =============================================================================

/// Extract the estimated cost from the model's free-form reply.
///
/// Scans for maximal runs of ASCII decimal digits and parses the last run in
/// document order. Returns `None` when the reply contains no digits, or when
/// the last run overflows `i64` (an implausible cost is garbage, not data).
#[must_use]
pub fn parse_estimate(text: &str) -> Option<i64> {
    let mut last: Option<&str> = None;
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_ascii_digit() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            last = Some(&text[s..i]);
        }
    }
    if let Some(s) = start {
        last = Some(&text[s..]);
    }

    last.and_then(|run| run.parse::<i64>().ok())
}

/// Issue one estimation attempt: build the prompt, call the generation
/// endpoint, parse the reply.
///
/// `Ok(None)` means the reply contained no usable number.
///
/// # Errors
///
/// Returns a [`GenError`] if the generation call fails.
pub async fn request_estimate(client: &dyn GenerateText, req: &EstimateRequest) -> Result<Option<i64>, GenError> {
    let prompt = build_prompt(req);
    let text = client.generate(&prompt).await?;
    Ok(parse_estimate(text.trim()))
}

// =============================================================================
// CURRENCY DISPLAY
// =============================================================================

/// Format a whole-rupee amount with Indian digit grouping (`₹48,00,000`).
///
/// Groups the last three digits, then pairs: lakh/crore style, matching the
/// `en-IN` locale the project list and detail screens display.
#[must_use]
pub fn format_inr(amount: i64) -> String {
    let grouped = group_indian(&amount.unsigned_abs().to_string());
    if amount < 0 { format!("-₹{grouped}") } else { format!("₹{grouped}") }
}

fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let mut pairs: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        pairs.push(t);
        rest = h;
    }
    pairs.push(rest);
    pairs.reverse();

    format!("{},{}", pairs.join(","), tail)
}

#[cfg(test)]
#[path = "estimate_test.rs"]
mod tests;
