//! Best-effort parsing of chat-completion replies
//!
//! Nothing here returns an error: every reply maps to a [`ParseOutcome`] and
//! the caller decides what an unparsed reply means for its endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

use super::payload::SuggestedInputs;
use crate::models::openai::ResponseMessage;

/// Result of parsing a model reply
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// Structured JSON found in the reply content
    Parsed(T),
    /// Content unusable; value reconstructed from the reasoning text
    Partial { value: T, source: FallbackSource },
    /// Nothing usable; `raw` is the content as received
    Unparsed { raw: String },
}

/// Where a partial result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackSource {
    /// Numbers scraped out of the reasoning text
    ReasoningParsed,
    /// Reasoning text passed through without structured values
    ReasoningRaw,
}

impl FallbackSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackSource::ReasoningParsed => "reasoning_parsed",
            FallbackSource::ReasoningRaw => "reasoning_raw",
        }
    }
}

impl<T> ParseOutcome<T> {
    /// Metric label
    pub fn label(&self) -> &'static str {
        match self {
            ParseOutcome::Parsed(_) => "parsed",
            ParseOutcome::Partial { .. } => "partial",
            ParseOutcome::Unparsed { .. } => "unparsed",
        }
    }
}

/// Purchase recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Buy,
    #[default]
    Reconsider,
    DoNotBuy,
}

impl Verdict {
    /// Accepts the English tokens, common spellings and the Thai labels
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "buy" | "should-buy" | "ควรซื้อ" => Some(Verdict::Buy),
            "reconsider" | "consider-again" | "พิจารณาอีกครั้ง" => Some(Verdict::Reconsider),
            "do-not-buy" | "dont-buy" | "don't-buy" | "should-not-buy" | "ไม่ควรซื้อ" => {
                Some(Verdict::DoNotBuy)
            }
            _ => None,
        }
    }
}

/// Narrative verdict returned by the analyze endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub verdict: Verdict,
    /// 0-100
    pub confidence: u8,
    pub summary: String,
    pub detailed_analysis: String,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
    pub comparison_with_standard: String,
}

pub const DEFAULT_CONFIDENCE: u8 = 50;
pub const DEFAULT_SUMMARY: &str = "Analysis complete";
pub const DEFAULT_EXPLANATION: &str =
    "Suggested values based on the car's condition and usage";

impl AnalysisResult {
    /// Verdict used when only the model's reasoning text is available
    pub fn from_reasoning(reasoning: &str) -> Self {
        Self {
            verdict: Verdict::Reconsider,
            confidence: DEFAULT_CONFIDENCE,
            summary: "The analysis could not be completed; see the raw analysis below".to_string(),
            detailed_analysis: reasoning.to_string(),
            risks: vec!["The advisory reply could not be processed".to_string()],
            recommendations: vec![
                "Try again, or consult a financial advisor".to_string(),
            ],
            comparison_with_standard: "Comparison unavailable".to_string(),
        }
    }
}

/// Lenient mirror of [`AnalysisResult`]; every field may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    verdict: Option<String>,
    confidence: Option<Value>,
    summary: Option<String>,
    detailed_analysis: Option<String>,
    risks: Option<Vec<String>>,
    recommendations: Option<Vec<String>>,
    comparison_with_standard: Option<String>,
}

impl RawAnalysis {
    fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            verdict: self
                .verdict
                .as_deref()
                .and_then(Verdict::from_label)
                .unwrap_or_default(),
            confidence: self
                .confidence
                .as_ref()
                .and_then(confidence_from_value)
                .unwrap_or(DEFAULT_CONFIDENCE),
            summary: self
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            detailed_analysis: self.detailed_analysis.unwrap_or_default(),
            risks: self.risks.unwrap_or_default(),
            recommendations: self.recommendations.unwrap_or_default(),
            comparison_with_standard: self.comparison_with_standard.unwrap_or_default(),
        }
    }
}

/// A zero or missing confidence counts as absent
fn confidence_from_value(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() || number == 0.0 {
        return None;
    }
    Some(number.round().clamp(0.0, 100.0) as u8)
}

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)```").expect("valid regex"));
static ANY_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\s*(.*?)```").expect("valid regex"));

/// Body of the first ```` ```json ```` fence, else of any fence, else the
/// whole text, trimmed
pub fn extract_json_block(content: &str) -> &str {
    JSON_FENCE
        .captures(content)
        .or_else(|| ANY_FENCE.captures(content))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(content)
        .trim()
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Parse an analyze reply
///
/// Content JSON wins; otherwise the reasoning text becomes a fallback
/// verdict; otherwise the reply is unparsed.
pub fn parse_analysis(message: &ResponseMessage) -> ParseOutcome<AnalysisResult> {
    let content = message.content.as_deref().unwrap_or_default();

    match serde_json::from_str::<RawAnalysis>(extract_json_block(content)) {
        Ok(raw) => ParseOutcome::Parsed(raw.into_result()),
        Err(_) => match non_empty(message.reasoning_content.as_deref()) {
            Some(reasoning) => ParseOutcome::Partial {
                value: AnalysisResult::from_reasoning(reasoning),
                source: FallbackSource::ReasoningRaw,
            },
            None => ParseOutcome::Unparsed {
                raw: content.to_string(),
            },
        },
    }
}

/// Parse a prefill reply
///
/// Empty content falls back to scraping numbers from the reasoning text.
/// Non-empty content that is not JSON is unparsed.
pub fn parse_prefill(message: &ResponseMessage) -> ParseOutcome<SuggestedInputs> {
    let Some(content) = non_empty(message.content.as_deref()) else {
        return match non_empty(message.reasoning_content.as_deref()) {
            Some(reasoning) => {
                let scraped = parse_from_reasoning(reasoning);
                let (mut value, source) = if scraped.has_values() {
                    (scraped, FallbackSource::ReasoningParsed)
                } else {
                    (SuggestedInputs::default(), FallbackSource::ReasoningRaw)
                };
                value.explanation = Some(reasoning.to_string());
                ParseOutcome::Partial { value, source }
            }
            None => ParseOutcome::Unparsed { raw: String::new() },
        };
    };

    match serde_json::from_str::<SuggestedInputs>(extract_json_block(content)) {
        Ok(mut value) => {
            if non_empty(value.explanation.as_deref()).is_none() {
                value.explanation = Some(DEFAULT_EXPLANATION.to_string());
            }
            ParseOutcome::Parsed(value)
        }
        Err(_) => ParseOutcome::Unparsed {
            raw: content.to_string(),
        },
    }
}

fn patterns(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| Regex::new(&format!("(?i){}", source)).expect("valid regex"))
        .collect()
}

static KM_PER_LITER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    patterns(&[
        r"kmPerLiter[:\s]+(\d+\.?\d*)",
        r"(\d+\.?\d*)\s*km/L",
        r"(\d+\.?\d*)\s*km per liter",
        r"around (\d+\.?\d*)\s*km",
        r"estimate around (\d+\.?\d*)",
        r"estimate (\d+\.?\d*)\s*km",
    ])
});

static INSURANCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    patterns(&[
        r"insurancePerYear[:\s]+(\d[\d,]*)",
        r"insurance.*?[:\s]+(\d[\d,]{4,6})",
        r"(\d[\d,]{4,6})\s*(?:THB|baht)",
        r"estimate around (\d[\d,]{4,6})",
    ])
});

static DEPRECIATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    patterns(&[
        r"depreciationRatePerYear[:\s]+(\d+\.?\d*)",
        r"(\d+\.?\d*)%\s*per year",
        r"(\d+\.?\d*)%\s*depreciation",
        r"around (\d+\.?\d*)%",
    ])
});

static PARKING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    patterns(&[
        r"parkingTollPerMonth[:\s]+(\d[\d,]*)",
        r"parking[:\s]+(\d[\d,]{3,5})",
        r"(\d[\d,]{3,5})\s*(?:THB|baht).*month",
        r"(\d[\d,]{3,5})\s*(?:THB|baht).*เดือน",
        r"estimate around (\d[\d,]{3,5})",
    ])
});

/// First pattern that matches wins; thousands separators are ignored
fn first_number(text: &str, patterns: &[Regex]) -> Option<f64> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
    })
}

/// Scrape prefill numbers out of free-form reasoning text
pub fn parse_from_reasoning(reasoning: &str) -> SuggestedInputs {
    SuggestedInputs {
        km_per_liter: first_number(reasoning, &KM_PER_LITER_PATTERNS),
        insurance_per_year: first_number(reasoning, &INSURANCE_PATTERNS).map(f64::trunc),
        depreciation_rate_per_year: first_number(reasoning, &DEPRECIATION_PATTERNS),
        parking_toll_per_month: first_number(reasoning, &PARKING_PATTERNS).map(f64::trunc),
        explanation: None,
    }
}
