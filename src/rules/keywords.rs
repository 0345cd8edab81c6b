//! Investment keywords.
//!
//! Terms in the categorical fields that point at capital expenditure
//! (machinery, tractors, implements, improvements, ...). Matching is substring
//! containment on normalized text; any hit is enough, so the order of the set
//! is irrelevant.

/// Normalized investment keywords.
pub const INVESTMENT_KEYWORDS: [&str; 11] = [
    "maquina",
    "trator",
    "implemento",
    "tecnologia",
    "reforma",
    "infraestrutura",
    "melhoria",
    "equipamento",
    "benfeitoria",
    "instalacao",
    "capital",
];

/// First keyword found in already-normalized `text`, if any.
pub fn find_investment_keyword(text: &str) -> Option<&'static str> {
    INVESTMENT_KEYWORDS.iter().copied().find(|kw| text.contains(kw))
}
