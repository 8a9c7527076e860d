use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::web::models::{ChatMessage, Role};

/// Literal used wherever an unrecognised condition has to be shown as text.
pub const UNKNOWN_CONDITION: &str = "Unknown";

static AFFECTED_BY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"affected by: \*\*(.*?)\*\*").expect("condition pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionSource {
    /// Explicit `condition` field on the message.
    Tagged,
    /// Recovered from the `affected by: **NAME**` prose template.
    Heuristic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Known { name: String, source: ConditionSource },
    Unknown,
}

impl Condition {
    pub fn name(&self) -> &str {
        match self {
            Condition::Known { name, .. } => name,
            Condition::Unknown => UNKNOWN_CONDITION,
        }
    }
}

/// Recovers the detected condition from the first assistant message.
pub fn extract_condition(transcript: &[ChatMessage]) -> Condition {
    let Some(first) = transcript.iter().find(|m| m.role == Role::Assistant) else {
        warn!("No assistant message in transcript, condition unknown");
        return Condition::Unknown;
    };

    if let Some(name) = first.condition.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        debug!("Condition from tagged field: {}", name);
        return Condition::Known {
            name: name.to_string(),
            source: ConditionSource::Tagged,
        };
    }

    match AFFECTED_BY
        .captures(&first.content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
    {
        Some(name) => {
            debug!("Condition from message text: {}", name);
            Condition::Known {
                name: name.to_string(),
                source: ConditionSource::Heuristic,
            }
        }
        None => {
            warn!("First assistant message does not name a condition, condition unknown");
            Condition::Unknown
        }
    }
}
