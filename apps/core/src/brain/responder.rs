//! Response classification using ordered keyword rules.
//!
//! Each rule pairs a category with its keyword set and a canned reply. Rules are tested
//! in table order and the first rule with any matching keyword wins. Crisis is always the
//! first rule.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Category assigned to a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    /// Self-harm or suicide intent
    Crisis,
    Anxiety,
    Depression,
    Sleep,
    Stress,
    /// No keyword matched
    Default,
}

impl fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ResponseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ResponseCategory::Crisis => "crisis",
            ResponseCategory::Anxiety => "anxiety",
            ResponseCategory::Depression => "depression",
            ResponseCategory::Sleep => "sleep",
            ResponseCategory::Stress => "stress",
            ResponseCategory::Default => "default",
        }
    }
}

pub const CRISIS_HOTLINE: &str = "988";
pub const CRISIS_TEXT_LINE: &str = "741741";

pub const CRISIS_REPLY: &str = "I'm concerned about what you're sharing. Your life matters, and help is available. Please call 988 (Suicide & Crisis Lifeline) right now for immediate support. You can also text 'HELLO' to 741741 for crisis text support.";

pub const DEFAULT_REPLY: &str = "Thank you for sharing that with me. Your feelings are valid and important. Can you tell me more about what you're experiencing? I'm here to listen and provide support.";

/// Attention-demanding alert raised alongside a crisis reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAlert {
    pub title: String,
    pub description: String,
    /// Number the alert directs the user to call
    pub hotline: String,
}

impl SafetyAlert {
    fn crisis() -> Self {
        Self {
            title: "Crisis Support Activated".to_string(),
            description: format!("Please call {} for immediate support", CRISIS_HOTLINE),
            hotline: CRISIS_HOTLINE.to_string(),
        }
    }
}

/// Receives safety alerts produced by crisis classifications.
///
/// The presentation layer implements this to show a blocking alert.
pub trait AlertSink: Send + Sync {
    fn raise(&self, alert: &SafetyAlert);
}

/// Alert sink that only records the alert in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn raise(&self, alert: &SafetyAlert) {
        warn!(hotline = %alert.hotline, "{}: {}", alert.title, alert.description);
    }
}

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: ResponseCategory,
    pub reply: String,
    /// Keyword that selected the rule, `None` for the default reply
    pub matched_keyword: Option<String>,
    /// Present only for crisis messages
    pub alert: Option<SafetyAlert>,
}

impl Classification {
    pub fn is_crisis(&self) -> bool {
        self.category == ResponseCategory::Crisis
    }
}

/// One row of the rule table.
pub struct ResponseRule {
    pub category: ResponseCategory,
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

/// Ordered rule table, highest priority first.
pub const RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        category: ResponseCategory::Crisis,
        keywords: &["suicide", "kill myself", "end it all"],
        reply: CRISIS_REPLY,
    },
    ResponseRule {
        category: ResponseCategory::Anxiety,
        keywords: &["anxious", "anxiety", "worried"],
        reply: "I hear that you're feeling anxious. Let's try a quick breathing exercise: Breathe in for 4 counts, hold for 4, exhale for 4. This can help calm your nervous system. Would you like to explore what's causing these feelings?",
    },
    ResponseRule {
        category: ResponseCategory::Depression,
        keywords: &["depressed", "sad", "hopeless"],
        reply: "I understand you're going through a difficult time. Depression can feel overwhelming, but you're not alone. Have you been able to do any activities you usually enjoy, even small ones? Sometimes starting with tiny steps can help.",
    },
    ResponseRule {
        category: ResponseCategory::Sleep,
        keywords: &["sleep", "insomnia", "tired"],
        reply: "Sleep issues can really impact your wellbeing. Try creating a calming bedtime routine: avoid screens 1 hour before bed, keep your room cool and dark, and consider relaxation techniques. How long have you been experiencing sleep difficulties?",
    },
    ResponseRule {
        category: ResponseCategory::Stress,
        keywords: &["stress", "overwhelmed", "pressure"],
        reply: "Academic stress is very common. Let's break this down: What's your biggest stressor right now? Sometimes organizing tasks into smaller, manageable pieces can make them feel less overwhelming. Have you tried any stress management techniques before?",
    },
];

/// Compiled keyword set for a rule
struct CompiledRule {
    rule: &'static ResponseRule,
    patterns: Vec<(&'static str, Regex)>,
}

// Keywords are literal substrings, escaped so they are not read as regex syntax.
// Case folding is ASCII-only (`-u`), matching a plain lower-case comparison.
// NOTE: expect() is acceptable here, the inputs are escaped compile-time constants.
static COMPILED_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    RESPONSE_RULES
        .iter()
        .map(|rule| CompiledRule {
            rule,
            patterns: rule
                .keywords
                .iter()
                .map(|kw| {
                    let pattern = format!("(?i-u){}", regex::escape(kw));
                    (*kw, Regex::new(&pattern).expect("Invalid regex: escaped keyword"))
                })
                .collect(),
        })
        .collect()
});

/// Rule-based classifier for chat messages
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseClassifier;

impl ResponseClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a message. Never fails; unmatched text gets the default reply.
    pub fn classify(&self, text: &str) -> Classification {
        for compiled in COMPILED_RULES.iter() {
            let hit = compiled
                .patterns
                .iter()
                .find(|(_, pattern)| pattern.is_match(text));

            if let Some((keyword, _)) = hit {
                let category = compiled.rule.category;
                debug!(%category, keyword, "message classified");
                return Classification {
                    category,
                    reply: compiled.rule.reply.to_string(),
                    matched_keyword: Some((*keyword).to_string()),
                    alert: (category == ResponseCategory::Crisis).then(SafetyAlert::crisis),
                };
            }
        }

        debug!(category = %ResponseCategory::Default, "no keyword matched");
        Classification {
            category: ResponseCategory::Default,
            reply: DEFAULT_REPLY.to_string(),
            matched_keyword: None,
            alert: None,
        }
    }

    /// Like [`classify`](Self::classify) but rejects empty or whitespace-only input.
    pub fn classify_input(&self, text: &str) -> Option<Classification> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.classify(text))
    }
}
