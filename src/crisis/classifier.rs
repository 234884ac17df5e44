// Tiered crisis keyword classifier
//
// Static substring lookup, not NLP: no tokenization, no stemming, no
// fuzzy matching. Tiers are scanned critical -> high -> medium so a
// low-severity keyword can never shadow a more severe phrase that
// contains it.

use serde::{Deserialize, Serialize};

/// Crisis severity tier assigned by keyword match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn is_crisis(self) -> bool {
        self != Severity::None
    }
}

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq)]
pub struct CrisisMatch {
    pub severity: Severity,
    /// The keyword that triggered the match; empty when severity is none.
    pub keyword: String,
    /// Fixed resource response for the matched tier; empty when none.
    pub response: String,
}

impl CrisisMatch {
    fn none() -> Self {
        Self {
            severity: Severity::None,
            keyword: String::new(),
            response: String::new(),
        }
    }
}

/// Direct expressions of suicidal ideation or self-harm.
const CRITICAL_KEYWORDS: &[&str] = &[
    "自杀",
    "想死",
    "不想活",
    "结束生命",
    "活着没意思",
    "自残",
    "伤害自己",
];

/// Expressions of hopelessness without a direct ideation phrase.
const HIGH_KEYWORDS: &[&str] = &[
    "绝望",
    "无望",
    "没有希望",
    "没有出路",
    "无法承受",
    "坚持不下去",
];

/// Acute distress below the hopelessness tier.
const MEDIUM_KEYWORDS: &[&str] = &["崩溃", "撑不住", "快不行了", "活得好累"];

const CRITICAL_RESPONSE: &str = "我听到你感觉很绝望，你现在的安全是最重要的。\
请立即拨打心理危机干预热线：400-161-9995。如果你处于紧急危险中，请拨打110或120。\
你不是一个人，专业的帮助就在电话那头。";

const HIGH_RESPONSE: &str = "我感受到你现在非常无助。这样的感受值得被认真对待，\
请考虑拨打心理援助热线：400-161-9995，和专业人员聊一聊。我也会一直在这里陪你。";

const MEDIUM_RESPONSE: &str = "听起来你正承受着很大的压力。如果感觉撑不住了，\
可以拨打心理咨询热线：400-161-9995，也可以先和我说说发生了什么。";

/// Stateless keyword classifier.
///
/// Keeps an ordered list of (keyword, tier) entries partitioned by
/// severity; classification is first-contains-wins over the normalized
/// input.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify raw message text. Empty input always yields `none`.
    pub fn classify(&self, text: &str) -> CrisisMatch {
        if text.is_empty() {
            return CrisisMatch::none();
        }

        let normalized = text.to_lowercase();

        let tiers = [
            (Severity::Critical, CRITICAL_KEYWORDS, CRITICAL_RESPONSE),
            (Severity::High, HIGH_KEYWORDS, HIGH_RESPONSE),
            (Severity::Medium, MEDIUM_KEYWORDS, MEDIUM_RESPONSE),
        ];

        for (severity, keywords, response) in tiers {
            for keyword in keywords {
                if normalized.contains(keyword) {
                    tracing::warn!(
                        severity = ?severity,
                        keyword = %keyword,
                        "Crisis keyword detected"
                    );
                    return CrisisMatch {
                        severity,
                        keyword: (*keyword).to_string(),
                        response: response.to_string(),
                    };
                }
            }
        }

        CrisisMatch::none()
    }
}
