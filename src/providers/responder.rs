// Deterministic responder, the last tier of the gateway
//
// Pure function over the raw input text. Themes are checked in order;
// the generic line answers everything else, so this tier can never come
// up empty. Crisis detection runs long before this and is not repeated
// here.

/// Fixed empathetic reply for fatigue, stress, or anxiety themes.
const FATIGUE_REPLY: &str = "我听到你感觉很疲惫。能够说说是什么让你感到这么累吗？";
/// Fixed reply for sadness or grief themes.
const SADNESS_REPLY: &str =
    "我感受到你现在的难过。眼泪有时候是情绪的出口，想说说我能为你做些什么吗？";
/// Fixed reply for gratitude or closure themes.
const GRATITUDE_REPLY: &str = "不用谢。我在这里陪你。还想聊些什么吗？";
/// Generic "I'm listening" line when no theme matches.
pub const GENERIC_REPLY: &str = "我在这里听你说。如果愿意的话，可以多说说你的想法和感受。";

const FATIGUE_THEMES: &[&str] = &["累", "压力", "焦虑", "烦"];
const SADNESS_THEMES: &[&str] = &["难过", "伤心", "哭", "抑郁"];
// Keep gratitude markers multi-character: a bare "好" would swallow
// greetings like "你好" that belong to the generic line.
const GRATITUDE_THEMES: &[&str] = &["谢谢", "感谢", "好的"];

/// Produce a reply without any provider. Always returns a non-empty line.
pub fn respond(text: &str) -> &'static str {
    let normalized = text.to_lowercase();

    if FATIGUE_THEMES.iter().any(|t| normalized.contains(t)) {
        return FATIGUE_REPLY;
    }
    if SADNESS_THEMES.iter().any(|t| normalized.contains(t)) {
        return SADNESS_REPLY;
    }
    if GRATITUDE_THEMES.iter().any(|t| normalized.contains(t)) {
        return GRATITUDE_REPLY;
    }

    GENERIC_REPLY
}
