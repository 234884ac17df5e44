// Context window construction for provider calls

use crate::errors::ChatError;
use crate::session::Message;

/// Default number of conversation turns carried into the context window.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Build the bounded message sequence sent to a provider: the system
/// instruction first, then the tail of the conversation — stored history
/// plus the new user message — capped at `max_turns` messages, in their
/// original order. The new user message is always the last element.
///
/// `max_turns` counts turns of either role, not user turns. Matches the
/// reference behavior of slicing the last N turns after the new message
/// joins the conversation.
pub fn build_context(
    history: &[Message],
    new_user_text: &str,
    system_prompt: &str,
    max_turns: usize,
) -> Result<Vec<Message>, ChatError> {
    if max_turns == 0 {
        return Err(ChatError::InvalidContextWindow);
    }

    // The new user turn occupies the final slot of the window.
    let retained = history.len().min(max_turns - 1);
    let start = history.len() - retained;

    let mut window = Vec::with_capacity(retained + 2);
    window.push(Message::system(system_prompt));
    window.extend_from_slice(&history[start..]);
    window.push(Message::user(new_user_text));

    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    fn history_of(len: usize) -> Vec<Message> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("u{}", i))
                } else {
                    Message::assistant(format!("a{}", i))
                }
            })
            .collect()
    }

    #[test]
    fn test_window_over_long_history() {
        let history = history_of(25);

        let window = build_context(&history, "最近睡不好", "系统提示", 10).unwrap();

        // system + last 9 stored turns + new user turn
        assert_eq!(window.len(), 11);
        assert_eq!(window[0].role, Role::System);
        assert_eq!(window[0].content, "系统提示");
        assert_eq!(window[1].content, history[16].content);
        assert_eq!(window[9].content, history[24].content);
        assert_eq!(window[10].role, Role::User);
        assert_eq!(window[10].content, "最近睡不好");
    }

    #[test]
    fn test_short_history_is_kept_whole() {
        let history = history_of(3);

        let window = build_context(&history, "hi", "sys", 10).unwrap();

        assert_eq!(window.len(), 5);
        assert_eq!(window[1].content, "u0");
        assert_eq!(window[3].content, "u2");
        assert_eq!(window[4].content, "hi");
    }

    #[test]
    fn test_relative_order_preserved() {
        let history = history_of(6);

        let window = build_context(&history, "next", "sys", 4).unwrap();

        let contents: Vec<&str> = window[1..4].iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a3", "u4", "a5"]);
        assert_eq!(window.last().unwrap().content, "next");
    }

    #[test]
    fn test_zero_max_turns_rejected() {
        let result = build_context(&[], "hi", "sys", 0);
        assert!(matches!(result, Err(ChatError::InvalidContextWindow)));
    }

    #[test]
    fn test_empty_history() {
        let window = build_context(&[], "你好", "sys", 10).unwrap();

        assert_eq!(window.len(), 2);
        assert_eq!(window[0].role, Role::System);
        assert_eq!(window[1].content, "你好");
    }

    #[test]
    fn test_window_of_one_keeps_only_new_message() {
        let history = history_of(4);

        let window = build_context(&history, "only", "sys", 1).unwrap();

        assert_eq!(window.len(), 2);
        assert_eq!(window[1].content, "only");
    }
}
