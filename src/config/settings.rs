// Configuration structs

use serde::Deserialize;

use crate::context::DEFAULT_MAX_TURNS;

/// System instruction sent as the first message of every context window.
pub const DEFAULT_SYSTEM_PROMPT: &str = "你是一个温暖、专业AI心理陪伴助手，名为\"可意\"。

核心理念：
- 温暖：让人感到被接纳，不评判
- 专业：基于心理学原理回应
- 智慧：帮助用户看到盲点
- 边界：知道什么是AI能做的，什么不能

响应原则：
1. 先共情，再引导
2. 不急于给建议，先倾听
3. 用开放式问题帮助用户探索
4. 保持温暖和耐心
5. 如果用户提到想死、自杀等念头，要引导他们寻求专业帮助

禁止行为：
- 不给出具体的医疗诊断
- 不替代专业心理治疗
- 不在用户强烈反对时就医建议
- 不泄露用户隐私

用户现在想和你聊聊，请根据以上原则回应。";

/// One configured completion provider, in priority order.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEntry {
    /// "zhipu" or "openai"
    pub provider: String,
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Providers in priority order. May be empty; the deterministic
    /// responder then answers every turn.
    #[serde(default)]
    pub providers: Vec<ProviderEntry>,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Context window size in turns, including the new user turn.
    #[serde(default = "default_max_context_turns")]
    pub max_context_turns: usize,

    /// Whether the crisis resource reply is persisted into history.
    #[serde(default = "default_persist_crisis_reply")]
    pub persist_crisis_reply: bool,

    #[serde(default)]
    pub server: ServerSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            system_prompt: default_system_prompt(),
            max_context_turns: default_max_context_turns(),
            persist_crisis_reply: default_persist_crisis_reply(),
            server: ServerSettings::default(),
        }
    }
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_max_context_turns() -> usize {
    DEFAULT_MAX_TURNS
}

fn default_persist_crisis_reply() -> bool {
    true
}
