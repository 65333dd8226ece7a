use serde::{Deserialize, Serialize};

/// Client-side session store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How many of the most recent messages travel with each request
    pub history_window: usize,
    /// Title length cap, in characters
    pub title_max_chars: usize,
    /// Placeholder title a session keeps until its first user text
    pub default_title: String,
    /// Assistant message seeded into new and cleared sessions
    pub greeting: String,
    /// Key the whole session collection is stored under
    pub storage_key: String,
    pub storage: StorageBackendType,
    /// Base URL of the gateway; empty means same origin
    pub gateway_base: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            title_max_chars: 24,
            default_title: DEFAULT_TITLE.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            storage_key: "chatdeck:sessions".to_string(),
            storage: StorageBackendType::Auto,
            gateway_base: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    LocalStorage,
}

/// Server-side provider settings used by the completion gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_base: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system_prompt: String,
    /// Text part used when an image arrives without a message
    pub image_prompt: String,
    /// Upper bound on history entries accepted from a client
    pub max_history: usize,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            api_base: None,
            max_tokens: 1200,
            temperature: 0.25,
            system_prompt: DEFAULT_SYSTEM_PROMPT.trim().to_string(),
            image_prompt: DEFAULT_IMAGE_PROMPT.to_string(),
            max_history: 12,
            timeout_secs: 60,
        }
    }
}

impl ProviderConfig {
    pub fn base_url(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| self.provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    OpenAI,
    DeepSeek,
    Custom,
}

impl LlmProvider {
    pub fn default_base_url(&self) -> &str {
        match self {
            LlmProvider::OpenAI => "https://api.openai.com",
            LlmProvider::DeepSeek => "https://api.deepseek.com",
            LlmProvider::Custom => "",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::DeepSeek => "DeepSeek",
            LlmProvider::Custom => "Custom",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "openai" => Some(LlmProvider::OpenAI),
            "deepseek" => Some(LlmProvider::DeepSeek),
            "custom" => Some(LlmProvider::Custom),
            _ => None,
        }
    }
}

pub const DEFAULT_TITLE: &str = "New chat";

/// Appended to an assistant turn whose reply text came back empty
pub const NO_REPLY_FALLBACK: &str = "No response.";

/// Written to the session when the gateway could not be reached at all
pub const CONNECTION_ERROR: &str = "Could not reach the server. Check that the gateway is running.";

const DEFAULT_GREETING: &str = "Hi! I'm your coding assistant.

I can:
- Debug errors in any language
- Write HTML/CSS/JS
- Analyze screenshots of errors or UIs

Send an error log or a screenshot to get started.";

const DEFAULT_IMAGE_PROMPT: &str = "Analyze this image accurately.";

const DEFAULT_SYSTEM_PROMPT: &str = r#"
You are a coding and debugging assistant.
You are fluent in Java, Kotlin, JavaScript, TypeScript, Python, C/C++, PHP, Go, Rust, Dart, C#, SQL and Bash.

Rules:
- Be accurate. Do not make things up.
- Be brief and to the point.
- If information is missing, ask at most two important questions.
- When given an error log: name the main error, its technical cause, a quick fix and a full fix with example code.
- When given code: fix it directly.
- When given a screenshot: read it carefully, describe what is visible and propose a fix.
- Keep the output well formatted.

Default format:
Diagnosis:
Cause:
Quick fix:
Full fix:
Example code:
Notes:
"#;
