use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;

pub const DEFAULT_TEMPERATURE: f32 = 0.5;

const CATEGORIES: &str =
    "Indian Wear, Plus Size, Western, Sports Wear, Inner Wear & Sleep Wear, Lingerie & Sleep Wear";

const INDIVIDUAL_CATEGORIES: &str = "kurta-sets, kurtas, tops, thermal-tops, jeans, skirts, shorts, \
     trousers, palazzos, jumpsuit, co-ords, clothing-set, kurtis, tunics";

const COLOURS: &str = "Black, Orange, Navy Blue, Red, Beige, Yellow, Green, Mustard, Teal, Peach, \
     Blue, Sea Green, Pink, Burgundy, Maroon, Lavender, Purple, White, Grey, Lime Green, Brown, \
     Cream, Rust, Off White, Turquoise Blue, Multi, Mauve, Assorted, Magenta, Fuchsia, Coral, \
     Olive, Rose, Gold, Fluorescent Green, Silver, Nude, Violet, Charcoal, Grey Melange, Khaki, \
     Coffee Brown, Taupe, Copper";

/// Builds the attribute-extraction prompt for a shopper's conversation.
///
/// The reply format is one `Key: "value"` per line, which is what
/// [`crate::attributes::parse_attributes`] reads back.
pub fn build_prompt(conversation: &str) -> String {
    format!(
        r#"## CONTEXT ##
Analyze the following fashion e-commerce conversation history:
{conversation}

## TASK ##
Extract and infer the customer's primary product request using only the parameters below. If several products are mentioned, focus on the first or main one. Make reasonable assumptions from context but do not introduce information outside the given categories.

## GUIDELINES ##
1. Category: choose ONE from {CATEGORIES}. If none fit, use "Other".
2. Individual Category: choose ONE from {INDIVIDUAL_CATEGORIES}. If none fit, use "Other".
3. Category by Gender: choose Women or Men.
4. Colour: choose from {COLOURS}. If the colour is not listed, use "Other".
5. Move On: "true" only if Category, Individual Category and one of Colour or Category by Gender are known for the main product, otherwise "false".
6. Follow-up Message: when Move On is "true", confirm that the search is starting. When it is "false", ask for the missing information. If a non-fashion product is requested, explain that only fashion products can be shown.

## IMPORTANT NOTES ##
- Stick strictly to the categories provided.
- If information for a parameter is not available and cannot be inferred, use "NA".

## OUTPUT FORMAT ##
Category: "..."
Individual_category: "..."
category_by_Gender: "..."
colour: "..."
MOVE_ON: "true" or "false"
FOLLOW_UP_MESSAGE: "..."

Your Input: {conversation}
Your output:
"#
    )
}

/// Turns a conversation into the model's raw attribute reply.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, conversation: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// [`Extractor`] backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsExtractor {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatCompletionsExtractor {
    pub fn new(base_url: &str, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn from_config() -> Result<Self> {
        let api_key = CONFIG
            .llm_api_key
            .clone()
            .ok_or_else(|| anyhow!("Missing required environment variable: GROQ_API_KEY"))?;
        log::info!("LLM model: {}", CONFIG.llm_model_name);
        Ok(Self::new(
            &CONFIG.llm_base_url,
            api_key,
            CONFIG.llm_model_name.clone(),
        ))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Extractor for ChatCompletionsExtractor {
    async fn extract(&self, conversation: &str) -> Result<String> {
        let prompt = build_prompt(conversation);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("chat completion request failed")?
            .error_for_status()
            .context("chat completion endpoint returned an error")?;

        let body: ChatResponse = response
            .json()
            .await
            .context("chat completion response was not valid JSON")?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("chat completion returned no content"))?;

        log::debug!("extractor response: {}", content.trim());
        Ok(content.trim().to_string())
    }
}

#[test]
fn test_prompt_mentions_conversation_twice() {
    let prompt = build_prompt("I need black women jeans");
    assert_eq!(prompt.matches("I need black women jeans").count(), 2);
    assert!(prompt.contains("FOLLOW_UP_MESSAGE:"));
    assert!(prompt.contains("kurta-sets"));
}

#[test]
fn test_endpoint_joins_without_double_slash() {
    let extractor = ChatCompletionsExtractor::new("https://api.example.com/v1/", "k", "m");
    assert_eq!(
        extractor.endpoint(),
        "https://api.example.com/v1/chat/completions"
    );
}
