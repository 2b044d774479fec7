//! Profile-styled coaching response generation.
//!
//! Every answer is produced by "Julia", the DISC 4Colors coach persona. The
//! system prompt combines the persona identity, a fixed tone directive per
//! profile and the retrieved context snippets in order. The yellow profile
//! runs at a higher temperature than the others; that is the intended
//! per-profile creativity dial, not a tuning leftover.

use crate::error::{Result, TeinteError};
use crate::openai::create_client;
use crate::profile::Profile;
use crate::retrieval::join_context;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Trait for coaching answer generation.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce an answer to `question` styled for `profile`, grounded in the
    /// given context snippets (possibly empty).
    async fn generate(&self, question: &str, context: &[String], profile: Profile)
        -> Result<String>;
}

/// Tone directive injected into the system prompt, one per profile.
pub fn tone_directive(profile: Profile) -> &'static str {
    match profile {
        Profile::Red => "Réponses concises orientées action",
        Profile::Yellow => "Ton enthousiaste avec métaphores inspirantes",
        Profile::Green => "Approche empathique et collaborative",
        Profile::Blue => "Structure logique avec données tangibles",
    }
}

/// Generates coaching answers conditioned on the active profile.
pub struct CoachResponder {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    base_temperature: f32,
    creative_temperature: f32,
}

impl CoachResponder {
    /// Create a new responder with default settings.
    pub fn new() -> Self {
        Self::with_config("gpt-4-turbo", 0.4, 0.7)
    }

    /// Create a new responder with custom model and temperatures.
    pub fn with_config(model: &str, base_temperature: f32, creative_temperature: f32) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            base_temperature,
            creative_temperature,
        }
    }

    /// Temperature applied for a profile (yellow gets the creative dial).
    pub fn temperature_for(&self, profile: Profile) -> f32 {
        match profile {
            Profile::Yellow => self.creative_temperature,
            _ => self.base_temperature,
        }
    }

    /// Build the persona system prompt for a profile and context.
    ///
    /// Snippets are concatenated as given; no re-ranking happens here.
    pub fn build_system_prompt(&self, profile: Profile, context: &[String]) -> String {
        format!(
            "Tu es Julia, coach experte en profils DISC 4Colors.\n\
             Style requis : {}\n\
             Contexte utile : {}",
            tone_directive(profile),
            join_context(context)
        )
    }
}

#[async_trait]
impl Responder for CoachResponder {
    /// Generate a coaching answer for a question.
    ///
    /// An empty context is acceptable; the persona still answers from its
    /// general coaching instruction.
    #[instrument(skip(self, context), fields(profile = %profile))]
    async fn generate(
        &self,
        question: &str,
        context: &[String],
        profile: Profile,
    ) -> Result<String> {
        let system_prompt = self.build_system_prompt(profile, context);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(|e| TeinteError::Generation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(question)
                .build()
                .map_err(|e| TeinteError::Generation(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature_for(profile))
            .build()
            .map_err(|e| TeinteError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| TeinteError::Generation(format!("Chat API error: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| TeinteError::Generation("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated {} char answer", answer.len());
        Ok(answer)
    }
}

impl Default for CoachResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_profile_has_a_tone_directive() {
        for profile in Profile::ALL {
            assert!(!tone_directive(profile).is_empty());
        }
    }

    #[test]
    fn test_yellow_uses_creative_temperature() {
        let responder = CoachResponder::with_config("gpt-4-turbo", 0.4, 0.7);
        assert!((responder.temperature_for(Profile::Yellow) - 0.7).abs() < f32::EPSILON);
        for profile in [Profile::Red, Profile::Green, Profile::Blue] {
            assert!((responder.temperature_for(profile) - 0.4).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_system_prompt_keeps_snippet_order() {
        let responder = CoachResponder::new();
        let context = vec!["premier extrait".to_string(), "second extrait".to_string()];
        let prompt = responder.build_system_prompt(Profile::Green, &context);

        assert!(prompt.contains("Julia"));
        assert!(prompt.contains(tone_directive(Profile::Green)));
        let first = prompt.find("premier extrait").unwrap();
        let second = prompt.find("second extrait").unwrap();
        assert!(first < second);
    }
}
