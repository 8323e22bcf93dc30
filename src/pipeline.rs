use crate::ai::{build_prompt, parse_flashcards, FlashcardGenerator, OpenRouterClient};
use crate::config::{AppConfig, MAX_ATTEMPTS_LIMIT};
use crate::error::Result;
use crate::models::{FlashcardRequest, GenerationOutcome};

/// Calls the generator, giving transient failures one more chance when
/// `max_attempts` allows it.
pub async fn request_with_retry<G>(generator: &G, prompt: &str, max_attempts: u32) -> Result<String>
where
    G: FlashcardGenerator + ?Sized,
{
    let max_attempts = max_attempts.clamp(1, MAX_ATTEMPTS_LIMIT);
    let mut attempt = 1;
    loop {
        match generator.generate(prompt).await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                tracing::warn!(
                    "Attempt {}/{} against {} failed: {}; retrying",
                    attempt,
                    max_attempts,
                    generator.model(),
                    e
                );
                attempt += 1;
            }
            Err(e) => {
                tracing::error!("Generation failed after {} attempt(s): {}", attempt, e);
                return Err(e);
            }
        }
    }
}

/// Runs prompt construction, the model call and response parsing for one
/// request. More or fewer cards than requested are kept as they are.
pub async fn generate_flashcards<G>(
    generator: &G,
    request: &FlashcardRequest,
    max_attempts: u32,
) -> Result<GenerationOutcome>
where
    G: FlashcardGenerator + ?Sized,
{
    let prompt = build_prompt(request);
    tracing::info!(
        "Generating {} {} flashcards with {} ({} chars of content)",
        request.count(),
        request.difficulty(),
        generator.model(),
        request.content().len()
    );
    tracing::debug!("Prompt:\n{}", prompt);

    let raw = request_with_retry(generator, &prompt, max_attempts).await?;
    tracing::debug!("Raw response:\n{}", raw);

    let flashcards = parse_flashcards(&raw)?;
    let outcome = GenerationOutcome {
        flashcards,
        requested: request.count(),
    };
    if !outcome.count_matches() {
        tracing::warn!(
            "Model returned {} flashcards, {} were requested",
            outcome.flashcards.len(),
            outcome.requested
        );
    }
    Ok(outcome)
}

/// Generates against the configured OpenRouter model. The client is built
/// per call so a missing credential is reported when the user asks for
/// cards, not at startup.
pub async fn generate_with_config(
    config: &AppConfig,
    request: &FlashcardRequest,
) -> Result<GenerationOutcome> {
    let client = OpenRouterClient::from_config(config)?;
    generate_flashcards(&client, request, config.max_attempts).await
}
