//! Branch-point pickers for the CLI

use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, FuzzySelect};
use river_core::{AlwaysCancel, Choice, Disambiguator, FirstCandidate, NoteId};
use tracing::warn;

use crate::cli::PickMode;

/// Interactive fuzzy picker; Esc or `q` cancels
pub struct PromptPicker {
    prompt: String,
}

impl PromptPicker {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Default for PromptPicker {
    fn default() -> Self {
        Self::new("Choose the next note")
    }
}

#[async_trait]
impl Disambiguator for PromptPicker {
    async fn choose_one(&self, candidates: &[NoteId]) -> Choice {
        if candidates.is_empty() {
            return Choice::Cancelled;
        }

        let items: Vec<String> = candidates.iter().map(ToString::to_string).collect();
        let prompt = self.prompt.clone();
        let selection = tokio::task::spawn_blocking(move || {
            FuzzySelect::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .items(&items)
                .default(0)
                .interact_opt()
        })
        .await;

        match selection {
            Ok(Ok(Some(index))) => candidates
                .get(index)
                .cloned()
                .map_or(Choice::Cancelled, Choice::Chosen),
            Ok(Ok(None)) => Choice::Cancelled,
            Ok(Err(e)) => {
                warn!(error = %e, "picker unavailable, treating as cancelled");
                Choice::Cancelled
            }
            Err(e) => {
                warn!(error = %e, "picker task failed");
                Choice::Cancelled
            }
        }
    }
}

/// Picker for a configured mode
pub fn picker_for(mode: PickMode) -> Box<dyn Disambiguator> {
    match mode {
        PickMode::Prompt => Box::new(PromptPicker::default()),
        PickMode::First => Box::new(FirstCandidate),
        PickMode::Cancel => Box::new(AlwaysCancel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_interactive_modes() {
        let candidates = vec![NoteId::new("b.md"), NoteId::new("c.md")];

        assert_eq!(
            picker_for(PickMode::First).choose_one(&candidates).await,
            Choice::Chosen(NoteId::new("b.md"))
        );
        assert_eq!(
            picker_for(PickMode::Cancel).choose_one(&candidates).await,
            Choice::Cancelled
        );
    }

    #[tokio::test]
    async fn test_prompt_with_nothing_to_pick() {
        assert_eq!(PromptPicker::default().choose_one(&[]).await, Choice::Cancelled);
    }
}
