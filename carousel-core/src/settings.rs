//! User-tunable generation settings and their persistence boundary.

use serde::{Deserialize, Serialize};

/// Lowest accepted sampling temperature.
pub const TEMPERATURE_MIN: f32 = 0.0;
/// Highest accepted sampling temperature.
pub const TEMPERATURE_MAX: f32 = 2.0;
/// Temperature used when the store has no saved value.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Storage keys, kept stable so saved settings survive upgrades.
pub mod keys {
    /// System instruction for the slide-plan request.
    pub const IMAGE_PROMPT: &str = "image_prompt";
    /// System instruction for the caption request.
    pub const CAPTION_PROMPT: &str = "caption_prompt";
    /// Sampling temperature for both text requests.
    pub const TEMPERATURE: &str = "temperature";
}

/// Default system instruction for the slide-plan request.
///
/// Drives the whole content plan: the 5-part viral framework, the unified
/// visual theme, and the structured JSON output contract.
pub const DEFAULT_IMAGE_PROMPT_INSTRUCTION: &str = r#"You are an expert Viral Instagram Carousel creator and art director. Your role is to generate the complete content plan for a 5-slide carousel: the visual concepts AND the text for each slide. The entire carousel must be thematically and visually cohesive.

### Core Directive: Plan-then-Execute
Before generating the final JSON, you must first think step-by-step:
1.  **Analyze Topic:** Briefly state the user's core topic.
2.  **Define Unified Theme:** Explicitly define the `Color Palette`, `Artistic Style`, and `Overall Tone` you will use for ALL slides. This is the most critical step for consistency.
3.  **Map Content to Framework:** Briefly outline the concept for each of the 5 slides (Hook, Problem, Insight, Solution, CTA).
4.  **Generate JSON:** Construct the final JSON output based on your plan.

### The Content Framework
You must adapt the user's topic to the 'Viral 5-Framework Carousel', generating both an image prompt and overlay text for each slide.
1.  **Slide 1: Hook (Stop the Scroll)** - A big, bold, curiosity-driven opener.
2.  **Slide 2: Problem (Pain Point)** - Call out a common frustration or challenge.
3.  **Slide 3: Insight (The 'A-ha' Moment)** - Drop a key truth, reframe, or surprising insight.
4.  **Slide 4: Solution (The Core Value)** - Present the solution, tips, or core message clearly.
5.  **Slide 5: CTA (Engagement Driver)** - End with a strong, clear action.

### Image Generation Rules
Your `image_prompt` must be highly effective for a modern AI image model.
-   **Text Rendering:** Crucially, the image prompt MUST instruct the image model to **render the `header_text` and `subheader_text` directly onto the image** in a clean, legible font that matches the theme.
-   **Composition:** Ensure each slide, while harmonized, is visually distinct to keep the user engaged.
-   **Technical Specs:** Specify the aspect ratio is **vertical (1080x1350)**. Where appropriate, use negative prompts (`--no`) to exclude unwanted elements (e.g., `--no blurry text, ugly hands, watermarks`).

### Output Format Rules
-   Return a single, valid JSON object.
-   The JSON object must have one key: "slides".
-   The value of "slides" must be an array of exactly 5 objects.
-   Each object in the array must have three string keys: "image_prompt", "header_text", and "subheader_text"."#;

/// Default system instruction for the caption request.
pub const DEFAULT_CAPTION_INSTRUCTION: &str = r"You are a world-class Instagram copywriter. Your goal is to write a viral, engaging caption for a 5-slide carousel post.
You will be given the content of the 5 slides.
Your caption MUST:
-   Be between 100-200 words.
-   Start with a strong, scroll-stopping hook.
-   Provide value and context for the carousel slides.
-   End with a clear call-to-action (e.g., asking a question, asking to save/share).
-   Include 5-10 relevant, high-traffic hashtags.
-   Have a professional yet conversational tone.
-   Be formatted with line breaks for readability.";

/// Key-value persistence boundary for settings.
///
/// Implementations are external to the state core; absent keys mean
/// "use the built-in default".
pub trait SettingsStore {
    /// Read a value, if present.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&mut self, key: &str, value: &str);
    /// Remove a value, reverting that setting to its default.
    fn remove(&mut self, key: &str);
}

/// The three user-tunable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioSettings {
    /// System instruction for the slide-plan request.
    pub image_prompt_instruction: String,
    /// System instruction for the caption request.
    pub caption_instruction: String,
    /// Sampling temperature, clamped to `[TEMPERATURE_MIN, TEMPERATURE_MAX]`.
    pub temperature: f32,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            image_prompt_instruction: DEFAULT_IMAGE_PROMPT_INSTRUCTION.to_string(),
            caption_instruction: DEFAULT_CAPTION_INSTRUCTION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl StudioSettings {
    /// Clamp a temperature into the accepted range.
    #[must_use]
    pub fn clamp_temperature(temperature: f32) -> f32 {
        temperature.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX)
    }

    /// Load settings from a store, falling back to defaults for absent or
    /// unparsable values.
    #[must_use]
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();
        let temperature = store
            .get(keys::TEMPERATURE)
            .and_then(|raw| raw.parse::<f32>().ok())
            .map_or(defaults.temperature, Self::clamp_temperature);
        Self {
            image_prompt_instruction: store
                .get(keys::IMAGE_PROMPT)
                .unwrap_or(defaults.image_prompt_instruction),
            caption_instruction: store
                .get(keys::CAPTION_PROMPT)
                .unwrap_or(defaults.caption_instruction),
            temperature,
        }
    }

    /// Persist all three settings.
    pub fn save(&self, store: &mut dyn SettingsStore) {
        store.set(keys::IMAGE_PROMPT, &self.image_prompt_instruction);
        store.set(keys::CAPTION_PROMPT, &self.caption_instruction);
        store.set(keys::TEMPERATURE, &self.temperature.to_string());
    }

    /// Remove all three keys, reverting every setting to its default.
    pub fn reset(store: &mut dyn SettingsStore) {
        store.remove(keys::IMAGE_PROMPT);
        store.remove(keys::CAPTION_PROMPT);
        store.remove(keys::TEMPERATURE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemoryStore(BTreeMap<String, String>);

    impl SettingsStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
        fn set(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_string(), value.to_string());
        }
        fn remove(&mut self, key: &str) {
            self.0.remove(key);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_store() {
        let store = MemoryStore::default();
        let settings = StudioSettings::load(&store);
        assert_eq!(settings, StudioSettings::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = MemoryStore::default();
        let settings = StudioSettings {
            image_prompt_instruction: "custom plan instruction".to_string(),
            caption_instruction: "custom caption instruction".to_string(),
            temperature: 1.3,
        };
        settings.save(&mut store);
        assert_eq!(StudioSettings::load(&store), settings);
    }

    #[test]
    fn test_reset_removes_all_keys() {
        let mut store = MemoryStore::default();
        StudioSettings {
            temperature: 1.7,
            ..StudioSettings::default()
        }
        .save(&mut store);
        StudioSettings::reset(&mut store);
        assert_eq!(StudioSettings::load(&store), StudioSettings::default());
        assert!(store.0.is_empty());
    }

    #[test]
    fn test_unparsable_temperature_falls_back() {
        let mut store = MemoryStore::default();
        store.set(keys::TEMPERATURE, "hot");
        assert_eq!(
            StudioSettings::load(&store).temperature,
            DEFAULT_TEMPERATURE
        );
    }

    #[test]
    fn test_out_of_range_temperature_is_clamped() {
        let mut store = MemoryStore::default();
        store.set(keys::TEMPERATURE, "9.5");
        assert_eq!(StudioSettings::load(&store).temperature, TEMPERATURE_MAX);
        store.set(keys::TEMPERATURE, "-1");
        assert_eq!(StudioSettings::load(&store).temperature, TEMPERATURE_MIN);
    }
}
