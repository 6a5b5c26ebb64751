//! Mutable card form state and render scheduling.

use crate::input::{
    CardInput, ClassCount, FrameStyle, MAX_CLASSES, RACE_PRESETS, ROWS_PER_CLASS,
};
use crate::loader::{placeholder_image, DecodedImage, ImageLoader, LoadOutcome};
use crate::renderer::CardSurface;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Technique slots kept by the form, enough for the largest class count.
pub const TECHNIQUE_SLOTS: usize = MAX_CLASSES as usize * ROWS_PER_CLASS;

/// Every field of the card form.
///
/// Techniques are stored for all four classes so that lowering and raising
/// the class count keeps what was typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFields {
    pub title: String,
    pub username: String,
    pub monster_name: String,
    pub ex_name: String,
    pub battle_meme_name: String,
    pub race_preset: String,
    pub race_custom: String,
    pub frame_style: FrameStyle,
    pub class_count: ClassCount,
    /// Prefer an uploaded illustration over the placeholder when one is given.
    pub use_upload: bool,
    #[serde(deserialize_with = "technique_slots")]
    techniques: Vec<String>,
}

impl Default for CardFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            username: String::new(),
            monster_name: String::new(),
            ex_name: String::new(),
            battle_meme_name: String::new(),
            race_preset: RACE_PRESETS[0].to_string(),
            race_custom: String::new(),
            frame_style: FrameStyle::default(),
            class_count: ClassCount::default(),
            use_upload: true,
            techniques: vec![String::new(); TECHNIQUE_SLOTS],
        }
    }
}

fn technique_slots<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut slots = Vec::<String>::deserialize(deserializer)?;
    slots.resize(TECHNIQUE_SLOTS, String::new());
    Ok(slots)
}

impl CardFields {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// All technique slots, including those hidden by the class count.
    pub fn techniques(&self) -> &[String] {
        &self.techniques
    }

    pub fn technique(&self, index: usize) -> &str {
        self.techniques.get(index).map(String::as_str).unwrap_or("")
    }

    /// Set one technique slot. Indices past the last slot are ignored.
    pub fn set_technique(&mut self, index: usize, value: impl Into<String>) {
        match self.techniques.get_mut(index) {
            Some(slot) => *slot = value.into(),
            None => log::warn!("Ignoring technique for slot {index}, only {TECHNIQUE_SLOTS} exist"),
        }
    }

    /// Custom race when it has non-whitespace text, otherwise the preset.
    pub fn resolved_race(&self) -> &str {
        if self.race_custom.trim().is_empty() {
            &self.race_preset
        } else {
            &self.race_custom
        }
    }

    /// Immutable input for one render pass.
    pub fn snapshot(&self, illustration: Option<Arc<DecodedImage>>) -> CardInput {
        let mut input = CardInput::new(self.frame_style, self.class_count);
        input.title = self.title.clone();
        input.username = self.username.clone();
        input.monster_name = self.monster_name.clone();
        input.ex_name = self.ex_name.clone();
        input.battle_meme_name = self.battle_meme_name.clone();
        input.race = self.resolved_race().to_string();
        input.illustration = illustration;
        input.set_techniques(self.techniques.iter().take(self.class_count.slots()).cloned());
        input
    }
}

/// Owns the form fields and the render surface.
///
/// Every mutation marks the card dirty; [`CardEditor::flush`] then performs a
/// single render pass no matter how many mutations came before it.
pub struct CardEditor {
    fields: CardFields,
    illustration: Option<Arc<DecodedImage>>,
    placeholder: Arc<DecodedImage>,
    loader: ImageLoader,
    surface: Option<CardSurface>,
    render_pending: bool,
    render_count: usize,
}

impl CardEditor {
    /// Create an editor in the reset state with the first render scheduled.
    pub fn new(surface: Option<CardSurface>, placeholder_tile_size: u32) -> Self {
        let placeholder = Arc::new(placeholder_image(placeholder_tile_size));
        Self {
            fields: CardFields::default(),
            illustration: Some(placeholder.clone()),
            placeholder,
            loader: ImageLoader::new(placeholder_tile_size),
            surface,
            render_pending: true,
            render_count: 0,
        }
    }

    pub fn fields(&self) -> &CardFields {
        &self.fields
    }

    pub fn illustration(&self) -> Option<&Arc<DecodedImage>> {
        self.illustration.as_ref()
    }

    pub fn surface(&self) -> Option<&CardSurface> {
        self.surface.as_ref()
    }

    pub fn into_surface(self) -> Option<CardSurface> {
        self.surface
    }

    /// Loader whose tokens this editor honors.
    pub fn loader(&self) -> ImageLoader {
        self.loader.clone()
    }

    /// Mutate the fields and schedule a render.
    pub fn update(&mut self, f: impl FnOnce(&mut CardFields)) {
        f(&mut self.fields);
        self.schedule();
    }

    /// Replace every field at once.
    pub fn set_fields(&mut self, fields: CardFields) {
        self.update(|current| *current = fields);
    }

    /// Replace the illustration directly. Loads still in flight are superseded.
    pub fn set_illustration(&mut self, illustration: Option<Arc<DecodedImage>>) {
        self.loader.cancel();
        self.replace_illustration(illustration);
    }

    fn replace_illustration(&mut self, illustration: Option<Arc<DecodedImage>>) {
        self.illustration = illustration;
        self.schedule();
    }

    /// Apply a finished load if it is still the newest one. Returns whether it applied.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> bool {
        match outcome {
            LoadOutcome::Applied { token, image } if self.loader.is_current(token) => {
                self.replace_illustration(image);
                true
            }
            _ => {
                log::debug!("dropping stale illustration load");
                false
            }
        }
    }

    /// Restore every field to its default and show the placeholder again.
    /// Loads still in flight are superseded.
    pub fn reset(&mut self) {
        log::info!("resetting card");
        self.loader.cancel();
        self.fields = CardFields::default();
        self.illustration = Some(self.placeholder.clone());
        self.schedule();
    }

    pub fn snapshot(&self) -> CardInput {
        self.fields.snapshot(self.illustration.clone())
    }

    pub fn is_render_pending(&self) -> bool {
        self.render_pending
    }

    /// Number of render passes performed so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Run the scheduled render, if any. Returns whether a pass ran.
    pub fn flush(&mut self) -> bool {
        if !self.render_pending {
            return false;
        }
        self.render_pending = false;

        let input = self.snapshot();
        if crate::renderer::render(self.surface.as_mut(), &input) {
            self.render_count += 1;
            true
        } else {
            false
        }
    }

    fn schedule(&mut self) {
        self.render_pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::IllustrationSource;

    #[test]
    fn test_default_fields() {
        let fields = CardFields::default();
        assert_eq!(fields.techniques().len(), 24);
        assert!(fields.techniques().iter().all(String::is_empty));
        assert_eq!(fields.race_preset, RACE_PRESETS[0]);
        assert_eq!(fields.frame_style, FrameStyle::Neo);
        assert_eq!(fields.class_count.get(), 1);
    }

    #[test]
    fn test_resolved_race() {
        let mut fields = CardFields {
            race_preset: "魔族".into(),
            ..CardFields::default()
        };
        assert_eq!(fields.resolved_race(), "魔族");
        fields.race_custom = "  ".into();
        assert_eq!(fields.resolved_race(), "魔族");
        fields.race_custom = "Slime".into();
        assert_eq!(fields.resolved_race(), "Slime");
        fields.race_custom.clear();
        fields.race_preset.clear();
        assert_eq!(fields.resolved_race(), "");
    }

    #[test]
    fn test_snapshot_exposes_visible_slots() {
        let mut fields = CardFields::default();
        fields.set_technique(0, "first");
        fields.set_technique(13, "hidden");
        fields.set_technique(99, "ignored");

        let input = fields.snapshot(None);
        assert_eq!(input.techniques().len(), 6);
        assert_eq!(input.technique(0), "first");

        fields.class_count = ClassCount::new(3).unwrap();
        let input = fields.snapshot(None);
        assert_eq!(input.techniques().len(), 18);
        assert_eq!(input.technique(13), "hidden");
    }

    #[test]
    fn test_fields_json_pads_techniques() {
        let fields = CardFields::from_json(
            r#"{"title": "Hi", "class_count": 2, "techniques": ["a", "b"], "frame_style": "holo"}"#,
        )
        .unwrap();
        assert_eq!(fields.title, "Hi");
        assert_eq!(fields.frame_style, FrameStyle::Holo);
        assert_eq!(fields.techniques().len(), 24);
        assert_eq!(fields.technique(1), "b");
        assert_eq!(fields.race_preset, RACE_PRESETS[0]);

        assert!(CardFields::from_json(r#"{"class_count": 7}"#).is_err());
    }

    #[test]
    fn test_mutations_coalesce_into_one_render() {
        let mut editor = CardEditor::new(None, 32);
        assert!(editor.is_render_pending());
        editor.update(|f| f.title = "a".into());
        editor.update(|f| f.title = "b".into());
        // No surface: the pass is skipped silently
        assert!(!editor.flush());
        assert!(!editor.is_render_pending());
        assert_eq!(editor.render_count(), 0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut editor = CardEditor::new(None, 32);
        editor.update(|f| {
            f.title = "Title".into();
            f.race_custom = "Orc".into();
            f.class_count = ClassCount::new(4).unwrap();
            f.set_technique(20, "Smash");
        });
        editor.set_illustration(None);
        editor.reset();

        assert_eq!(editor.fields(), &CardFields::default());
        assert_eq!(editor.illustration().unwrap().width, 64);
        assert!(editor.is_render_pending());
    }

    #[tokio::test]
    async fn test_explicit_illustration_supersedes_load() {
        let mut editor = CardEditor::new(None, 32);
        let outcome = editor.loader().load(IllustrationSource::Placeholder).await;
        assert!(matches!(outcome, LoadOutcome::Applied { image: Some(_), .. }));

        editor.set_illustration(None);
        assert!(!editor.apply_load(outcome));
        assert!(editor.illustration().is_none());
    }

    #[tokio::test]
    async fn test_load_after_explicit_illustration_applies() {
        let mut editor = CardEditor::new(None, 32);
        editor.set_illustration(None);
        let outcome = editor.loader().load(IllustrationSource::Placeholder).await;
        assert!(editor.apply_load(outcome));
        assert_eq!(editor.illustration().unwrap().width, 64);
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let mut editor = CardEditor::new(None, 32);
        let loader = editor.loader();
        let token = loader.begin();
        editor.reset();
        let outcome = LoadOutcome::Applied { token, image: None };
        assert!(!editor.apply_load(outcome));
        assert!(editor.illustration().is_some());
    }
}
