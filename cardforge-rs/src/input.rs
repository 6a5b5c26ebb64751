//! Immutable card description consumed by one render pass.

use crate::error::{CardError, CardResult};
use crate::loader::DecodedImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Rows in every technique column.
pub const ROWS_PER_CLASS: usize = 6;
pub const MIN_CLASSES: u8 = 1;
pub const MAX_CLASSES: u8 = 4;

pub const TITLE_CAP: usize = 20;
pub const USERNAME_CAP: usize = 16;
pub const MONSTER_NAME_CAP: usize = 14;
pub const RACE_CAP: usize = 6;
pub const EX_CAP: usize = 22;
pub const BATTLE_MEME_CAP: usize = 22;
pub const TECHNIQUE_CAP: usize = 18;

/// Race choices offered next to the free-text override. The first entry is the default.
pub const RACE_PRESETS: &[&str] = &["人族", "魔族", "精灵", "兽人", "龙族", "机械"];

/// Visual theme of the card frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[default]
    Neo,
    Classic,
    Dark,
    Holo,
}

impl FrameStyle {
    pub const ALL: [FrameStyle; 4] = [
        FrameStyle::Neo,
        FrameStyle::Classic,
        FrameStyle::Dark,
        FrameStyle::Holo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameStyle::Neo => "neo",
            FrameStyle::Classic => "classic",
            FrameStyle::Dark => "dark",
            FrameStyle::Holo => "holo",
        }
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameStyle {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrameStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CardError::InvalidFrameStyle(s.to_string()))
    }
}

/// Number of technique columns, always within `MIN_CLASSES..=MAX_CLASSES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ClassCount(u8);

impl ClassCount {
    pub fn new(count: u8) -> CardResult<Self> {
        if (MIN_CLASSES..=MAX_CLASSES).contains(&count) {
            Ok(Self(count))
        } else {
            Err(CardError::InvalidClassCount(count))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Number of technique slots shown for this many classes.
    pub fn slots(&self) -> usize {
        self.0 as usize * ROWS_PER_CLASS
    }
}

impl Default for ClassCount {
    fn default() -> Self {
        Self(MIN_CLASSES)
    }
}

impl TryFrom<u8> for ClassCount {
    type Error = CardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ClassCount::new(value)
    }
}

impl From<ClassCount> for u8 {
    fn from(value: ClassCount) -> Self {
        value.0
    }
}

/// Hard prefix cut to at most `cap` characters. Never appends an ellipsis.
pub fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Snapshot of everything one render pass paints.
///
/// Text fields hold the untruncated values; caps are applied by the layout.
#[derive(Debug, Clone, Default)]
pub struct CardInput {
    pub frame_style: FrameStyle,
    pub title: String,
    pub username: String,
    pub monster_name: String,
    pub ex_name: String,
    pub battle_meme_name: String,
    /// Resolved race (custom override or preset).
    pub race: String,
    /// `None` until an illustration has been loaded.
    pub illustration: Option<Arc<DecodedImage>>,
    class_count: ClassCount,
    techniques: Vec<String>,
}

impl CardInput {
    pub fn new(frame_style: FrameStyle, class_count: ClassCount) -> Self {
        Self {
            frame_style,
            class_count,
            techniques: vec![String::new(); class_count.slots()],
            ..Default::default()
        }
    }

    pub fn class_count(&self) -> ClassCount {
        self.class_count
    }

    /// Change the class count, padding or dropping technique slots to match.
    pub fn set_class_count(&mut self, class_count: ClassCount) {
        self.class_count = class_count;
        self.techniques.resize(class_count.slots(), String::new());
    }

    /// Replace the techniques. The list is padded with empty strings or cut
    /// so that it always holds `class_count * 6` entries.
    pub fn set_techniques<I, S>(&mut self, techniques: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots = self.class_count.slots();
        let mut list: Vec<String> = techniques.into_iter().take(slots).map(Into::into).collect();
        list.resize(slots, String::new());
        self.techniques = list;
    }

    pub fn with_techniques<I, S>(mut self, techniques: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_techniques(techniques);
        self
    }

    pub fn techniques(&self) -> &[String] {
        &self.techniques
    }

    /// Technique at a column-major index, empty when out of range.
    pub fn technique(&self, index: usize) -> &str {
        self.techniques.get(index).map(String::as_str).unwrap_or("")
    }
}
