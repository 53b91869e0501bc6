// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TRANSLATION: &str = "NLT";

pub const FONT_SIZE_MIN: u32 = 12;
pub const FONT_SIZE_MAX: u32 = 30;
pub const FONT_SIZE_STEP: u32 = 1;
pub const LINE_HEIGHT_MIN: u32 = 20;
pub const LINE_HEIGHT_MAX: u32 = 40;
pub const LINE_HEIGHT_STEP: u32 = 2;
pub const MARGIN_SIZE_MIN: u32 = 8;
pub const MARGIN_SIZE_MAX: u32 = 40;
pub const MARGIN_SIZE_STEP: u32 = 4;

/// Reader preferences and last reading position, persisted under `bibleSettings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReaderSettings {
    pub selected_translation: String,
    pub selected_book_id: Option<u32>,
    pub selected_chapter: u32,
    pub font_size: u32,
    pub line_height: u32,
    pub margin_size: u32,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            selected_translation: DEFAULT_TRANSLATION.to_owned(),
            selected_book_id: None,
            selected_chapter: 1,
            font_size: 18,
            line_height: 28,
            margin_size: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsStep {
    IncreaseFontSize,
    DecreaseFontSize,
    IncreaseLineHeight,
    DecreaseLineHeight,
    IncreaseMargin,
    DecreaseMargin,
}

impl ReaderSettings {
    /// Applies one step, clamped to the allowed range. Returns `true` if anything changed.
    pub fn apply_step(&mut self, step: SettingsStep) -> bool {
        let (value, delta, min, max, grow) = match step {
            SettingsStep::IncreaseFontSize => {
                (&mut self.font_size, FONT_SIZE_STEP, FONT_SIZE_MIN, FONT_SIZE_MAX, true)
            }
            SettingsStep::DecreaseFontSize => {
                (&mut self.font_size, FONT_SIZE_STEP, FONT_SIZE_MIN, FONT_SIZE_MAX, false)
            }
            SettingsStep::IncreaseLineHeight => (
                &mut self.line_height,
                LINE_HEIGHT_STEP,
                LINE_HEIGHT_MIN,
                LINE_HEIGHT_MAX,
                true,
            ),
            SettingsStep::DecreaseLineHeight => (
                &mut self.line_height,
                LINE_HEIGHT_STEP,
                LINE_HEIGHT_MIN,
                LINE_HEIGHT_MAX,
                false,
            ),
            SettingsStep::IncreaseMargin => (
                &mut self.margin_size,
                MARGIN_SIZE_STEP,
                MARGIN_SIZE_MIN,
                MARGIN_SIZE_MAX,
                true,
            ),
            SettingsStep::DecreaseMargin => (
                &mut self.margin_size,
                MARGIN_SIZE_STEP,
                MARGIN_SIZE_MIN,
                MARGIN_SIZE_MAX,
                false,
            ),
        };

        let next = if grow {
            value.saturating_add(delta).min(max)
        } else {
            value.saturating_sub(delta).max(min)
        };
        let changed = next != *value;
        *value = next;
        changed
    }

    /// Pulls values loaded from storage back into range and fills in an empty translation.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.selected_translation.trim().is_empty() {
            self.selected_translation = defaults.selected_translation;
        }
        self.selected_chapter = self.selected_chapter.max(1);
        self.font_size = self.font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        self.line_height = self.line_height.clamp(LINE_HEIGHT_MIN, LINE_HEIGHT_MAX);
        self.margin_size = self.margin_size.clamp(MARGIN_SIZE_MIN, MARGIN_SIZE_MAX);
        self
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ReaderSettings, SettingsStep, FONT_SIZE_MAX, LINE_HEIGHT_MIN};

    #[test]
    fn reads_partial_device_blob_with_defaults() {
        let raw = r#"{"selectedTranslation":"KJV","selectedBookId":43,"selectedChapter":3,"fontSize":20}"#;
        let settings: ReaderSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.selected_translation, "KJV");
        assert_eq!(settings.selected_book_id, Some(43));
        assert_eq!(settings.selected_chapter, 3);
        assert_eq!(settings.font_size, 20);
        assert_eq!(settings.line_height, 28);
        assert_eq!(settings.margin_size, 20);
    }

    #[test]
    fn writes_camel_case_fields() {
        let json = serde_json::to_value(ReaderSettings::default()).unwrap();
        assert_eq!(json["selectedTranslation"], "NLT");
        assert_eq!(json["lineHeight"], 28);
        assert!(json["selectedBookId"].is_null());
    }

    #[rstest]
    #[case(SettingsStep::IncreaseFontSize, 19, 28)]
    #[case(SettingsStep::DecreaseFontSize, 17, 28)]
    #[case(SettingsStep::IncreaseLineHeight, 18, 30)]
    #[case(SettingsStep::DecreaseLineHeight, 18, 26)]
    fn steps_move_by_configured_increment(
        #[case] step: SettingsStep,
        #[case] font_size: u32,
        #[case] line_height: u32,
    ) {
        let mut settings = ReaderSettings::default();
        assert!(settings.apply_step(step));
        assert_eq!(settings.font_size, font_size);
        assert_eq!(settings.line_height, line_height);
    }

    #[test]
    fn steps_stop_at_bounds() {
        let mut settings = ReaderSettings {
            font_size: FONT_SIZE_MAX,
            line_height: LINE_HEIGHT_MIN,
            ..ReaderSettings::default()
        };
        assert!(!settings.apply_step(SettingsStep::IncreaseFontSize));
        assert!(!settings.apply_step(SettingsStep::DecreaseLineHeight));
        assert_eq!(settings.font_size, FONT_SIZE_MAX);
        assert_eq!(settings.line_height, LINE_HEIGHT_MIN);
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let settings = ReaderSettings {
            selected_translation: "  ".to_owned(),
            selected_chapter: 0,
            font_size: 99,
            line_height: 0,
            margin_size: 2,
            ..ReaderSettings::default()
        }
        .sanitized();
        assert_eq!(settings.selected_translation, "NLT");
        assert_eq!(settings.selected_chapter, 1);
        assert_eq!(settings.font_size, 30);
        assert_eq!(settings.line_height, 20);
        assert_eq!(settings.margin_size, 8);
    }
}
