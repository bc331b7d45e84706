//! Application settings and transient playback state.
//!
//! The core does not compute playback; it stores these values as plain
//! state for the presentation layer.

use crate::export::ExportFormat;
use crate::tablature::document::{default_tuning, DEFAULT_TEMPO};
use serde::{Deserialize, Serialize};

/// Default playback volume, 0-100.
pub const DEFAULT_VOLUME: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Beginner,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiMode {
    pub mode: EditorMode,
    pub show_advanced_tools: bool,
    pub show_techniques: bool,
    pub show_midi_info: bool,
    pub compact_view: bool,
}

impl Default for UiMode {
    fn default() -> Self {
        UiMode {
            mode: EditorMode::Beginner,
            show_advanced_tools: false,
            show_techniques: true,
            show_midi_info: false,
            compact_view: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackDefaults {
    pub default_tempo: u32,
    pub default_volume: u8,
    pub count_in_bars: u8,
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        PlaybackDefaults {
            default_tempo: DEFAULT_TEMPO,
            default_volume: DEFAULT_VOLUME,
            count_in_bars: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDefaults {
    pub default_format: ExportFormat,
    pub include_techniques: bool,
    pub include_metadata: bool,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        ExportDefaults {
            default_format: ExportFormat::Txt,
            include_techniques: true,
            include_metadata: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub ui_mode: UiMode,
    /// Tuning applied to freshly created documents, index 0 = highest
    /// string.
    pub default_tuning: Vec<String>,
    pub auto_save: bool,
    pub playback_settings: PlaybackDefaults,
    pub export_settings: ExportDefaults,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            ui_mode: UiMode::default(),
            default_tuning: default_tuning(),
            auto_save: true,
            playback_settings: PlaybackDefaults::default(),
            export_settings: ExportDefaults::default(),
        }
    }
}

/// Transport state, consumed as plain values and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_measure: usize,
    pub current_beat: usize,
    pub tempo: u32,
    pub volume: u8,
    pub is_looping: bool,
    pub loop_start: Option<usize>,
    pub loop_end: Option<usize>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState {
            is_playing: false,
            current_measure: 0,
            current_beat: 0,
            tempo: DEFAULT_TEMPO,
            volume: DEFAULT_VOLUME,
            is_looping: false,
            loop_start: None,
            loop_end: None,
        }
    }
}

/// Supplied fields of a playback update; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackUpdate {
    pub is_playing: Option<bool>,
    pub current_measure: Option<usize>,
    pub current_beat: Option<usize>,
    pub tempo: Option<u32>,
    pub volume: Option<u8>,
    pub is_looping: Option<bool>,
    pub loop_start: Option<usize>,
    pub loop_end: Option<usize>,
}

impl PlaybackState {
    pub fn apply(&mut self, update: PlaybackUpdate) {
        if let Some(is_playing) = update.is_playing {
            self.is_playing = is_playing;
        }
        if let Some(current_measure) = update.current_measure {
            self.current_measure = current_measure;
        }
        if let Some(current_beat) = update.current_beat {
            self.current_beat = current_beat;
        }
        if let Some(tempo) = update.tempo {
            self.tempo = tempo;
        }
        if let Some(volume) = update.volume {
            self.volume = volume;
        }
        if let Some(is_looping) = update.is_looping {
            self.is_looping = is_looping;
        }
        if update.loop_start.is_some() {
            self.loop_start = update.loop_start;
        }
        if update.loop_end.is_some() {
            self.loop_end = update.loop_end;
        }
    }
}
