//! Tabscribe - guitar tablature document model and export engine
//!
//! This library provides:
//! - An immutable tablature document model (sections, measures, notes, techniques)
//! - A pure mutation API producing fresh document snapshots
//! - A library/project index with recency tracking and pluggable persistence
//! - Export projections: text grid, JSON, CSV and a MIDI tick mapping
//!
//! # Example
//!
//! ```
//! use tabscribe::{add_note, ExportFormat, ExportOptions, TabDocument, TabNote};
//!
//! let doc = TabDocument::new("Riff", "", tabscribe::default_tuning());
//! let doc = add_note(&doc, 0, 0, TabNote::on(0, 5, 0.0)).unwrap();
//! let text = tabscribe::export_to_string(&doc, &ExportOptions::new(ExportFormat::Txt)).unwrap();
//! assert!(text.contains("e| 5--------------|"));
//! ```

pub mod error;
pub mod export;
pub mod library;
pub mod tablature;

// Re-export main types for convenience
pub use error::TabError;
pub use export::{
    export_to_string,
    midi::{convert_document, MidiNote, STANDARD_TUNING_PITCHES, TICKS_PER_BEAT},
    share::{export_and_share, ShareSheet},
    ExportFormat, ExportOptions,
};
pub use library::{
    settings::{AppSettings, EditorMode, PlaybackState, PlaybackUpdate, UiMode},
    store::{FileGateway, MemoryGateway, PersistenceGateway},
    LibraryEntry, TabLibrary, RECENT_TABS_CAP,
};
pub use tablature::document::{
    default_tuning, Difficulty, TabDocument, TabMeasure, TabMetadata, TabNote, TabProject,
    TabSection, Technique, TechniqueParameters, TechniqueType, TimeSignature,
};
pub use tablature::edit::{
    add_measure, add_note, add_section, remove_note, update_metadata, MetadataUpdate,
};
