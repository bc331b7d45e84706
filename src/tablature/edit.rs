//! Pure mutation operations over tab documents.
//!
//! Every operation takes a document snapshot and returns a fresh one;
//! the input is never mutated, so readers of an old snapshot never
//! observe a partial edit. Not-found targets (removing an unknown note
//! id) are no-ops; index preconditions surface as
//! [`TabError::OutOfRange`].

use crate::error::TabError;
use crate::tablature::document::{
    Difficulty, TabDocument, TabMeasure, TabNote, TabSection, TimeSignature, DEFAULT_TEMPO,
};
use chrono::Utc;

/// Appends `note` to the addressed measure.
///
/// Notes are not deduplicated by (string, position); stacking several
/// notes on one grid cell is permitted.
pub fn add_note(
    document: &TabDocument,
    section_index: usize,
    measure_index: usize,
    note: TabNote,
) -> Result<TabDocument, TabError> {
    let mut next = document.clone();
    let section = next.sections.get_mut(section_index).ok_or_else(|| {
        TabError::OutOfRange(format!("section {section_index} does not exist"))
    })?;
    let measure = section.measures.get_mut(measure_index).ok_or_else(|| {
        TabError::OutOfRange(format!(
            "measure {measure_index} does not exist in section {section_index}"
        ))
    })?;
    if !note.within_measure() {
        log::warn!(
            "note {} placed outside its measure span (position {})",
            note.id,
            note.position
        );
    }
    measure.notes.push(note);
    next.updated_at = Utc::now();
    Ok(next)
}

/// Removes every note matching `note_id`. An absent id leaves the
/// document content untouched and is never an error.
pub fn remove_note(document: &TabDocument, note_id: &str) -> TabDocument {
    let mut next = document.clone();
    let mut removed = false;
    for section in &mut next.sections {
        for measure in &mut section.measures {
            let before = measure.notes.len();
            measure.notes.retain(|note| note.id != note_id);
            removed |= measure.notes.len() != before;
        }
    }
    if removed {
        next.updated_at = Utc::now();
    }
    next
}

/// Supplied fields of a metadata update; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct MetadataUpdate {
    pub genre: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub bpm: Option<u32>,
    pub key: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Shallow-merges `update` into the document metadata.
pub fn update_metadata(document: &TabDocument, update: MetadataUpdate) -> TabDocument {
    let mut next = document.clone();
    let metadata = &mut next.metadata;
    if let Some(genre) = update.genre {
        metadata.genre = genre;
    }
    if let Some(difficulty) = update.difficulty {
        metadata.difficulty = difficulty;
    }
    if let Some(bpm) = update.bpm {
        metadata.bpm = bpm;
    }
    if let Some(key) = update.key {
        metadata.key = key;
    }
    if let Some(description) = update.description {
        metadata.description = description;
    }
    if let Some(tags) = update.tags {
        metadata.tags = tags;
    }
    next.updated_at = Utc::now();
    next
}

/// Appends a section holding one empty measure that continues the bar
/// numbering and inherits time signature and tempo from the last
/// measure of the document.
pub fn add_section(document: &TabDocument, name: &str) -> TabDocument {
    let mut next = document.clone();
    let (first_bar, time_signature, tempo) = next_bar_shape(last_measure(&next));
    next.sections
        .push(TabSection::named(name, first_bar, time_signature, tempo));
    next.updated_at = Utc::now();
    next
}

/// Appends a measure to the addressed section, numbered after the
/// section's last measure.
pub fn add_measure(document: &TabDocument, section_index: usize) -> Result<TabDocument, TabError> {
    let mut next = document.clone();
    let section = next.sections.get_mut(section_index).ok_or_else(|| {
        TabError::OutOfRange(format!("section {section_index} does not exist"))
    })?;
    let (bar_number, time_signature, tempo) = next_bar_shape(section.measures.last());
    section
        .measures
        .push(TabMeasure::numbered(bar_number, time_signature, tempo));
    next.updated_at = Utc::now();
    Ok(next)
}

fn last_measure(document: &TabDocument) -> Option<&TabMeasure> {
    document
        .sections
        .iter()
        .flat_map(|section| &section.measures)
        .last()
}

fn next_bar_shape(previous: Option<&TabMeasure>) -> (u32, TimeSignature, u32) {
    match previous {
        Some(measure) => (
            measure.bar_number + 1,
            measure.time_signature,
            measure.tempo,
        ),
        None => (1, TimeSignature::default(), DEFAULT_TEMPO),
    }
}
