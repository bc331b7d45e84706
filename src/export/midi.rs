//! MIDI tick mapping.
//!
//! Flattens a document into `{note, velocity, start, duration}` events
//! on a fixed 480-ticks-per-beat clock. Every measure counts as 4
//! beats regardless of its time signature and the pitch table is the
//! fixed six-string standard tuning. Pure data transform; no binary
//! MIDI file is written.

use crate::tablature::document::TabDocument;

/// Standard MIDI resolution, ticks per quarter note.
pub const TICKS_PER_BEAT: u32 = 480;

/// Open-string pitches for standard guitar tuning, low string to high.
pub const STANDARD_TUNING_PITCHES: [u8; 6] = [40, 45, 50, 55, 59, 64];

const FALLBACK_VELOCITY: u8 = 100;

/// A single flattened note event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiNote {
    /// MIDI note number.
    pub note: u8,
    pub velocity: u8,
    /// Start time in ticks.
    pub start: u32,
    /// Duration in ticks.
    pub duration: u32,
}

pub fn convert_document(tab: &TabDocument) -> Vec<MidiNote> {
    let mut events = Vec::with_capacity(tab.note_count());
    for section in &tab.sections {
        for measure in &section.measures {
            for note in &measure.notes {
                let Some(open_pitch) = 5usize
                    .checked_sub(note.string)
                    .and_then(|index| STANDARD_TUNING_PITCHES.get(index))
                else {
                    log::warn!(
                        "string {} has no entry in the tuning table, note {} skipped",
                        note.string,
                        note.id
                    );
                    continue;
                };
                // 4 beats per measure assumed
                let start = (note.position * f64::from(TICKS_PER_BEAT) * 4.0) as u32;
                let duration = (note.duration * f64::from(TICKS_PER_BEAT)) as u32;
                let velocity = if note.velocity == 0 {
                    FALLBACK_VELOCITY
                } else {
                    note.velocity
                };
                events.push(MidiNote {
                    note: open_pitch + note.fret,
                    velocity,
                    start,
                    duration,
                });
            }
        }
    }
    events
}
