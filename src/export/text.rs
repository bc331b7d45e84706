//! Text-tablature projection.
//!
//! Each measure renders as a sixteenth-note grid of [`MEASURE_CELLS`]
//! cells per string, independent of the measure's actual time
//! signature. Frets are placed for all notes first; technique symbol
//! runs go second into the cell after their note and replace whatever
//! that cell held, including an adjacent note's fret digits.

use crate::export::ExportOptions;
use crate::tablature::document::{TabDocument, TabMeasure};

/// Grid cells per measure, one sixteenth of the bar each.
pub const MEASURE_CELLS: usize = 16;

const HEADER_RULE_WIDTH: usize = 50;

pub fn export_text(tab: &TabDocument, options: &ExportOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    if tab.artist.is_empty() {
        lines.push(tab.title.clone());
    } else {
        lines.push(format!("{} - {}", tab.title, tab.artist));
    }
    lines.push("=".repeat(HEADER_RULE_WIDTH));
    lines.push(String::new());

    if options.include_metadata {
        lines.push(format!("Tuning: {}", tab.tuning.join(" ")));
        if tab.capo > 0 {
            lines.push(format!("Capo: {}", tab.capo));
        }
        lines.push(format!("Tempo: {} BPM", tab.metadata.bpm));
        lines.push(format!("Difficulty: {}", tab.metadata.difficulty));
        if !tab.metadata.genre.is_empty() {
            lines.push(format!("Genre: {}", tab.metadata.genre));
        }
        lines.push(String::new());
    }

    for section in &tab.sections {
        if !section.name.is_empty() {
            lines.push(format!("[{}]", section.name));
            lines.push(String::new());
        }
        for measure in &section.measures {
            lines.push(format!("Measure {}:", measure.bar_number));
            lines.extend(measure_grid(tab, measure, options.include_techniques));
            lines.push(String::new());
        }
    }

    if options.include_metadata {
        lines.push(String::new());
        lines.push(format!(
            "Created with tabscribe on {}",
            tab.created_at.format("%Y-%m-%d")
        ));
    }

    lines.join("\n")
}

/// One framed line per tuned string, clamped to [`MEASURE_CELLS`]
/// characters between the frame bars.
fn measure_grid(tab: &TabDocument, measure: &TabMeasure, include_techniques: bool) -> Vec<String> {
    let string_count = tab.tuning.len();
    let mut cells = vec![vec!["-".to_string(); MEASURE_CELLS]; string_count];

    for note in &measure.notes {
        if !note.within_measure() || note.string >= string_count {
            log::warn!("note {} outside the measure grid, skipped", note.id);
            continue;
        }
        cells[note.string][grid_cell(note.position)] = format!("{:>2}", note.fret);
    }

    if include_techniques {
        for note in &measure.notes {
            if note.techniques.is_empty() || !note.within_measure() || note.string >= string_count
            {
                continue;
            }
            let next_cell = grid_cell(note.position) + 1;
            if next_cell >= MEASURE_CELLS {
                continue;
            }
            cells[note.string][next_cell] = note
                .techniques
                .iter()
                .map(|technique| technique.symbol.as_str())
                .collect();
        }
    }

    tab.tuning
        .iter()
        .zip(cells)
        .map(|(name, row)| format!("{name}|{}|", clamp_row(&row)))
        .collect()
}

fn grid_cell(position: f64) -> usize {
    (position * MEASURE_CELLS as f64) as usize
}

// A fret field is two characters wide while empty cells are one, so the
// raw join can exceed the grid width; the frame stays fixed-width by
// clipping the overflow.
fn clamp_row(row: &[String]) -> String {
    let mut line: String = row.concat().chars().take(MEASURE_CELLS).collect();
    let width = line.chars().count();
    line.extend(std::iter::repeat('-').take(MEASURE_CELLS - width));
    line
}
