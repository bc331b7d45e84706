use crate::error::TabError;
use crate::export::csv::export_csv;
use crate::export::json::export_json;
use crate::export::midi::{convert_document, TICKS_PER_BEAT};
use crate::export::share::{export_and_share, ShareSheet};
use crate::export::text::export_text;
use crate::export::{ExportFormat, ExportOptions};
use crate::tablature::document::{
    default_tuning, TabDocument, TabNote, Technique, TechniqueType,
};
use crate::tablature::edit::add_note;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

fn init_logger() {
    env_logger::builder()
        .is_test(true)
        .try_init()
        .unwrap_or_default();
}

fn doc_with_notes(notes: Vec<TabNote>) -> TabDocument {
    let mut doc = TabDocument::new("Test Song", "", default_tuning());
    for note in notes {
        doc = add_note(&doc, 0, 0, note).expect("fresh document has one measure");
    }
    doc
}

fn bare_text_options() -> ExportOptions {
    ExportOptions {
        format: ExportFormat::Txt,
        include_techniques: false,
        include_metadata: false,
    }
}

#[test]
fn text_reference_line_for_a_single_note() {
    init_logger();
    let doc = doc_with_notes(vec![TabNote::on(0, 5, 0.0)]);
    let text = export_text(&doc, &bare_text_options());
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.contains(&"e| 5--------------|"), "text was:\n{text}");
    // untouched strings render as empty 16-cell grids
    assert!(lines.contains(&"B|----------------|"));
    assert!(lines.contains(&"E|----------------|"));
}

#[test]
fn text_grid_lines_are_fixed_width() {
    init_logger();
    let doc = doc_with_notes(vec![
        TabNote::on(0, 5, 0.0),
        TabNote::on(0, 12, 0.5),
        TabNote::on(3, 7, 0.25),
    ]);
    let text = export_text(&doc, &bare_text_options());
    for line in text.lines().filter(|line| line.ends_with('|')) {
        let inner = line
            .split_once('|')
            .map(|(_, rest)| rest.trim_end_matches('|'))
            .unwrap_or_default();
        assert_eq!(inner.chars().count(), 16, "line was: {line}");
    }
}

#[test]
fn text_two_digit_frets_fill_the_field() {
    init_logger();
    let doc = doc_with_notes(vec![TabNote::on(0, 12, 0.0)]);
    let text = export_text(&doc, &bare_text_options());
    assert!(text.lines().any(|line| line == "e|12--------------|"));
}

#[test]
fn text_technique_symbol_overwrites_adjacent_fret() {
    init_logger();
    // a note with a technique at cell 0, a second note on the same
    // string at cell 1
    let first = TabNote::on(0, 5, 0.0).with_technique(Technique::of(TechniqueType::HammerOn));
    let second = TabNote::on(0, 3, 1.0 / 16.0);
    let doc = doc_with_notes(vec![first, second]);

    let mut options = bare_text_options();
    options.include_techniques = true;
    let text = export_text(&doc, &options);
    let line = text
        .lines()
        .find(|line| line.starts_with("e|"))
        .expect("high string line");
    // the symbol replaces the second note's fret field entirely
    assert_eq!(line, "e| 5h-------------|");
    assert!(!line.contains('3'));
}

#[test]
fn text_without_techniques_keeps_adjacent_frets() {
    init_logger();
    let first = TabNote::on(0, 5, 0.0).with_technique(Technique::of(TechniqueType::HammerOn));
    let second = TabNote::on(0, 3, 1.0 / 16.0);
    let doc = doc_with_notes(vec![first, second]);
    let text = export_text(&doc, &bare_text_options());
    assert!(text.lines().any(|line| line == "e| 5 3------------|"));
}

#[test]
fn text_metadata_block() {
    init_logger();
    let mut doc = TabDocument::new("Song", "Artist", default_tuning());
    doc.capo = 2;
    doc.metadata.genre = "Rock".to_string();
    let options = ExportOptions {
        format: ExportFormat::Txt,
        include_techniques: true,
        include_metadata: true,
    };
    let text = export_text(&doc, &options);
    assert!(text.starts_with("Song - Artist\n"));
    assert!(text.contains("Tuning: e B G D A E"));
    assert!(text.contains("Capo: 2"));
    assert!(text.contains("Tempo: 120 BPM"));
    assert!(text.contains("Difficulty: beginner"));
    assert!(text.contains("Genre: Rock"));
    assert!(text.contains("[Intro]"));
    assert!(text.contains("Measure 1:"));
    assert!(text.contains("Created with tabscribe on"));

    // capo 0 is omitted
    doc.capo = 0;
    let text = export_text(&doc, &options);
    assert!(!text.contains("Capo:"));
}

#[test]
fn csv_emits_one_row_per_note() {
    init_logger();
    let first = TabNote::on(0, 5, 0.0).with_technique(Technique::of(TechniqueType::HammerOn));
    let second = TabNote::on(5, 3, 0.25);
    let doc = doc_with_notes(vec![first, second]);

    let csv = export_csv(&doc);
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows.len(), doc.note_count() + 1);
    assert_eq!(
        rows[0],
        "Section,Measure,String,Fret,Position,Duration,Techniques"
    );
    // string column is 1-based, technique symbols join with `;`
    assert_eq!(rows[1], "Intro,1,1,5,0,1,h");
    assert_eq!(rows[2], "Intro,1,6,3,0.25,1,");
}

#[test]
fn json_export_round_trips() {
    init_logger();
    let doc = doc_with_notes(vec![TabNote::on(1, 8, 0.75)]);
    let json = export_json(&doc).unwrap();
    let parsed = TabDocument::from_json(&json).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn midi_maps_pitches_from_the_tuning_table() {
    init_logger();
    let doc = doc_with_notes(vec![
        TabNote::on(5, 0, 0.0),  // open low E
        TabNote::on(0, 12, 0.0), // high E, octave fret
    ]);
    let events = convert_document(&doc);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].note, 40);
    assert_eq!(events[1].note, 76);
}

#[test]
fn midi_tick_timing() {
    init_logger();
    let mut note = TabNote::on(2, 3, 0.25);
    note.duration = 0.5;
    let doc = doc_with_notes(vec![note]);
    let events = convert_document(&doc);
    // a measure counts as 4 beats regardless of time signature
    assert_eq!(events[0].start, TICKS_PER_BEAT * 4 / 4);
    assert_eq!(events[0].duration, TICKS_PER_BEAT / 2);
}

#[test]
fn midi_zero_velocity_falls_back() {
    init_logger();
    let mut note = TabNote::on(0, 0, 0.0);
    note.velocity = 0;
    let doc = doc_with_notes(vec![note]);
    let events = convert_document(&doc);
    assert_eq!(events[0].velocity, 100);
}

#[test]
fn midi_skips_strings_outside_the_table() {
    init_logger();
    let doc = doc_with_notes(vec![TabNote::on(6, 0, 0.0), TabNote::on(0, 0, 0.0)]);
    let events = convert_document(&doc);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].note, 64);
}

#[test]
fn format_parsing_is_closed() {
    init_logger();
    assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
    assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
    let err = "pdf".parse::<ExportFormat>().unwrap_err();
    assert!(matches!(err, TabError::UnsupportedFormat(_)));
    assert_eq!(ExportFormat::Json.mime_type(), "application/json");
    assert_eq!(ExportFormat::Csv.extension(), "csv");
}

struct RecordingShareSheet {
    available: bool,
    calls: RefCell<Vec<(PathBuf, String, String)>>,
}

impl RecordingShareSheet {
    fn new(available: bool) -> Self {
        RecordingShareSheet {
            available,
            calls: RefCell::new(vec![]),
        }
    }
}

impl ShareSheet for RecordingShareSheet {
    fn is_available(&self) -> bool {
        self.available
    }

    fn share(&self, file: &Path, dialog_title: &str, mime_type: &str) -> Result<(), TabError> {
        self.calls.borrow_mut().push((
            file.to_path_buf(),
            dialog_title.to_string(),
            mime_type.to_string(),
        ));
        Ok(())
    }
}

#[test]
fn export_and_share_writes_then_shares() {
    init_logger();
    let mut doc = doc_with_notes(vec![TabNote::on(0, 5, 0.0)]);
    doc.title = "My Song!".to_string();
    let dir = tempfile::tempdir().unwrap();
    let sheet = RecordingShareSheet::new(true);

    let path = export_and_share(
        &doc,
        &ExportOptions::new(ExportFormat::Txt),
        dir.path(),
        &sheet,
    )
    .unwrap();
    assert_eq!(path.file_name().unwrap(), "My_Song_.txt");
    assert!(path.exists());

    let calls = sheet.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, path);
    assert_eq!(calls[0].1, "Share My Song!");
    assert_eq!(calls[0].2, "text/plain");
}

#[test]
fn export_and_share_surfaces_unavailable_platform() {
    init_logger();
    let mut doc = doc_with_notes(vec![TabNote::on(0, 5, 0.0)]);
    doc.title = "My Song!".to_string();
    let dir = tempfile::tempdir().unwrap();
    let sheet = RecordingShareSheet::new(false);

    let err = export_and_share(
        &doc,
        &ExportOptions::new(ExportFormat::Json),
        dir.path(),
        &sheet,
    )
    .unwrap_err();
    assert!(matches!(err, TabError::SharingUnavailable(_)));
    // the artifact was written before the share step failed
    assert!(dir.path().join("My_Song_.json").exists());
    assert!(sheet.calls.borrow().is_empty());
}
