//! Integration tests for tabscribe library usage.
//!
//! These tests verify that the library can be used as a dependency
//! from external projects.

use tabscribe::{
    add_note, add_section, convert_document, export_to_string, remove_note, ExportFormat,
    ExportOptions, MemoryGateway, TabDocument, TabError, TabLibrary, TabNote, Technique,
    TechniqueType,
};

/// Test that all major types are accessible from the library.
#[test]
fn test_types_accessible() {
    // This test verifies that the public API types compile and are usable.
    // If any re-export is missing, this test will fail to compile.

    fn _assert_types() {
        let _: fn(&str) -> Result<TabDocument, TabError> = TabDocument::from_json;
        let _: u32 = tabscribe::TICKS_PER_BEAT;
        let _: usize = tabscribe::RECENT_TABS_CAP;
        let _: [u8; 6] = tabscribe::STANDARD_TUNING_PITCHES;
    }
}

/// Test the full create/edit/index/export workflow.
#[test]
fn test_edit_and_export_workflow() {
    let gateway = MemoryGateway::new();
    let mut library = TabLibrary::open(Box::new(gateway.clone()));

    let tab = library.create_tab("Demo", "Somebody");
    let tab = add_note(&tab, 0, 0, TabNote::on(0, 5, 0.0)).expect("fresh tab has one measure");
    let tab = add_note(
        &tab,
        0,
        0,
        TabNote::on(5, 3, 0.5).with_technique(Technique::of(TechniqueType::PalmMute)),
    )
    .expect("fresh tab has one measure");
    let tab = add_section(&tab, "Verse");
    library.update_tab(tab.clone());

    let text = export_to_string(&tab, &ExportOptions::new(ExportFormat::Txt))
        .expect("text export succeeds");
    assert!(text.contains("Demo - Somebody"));
    assert!(text.contains("e| 5--------------|"));
    assert!(text.contains("[Verse]"));

    let csv = export_to_string(&tab, &ExportOptions::new(ExportFormat::Csv))
        .expect("csv export succeeds");
    assert_eq!(csv.lines().count(), tab.note_count() + 1);

    let json = export_to_string(&tab, &ExportOptions::new(ExportFormat::Json))
        .expect("json export succeeds");
    let parsed = TabDocument::from_json(&json).expect("round trip parses");
    assert_eq!(parsed, tab);

    let midi = convert_document(&tab);
    assert_eq!(midi.len(), tab.note_count());

    // a restored library sees the persisted snapshot, minus transient state
    let restored = TabLibrary::open(Box::new(gateway));
    assert_eq!(restored.recent_tabs().len(), 1);
    assert_eq!(restored.recent_tabs()[0].note_count(), 2);
    assert!(restored.current_tab().is_none());
}

/// Test that edits never mutate the input snapshot.
#[test]
fn test_snapshots_are_immutable() {
    let original = TabDocument::new("Still Life", "", tabscribe::default_tuning());
    let note = TabNote::on(1, 7, 0.25);
    let note_id = note.id.clone();

    let edited = add_note(&original, 0, 0, note).expect("measure exists");
    assert_eq!(original.note_count(), 0);
    assert_eq!(edited.note_count(), 1);

    let reverted = remove_note(&edited, &note_id);
    assert_eq!(
        reverted.sections[0].measures[0].notes,
        original.sections[0].measures[0].notes
    );
}

/// Test error handling for invalid data.
#[test]
fn test_parse_error() {
    let result = TabDocument::from_json("{\"not\": \"a tab\"}");

    assert!(result.is_err(), "Should return error for invalid data");
    let err = result.unwrap_err();
    assert!(
        matches!(err, TabError::ParsingError(_)),
        "Should be a ParsingError"
    );
}

/// Test error handling for unknown export formats.
#[test]
fn test_unknown_format_error() {
    let err = "pdf".parse::<ExportFormat>().unwrap_err();
    assert!(matches!(err, TabError::UnsupportedFormat(_)));
}
