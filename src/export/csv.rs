//! CSV projection, one row per note.
//!
//! Fields are not quoted; technique lists use `;` internally so they do
//! not collide with the column separator as long as symbols stay free
//! of both characters.

use crate::tablature::document::TabDocument;

const HEADER: &str = "Section,Measure,String,Fret,Position,Duration,Techniques";

pub fn export_csv(tab: &TabDocument) -> String {
    let mut rows = vec![HEADER.to_string()];
    for section in &tab.sections {
        for measure in &section.measures {
            for note in &measure.notes {
                let techniques: Vec<&str> = note
                    .techniques
                    .iter()
                    .map(|technique| technique.symbol.as_str())
                    .collect();
                rows.push(format!(
                    "{},{},{},{},{},{},{}",
                    section.name,
                    measure.bar_number,
                    note.string + 1, // storage is 0-based
                    note.fret,
                    note.position,
                    note.duration,
                    techniques.join(";")
                ));
            }
        }
    }
    rows.join("\n")
}
