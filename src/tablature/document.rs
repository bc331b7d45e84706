use crate::error::TabError;
use crate::tablature::ident;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default tempo in beats per minute.
pub const DEFAULT_TEMPO: u32 = 120;

/// MIDI-style loudness applied to freshly placed notes.
pub const DEFAULT_VELOCITY: u8 = 100;

/// Highest fret addressable in practice.
pub const MAX_FRET: u8 = 24;

/// Standard six-string tuning, index 0 = highest-pitched string.
pub const STANDARD_TUNING: [&str; 6] = ["e", "B", "G", "D", "A", "E"];

/// Owned copy of [`STANDARD_TUNING`] for document construction.
pub fn default_tuning() -> Vec<String> {
    STANDARD_TUNING.iter().map(ToString::to_string).collect()
}

/// A sound event on the string/fret grid.
///
/// `position` is the offset within the owning measure as a fraction of
/// its span, `0.0` = downbeat, always `< 1.0` for renderable notes.
/// Several notes may occupy the same (string, position) cell; the model
/// does not enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabNote {
    pub id: String,
    pub fret: u8,
    pub string: usize,
    pub position: f64,
    /// Duration in quarter-note units, 1.0 = quarter note.
    pub duration: f64,
    pub techniques: Vec<Technique>,
    pub velocity: u8,
}

impl TabNote {
    /// A quarter note at default velocity with no techniques.
    pub fn on(string: usize, fret: u8, position: f64) -> Self {
        TabNote {
            id: ident::fresh_id(),
            fret,
            string,
            position,
            duration: 1.0,
            techniques: vec![],
            velocity: DEFAULT_VELOCITY,
        }
    }

    pub fn with_technique(mut self, technique: Technique) -> Self {
        self.techniques.push(technique);
        self
    }

    /// Whether the note lies within its measure's span.
    pub fn within_measure(&self) -> bool {
        (0.0..1.0).contains(&self.position)
    }
}

/// Playing articulation attached to a note, owned by it exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technique {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TechniqueType,
    pub symbol: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<TechniqueParameters>,
}

impl Technique {
    /// A technique carrying the catalog symbol and description for `kind`.
    pub fn of(kind: TechniqueType) -> Self {
        Technique {
            id: ident::fresh_id(),
            kind,
            symbol: kind.symbol().to_string(),
            description: kind.description().to_string(),
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: TechniqueParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechniqueType {
    PalmMute,
    SlideUp,
    SlideDown,
    HammerOn,
    PullOff,
    Bend,
    Vibrato,
    Tap,
    Slap,
    Pop,
    BodyHit,
    Harmonic,
    Tremolo,
    StrumUp,
    StrumDown,
    DeadNote,
    GhostNote,
}

impl TechniqueType {
    /// The full closed catalog, in display order.
    pub const ALL: [TechniqueType; 17] = [
        TechniqueType::PalmMute,
        TechniqueType::SlideUp,
        TechniqueType::SlideDown,
        TechniqueType::HammerOn,
        TechniqueType::PullOff,
        TechniqueType::Bend,
        TechniqueType::Vibrato,
        TechniqueType::Tap,
        TechniqueType::Slap,
        TechniqueType::Pop,
        TechniqueType::BodyHit,
        TechniqueType::Harmonic,
        TechniqueType::Tremolo,
        TechniqueType::StrumUp,
        TechniqueType::StrumDown,
        TechniqueType::DeadNote,
        TechniqueType::GhostNote,
    ];

    /// Display glyph used in rendered tablature.
    pub const fn symbol(self) -> &'static str {
        match self {
            TechniqueType::PalmMute => "PM",
            TechniqueType::SlideUp => "/",
            TechniqueType::SlideDown => "\\",
            TechniqueType::HammerOn => "h",
            TechniqueType::PullOff => "p",
            TechniqueType::Bend => "b",
            TechniqueType::Vibrato => "~",
            TechniqueType::Tap => "t",
            TechniqueType::Slap => "S",
            TechniqueType::Pop => "P",
            TechniqueType::BodyHit => "X",
            TechniqueType::Harmonic => "<>",
            TechniqueType::Tremolo => "tr",
            TechniqueType::StrumUp => "^",
            TechniqueType::StrumDown => "v",
            TechniqueType::DeadNote => "x",
            TechniqueType::GhostNote => "g",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            TechniqueType::PalmMute => "Rest the picking-hand palm on the strings for a muted attack",
            TechniqueType::SlideUp => "Slide into a higher fret without re-picking",
            TechniqueType::SlideDown => "Slide into a lower fret without re-picking",
            TechniqueType::HammerOn => "Sound the next note by hammering a finger onto the fret",
            TechniqueType::PullOff => "Sound the next note by pulling the finger off the string",
            TechniqueType::Bend => "Push the string sideways to raise the pitch",
            TechniqueType::Vibrato => "Oscillate the pitch around the fretted note",
            TechniqueType::Tap => "Sound the note by tapping the fretboard with the picking hand",
            TechniqueType::Slap => "Strike the string with the picking-hand thumb",
            TechniqueType::Pop => "Snap the string away from the fretboard",
            TechniqueType::BodyHit => "Percussive hit on the instrument body",
            TechniqueType::Harmonic => "Chime by touching the string above the fret wire",
            TechniqueType::Tremolo => "Rapidly repeat the note with alternate picking",
            TechniqueType::StrumUp => "Strum through the strings upwards",
            TechniqueType::StrumDown => "Strum through the strings downwards",
            TechniqueType::DeadNote => "Fully muted percussive note",
            TechniqueType::GhostNote => "Barely sounded note",
        }
    }
}

/// Optional numeric parameters for techniques that take them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueParameters {
    /// Bend amount in semitones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bend_amount: Option<f64>,
    /// Target fret for slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_target: Option<u8>,
    /// Intensity 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature {
            numerator: 4,
            denominator: 4,
        }
    }
}

impl TimeSignature {
    /// Measure span in quarter-note beats.
    pub fn quarter_beats(self) -> f64 {
        f64::from(self.numerator) * 4.0 / f64::from(self.denominator)
    }
}

/// Fixed-capacity container of notes, rendered in position order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabMeasure {
    pub id: String,
    pub time_signature: TimeSignature,
    pub tempo: u32,
    pub notes: Vec<TabNote>,
    /// 1-based sequence position across the document.
    pub bar_number: u32,
}

impl TabMeasure {
    pub fn numbered(bar_number: u32, time_signature: TimeSignature, tempo: u32) -> Self {
        TabMeasure {
            id: ident::fresh_id(),
            time_signature,
            tempo,
            notes: vec![],
            bar_number,
        }
    }
}

/// Named run of measures, repeated `repetitions` times on playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSection {
    pub id: String,
    pub name: String,
    pub measures: Vec<TabMeasure>,
    pub repetitions: u32,
}

impl TabSection {
    /// A section seeded with one empty measure continuing the bar count.
    pub fn named(name: &str, first_bar: u32, time_signature: TimeSignature, tempo: u32) -> Self {
        TabSection {
            id: ident::fresh_id(),
            name: name.to_string(),
            measures: vec![TabMeasure::numbered(first_bar, time_signature, tempo)],
            repetitions: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabMetadata {
    pub genre: String,
    pub difficulty: Difficulty,
    pub bpm: u32,
    pub key: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl Default for TabMetadata {
    fn default() -> Self {
        TabMetadata {
            genre: String::new(),
            difficulty: Difficulty::Beginner,
            bpm: DEFAULT_TEMPO,
            key: "C".to_string(),
            description: String::new(),
            tags: vec![],
        }
    }
}

/// Root aggregate of a tablature document.
///
/// Mutated exclusively through [`crate::tablature::edit`]; every edit
/// yields a new snapshot with `updated_at` refreshed. `sections` is
/// never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDocument {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// String names, index 0 = highest string. The length is the
    /// instrument's string count and is not fixed to six.
    pub tuning: Vec<String>,
    pub capo: u8,
    pub sections: Vec<TabSection>,
    pub metadata: TabMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u32,
}

impl TabDocument {
    /// A fresh document holds exactly one section ("Intro") with one
    /// empty 4/4 measure.
    pub fn new(title: &str, artist: &str, tuning: Vec<String>) -> Self {
        let now = Utc::now();
        TabDocument {
            id: ident::fresh_id(),
            title: title.to_string(),
            artist: artist.to_string(),
            tuning,
            capo: 0,
            sections: vec![TabSection::named(
                "Intro",
                1,
                TimeSignature::default(),
                DEFAULT_TEMPO,
            )],
            metadata: TabMetadata::default(),
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    /// Parses a document from its JSON export, preserving ids and
    /// timestamps verbatim.
    pub fn from_json(data: &str) -> Result<Self, TabError> {
        serde_json::from_str(data)
            .map_err(|err| TabError::ParsingError(format!("invalid tab document: {err}")))
    }

    /// Total note count across all sections and measures.
    pub fn note_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| &section.measures)
            .map(|measure| measure.notes.len())
            .sum()
    }
}

/// Groups documents under a name; ownership is by composition, the
/// recency list keeps separate non-owning snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabProject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tabs: Vec<TabDocument>,
    pub is_public: bool,
    pub collaborators: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TabProject {
    pub fn named(name: &str, description: &str) -> Self {
        let now = Utc::now();
        TabProject {
            id: ident::fresh_id(),
            name: name.to_string(),
            description: description.to_string(),
            tabs: vec![],
            is_public: false,
            collaborators: vec![],
            created_at: now,
            updated_at: now,
        }
    }
}
