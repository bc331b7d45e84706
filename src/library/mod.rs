//! Library/project index.
//!
//! Tracks the project collection, a recency list of up to
//! [`RECENT_TABS_CAP`] documents and the active editing state. Every
//! mutation snapshots the durable subset (projects, recency list,
//! settings) to the [`PersistenceGateway`]; transient editing and
//! playback state is deliberately excluded from the snapshot.

pub mod settings;
pub mod store;


use crate::error::TabError;
use crate::library::settings::{AppSettings, EditorMode, PlaybackState, PlaybackUpdate};
use crate::library::store::PersistenceGateway;
use crate::tablature::document::{TabDocument, TabProject};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum number of entries on the recency list.
pub const RECENT_TABS_CAP: usize = 10;

const STORAGE_KEY: &str = "tabscribe-storage";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    projects: Vec<TabProject>,
    recent_tabs: Vec<TabDocument>,
    settings: AppSettings,
}

/// Entry of a mixed library listing. The discriminant is explicit
/// rather than inferred from field shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LibraryEntry<'a> {
    Tab(&'a TabDocument),
    Project(&'a TabProject),
}

pub struct TabLibrary {
    current_tab: Option<TabDocument>,
    current_project_id: Option<String>,
    projects: Vec<TabProject>,
    recent_tabs: Vec<TabDocument>,
    settings: AppSettings,
    playback: PlaybackState,
    gateway: Box<dyn PersistenceGateway>,
}

impl TabLibrary {
    /// Opens the library, restoring a previous snapshot best-effort: a
    /// missing or unreadable snapshot starts the index empty.
    pub fn open(gateway: Box<dyn PersistenceGateway>) -> Self {
        let restored = match gateway.load(STORAGE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<PersistedState>(&blob) {
                Ok(state) => state,
                Err(err) => {
                    log::warn!("discarding unreadable library snapshot: {err}");
                    PersistedState::default()
                }
            },
            Ok(None) => PersistedState::default(),
            Err(err) => {
                log::warn!("could not restore library state: {err}");
                PersistedState::default()
            }
        };
        TabLibrary {
            current_tab: None,
            current_project_id: None,
            projects: restored.projects,
            recent_tabs: restored.recent_tabs,
            settings: restored.settings,
            playback: PlaybackState::default(),
            gateway,
        }
    }

    /// Creates a document with the configured default tuning, makes it
    /// active and pushes it onto the recency list.
    pub fn create_tab(&mut self, title: &str, artist: &str) -> TabDocument {
        let tab = TabDocument::new(title, artist, self.settings.default_tuning.clone());
        self.current_tab = Some(tab.clone());
        self.add_to_recent(tab.clone());
        tab
    }

    /// Replaces `tab` everywhere it is referenced (projects, active
    /// document) and refreshes its recency.
    pub fn update_tab(&mut self, tab: TabDocument) {
        for project in &mut self.projects {
            for slot in &mut project.tabs {
                if slot.id == tab.id {
                    *slot = tab.clone();
                }
            }
        }
        self.current_tab = Some(tab.clone());
        self.add_to_recent(tab);
    }

    /// Removes the document from every project and the recency list,
    /// clearing the active reference when it pointed at it. Idempotent.
    pub fn delete_tab(&mut self, tab_id: &str) {
        for project in &mut self.projects {
            project.tabs.retain(|tab| tab.id != tab_id);
        }
        self.recent_tabs.retain(|tab| tab.id != tab_id);
        if self.current_tab.as_ref().is_some_and(|tab| tab.id == tab_id) {
            self.current_tab = None;
        }
        self.persist();
    }

    pub fn create_project(&mut self, name: &str, description: &str) -> TabProject {
        let project = TabProject::named(name, description);
        self.current_project_id = Some(project.id.clone());
        self.projects.push(project.clone());
        self.persist();
        project
    }

    /// Appends `tab` to the addressed project; an unknown project id is
    /// a silent no-op.
    pub fn add_tab_to_project(&mut self, project_id: &str, tab: TabDocument) {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            log::debug!("project {project_id} not found, tab not added");
            return;
        };
        project.tabs.push(tab);
        project.updated_at = Utc::now();
        self.persist();
    }

    /// Head-inserts `tab`, dropping any prior entry with the same id
    /// and truncating to the most recent [`RECENT_TABS_CAP`].
    pub fn add_to_recent(&mut self, tab: TabDocument) {
        self.recent_tabs.retain(|recent| recent.id != tab.id);
        self.recent_tabs.insert(0, tab);
        self.recent_tabs.truncate(RECENT_TABS_CAP);
        self.persist();
    }

    pub fn set_current_tab(&mut self, tab: Option<TabDocument>) {
        self.current_tab = tab;
    }

    pub fn set_current_project(&mut self, project_id: Option<String>) {
        self.current_project_id = project_id;
    }

    /// Flips between beginner and advanced mode, coupling the advanced
    /// tool and MIDI info panels to the new mode.
    pub fn toggle_ui_mode(&mut self) {
        let ui = &mut self.settings.ui_mode;
        let was_beginner = ui.mode == EditorMode::Beginner;
        ui.mode = if was_beginner {
            EditorMode::Advanced
        } else {
            EditorMode::Beginner
        };
        ui.show_advanced_tools = was_beginner;
        ui.show_techniques = true;
        ui.show_midi_info = was_beginner;
        self.persist();
    }

    pub fn update_settings(&mut self, settings: AppSettings) {
        self.settings = settings;
        self.persist();
    }

    /// Playback state is transient and never persisted.
    pub fn update_playback(&mut self, update: PlaybackUpdate) {
        self.playback.apply(update);
    }

    /// Mixed listing of projects and recent documents with an explicit
    /// per-entry discriminant.
    pub fn entries(&self) -> Vec<LibraryEntry<'_>> {
        let mut entries: Vec<LibraryEntry<'_>> =
            self.projects.iter().map(LibraryEntry::Project).collect();
        entries.extend(self.recent_tabs.iter().map(LibraryEntry::Tab));
        entries
    }

    pub fn current_tab(&self) -> Option<&TabDocument> {
        self.current_tab.as_ref()
    }

    pub fn current_project_id(&self) -> Option<&str> {
        self.current_project_id.as_deref()
    }

    pub fn projects(&self) -> &[TabProject] {
        &self.projects
    }

    pub fn recent_tabs(&self) -> &[TabDocument] {
        &self.recent_tabs
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    fn persist(&self) {
        let snapshot = PersistedState {
            projects: self.projects.clone(),
            recent_tabs: self.recent_tabs.clone(),
            settings: self.settings.clone(),
        };
        let result = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| TabError::PersistenceUnavailable(err.to_string()))
            .and_then(|blob| self.gateway.save(STORAGE_KEY, &blob));
        if let Err(err) = result {
            // the next mutation re-saves the full state
            log::warn!("could not persist library state: {err}");
        }
    }
}
