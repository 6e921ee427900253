use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter)]
pub enum UpdateMenuState {
    #[default]
    Idle,
    Checking,
    Available,
    Downloading,
    ReadyToInstall,
}

/// Update lifecycle notifications sent by the host process.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    StrumDisplay,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UpdateEvent {
    CheckingForUpdate,
    UpdateAvailable,
    UpdateNotAvailable,
    UpdateDownloaded,
}

impl UpdateEvent {
    pub fn target_state(self) -> UpdateMenuState {
        match self {
            Self::CheckingForUpdate => UpdateMenuState::Checking,
            Self::UpdateAvailable => UpdateMenuState::Downloading,
            Self::UpdateNotAvailable => UpdateMenuState::Idle,
            Self::UpdateDownloaded => UpdateMenuState::ReadyToInstall,
        }
    }

    fn expected_predecessors(self) -> &'static [UpdateMenuState] {
        use UpdateMenuState::*;
        match self {
            Self::CheckingForUpdate => &[Idle, Checking],
            Self::UpdateAvailable => &[Checking, Available, Downloading],
            Self::UpdateNotAvailable => &[Checking, Idle],
            Self::UpdateDownloaded => &[Available, Downloading, ReadyToInstall],
        }
    }
}

/// Positional entries of the update section of the application menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum UpdateMenuEntry {
    VersionLabel,
    CheckNow,
    CheckingNow,
    Downloading,
    InstallAndRestart,
}

pub const UPDATE_ENTRY_COUNT: usize = 5;

impl UpdateMenuEntry {
    pub fn index(self) -> usize {
        self as usize
    }
}

impl UpdateMenuState {
    /// The managed entry shown in this state. The version label is always shown.
    pub fn visible_entry(self) -> UpdateMenuEntry {
        match self {
            Self::Idle => UpdateMenuEntry::CheckNow,
            Self::Checking => UpdateMenuEntry::CheckingNow,
            Self::Available | Self::Downloading => UpdateMenuEntry::Downloading,
            Self::ReadyToInstall => UpdateMenuEntry::InstallAndRestart,
        }
    }

    pub fn visibility(self) -> [bool; UPDATE_ENTRY_COUNT] {
        let shown = self.visible_entry();
        let mut vector = [false; UPDATE_ENTRY_COUNT];
        for entry in UpdateMenuEntry::iter() {
            vector[entry.index()] = entry == UpdateMenuEntry::VersionLabel || entry == shown;
        }
        vector
    }
}

/// Owns the update section's visibility vector.
///
/// Every event is accepted in every state and forces the state its name
/// implies, so duplicated or reordered notifications never wedge the menu.
#[derive(Debug, Clone)]
pub struct UpdateMenuController {
    state: UpdateMenuState,
    visibility: [bool; UPDATE_ENTRY_COUNT],
}

impl Default for UpdateMenuController {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateMenuController {
    pub fn new() -> Self {
        let state = UpdateMenuState::default();
        Self {
            state,
            visibility: state.visibility(),
        }
    }

    pub fn state(&self) -> UpdateMenuState {
        self.state
    }

    pub fn visibility(&self) -> &[bool; UPDATE_ENTRY_COUNT] {
        &self.visibility
    }

    pub fn is_visible(&self, entry: UpdateMenuEntry) -> bool {
        self.visibility[entry.index()]
    }

    pub fn handle(&mut self, event: UpdateEvent) -> UpdateMenuState {
        let previous = self.state;
        let next = event.target_state();

        if !event.expected_predecessors().contains(&previous) {
            log::warn!("Update event '{event}' received while {previous}, applying anyway");
        }
        log::debug!("Update menu {previous} -> {next} on '{event}'");

        self.state = next;
        self.visibility = next.visibility();
        next
    }
}
