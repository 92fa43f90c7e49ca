use std::time::Instant;

use vidset_core::{
    PanelModel, RevertState, SettingsView, SimulatedDisplay, TomlStore, VideoSettingsController,
};

pub type Controller = VideoSettingsController<SimulatedDisplay, TomlStore, PanelModel>;

/// Application state for the TUI
pub struct AppState {
    /// The video settings being edited
    pub controller: Controller,
    /// Seconds given to confirm applied changes
    pub revert_timeout_secs: u32,
    /// Status message to display
    pub status_message: String,
    /// Error message if any
    pub error_message: Option<String>,
    /// Last save failed; frame ticks stop retrying until the user acts again
    save_failed: bool,
}

impl AppState {
    pub fn new(mut controller: Controller, revert_timeout_secs: u32) -> Self {
        controller.initialize();
        controller.attach();

        let status_message = format!("Display: {}", controller.display().describe());
        Self {
            controller,
            revert_timeout_secs,
            status_message,
            error_message: None,
            save_failed: false,
        }
    }

    /// The panel widgets as the controller last wrote them.
    pub fn panel(&self) -> &PanelModel {
        self.controller.view()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.panel().dialogue_visible
    }

    /// Apply staged settings and start the confirm countdown.
    pub fn apply_with_revert_window(&mut self, now: Instant) {
        self.controller
            .apply_changes_with_revert_window(self.revert_timeout_secs, now);
        self.save_failed = false;
        self.refresh_status();
    }

    pub fn apply_resolution(&mut self) {
        self.controller.apply_staged_resolution();
        self.save_failed = false;
        self.refresh_status();
    }

    pub fn apply_window_mode(&mut self) {
        self.controller.apply_staged_window_mode();
        self.save_failed = false;
        self.refresh_status();
    }

    /// The user picked a window mode on the toggle pair.
    pub fn select_window_mode(&mut self, fullscreen: bool) {
        let view = self.controller.view_mut();
        view.set_fullscreen_checked(fullscreen);
        view.set_windowed_checked(!fullscreen);
        self.controller.on_fullscreen_toggle_changed(fullscreen);
    }

    pub fn confirm(&mut self) {
        self.controller.confirm_and_cancel_revert();
        self.save_failed = false;
        self.status_message = format!("Kept {}", self.controller.display().describe());
    }

    pub fn revert(&mut self) {
        self.controller.revert();
        self.save_failed = false;
        self.status_message = format!("Restored {}", self.controller.display().describe());
    }

    /// Drive the countdown and persist anything that changed.
    pub fn tick(&mut self, now: Instant) {
        let was_pending = self.controller.is_pending_confirmation();
        self.controller.update(now);
        if was_pending && !self.controller.is_pending_confirmation() {
            self.status_message = format!(
                "Not confirmed in time, restored {}",
                self.controller.display().describe()
            );
        }
        if !self.save_failed {
            self.flush_prefs();
        }
    }

    /// Write preferences to disk if dirty. Failures are surfaced, not fatal.
    pub fn flush_prefs(&mut self) {
        match self.controller.store_mut().flush() {
            Ok(()) => self.save_failed = false,
            Err(e) => {
                log::error!("Failed to save preferences: {}", e);
                self.error_message = Some(e.to_string());
                self.save_failed = true;
            }
        }
    }

    pub fn save_failed(&self) -> bool {
        self.save_failed
    }

    pub fn refresh_status(&mut self) {
        self.error_message = None;
        self.status_message = match self.controller.revert_state() {
            RevertState::Idle => format!("Display: {}", self.controller.display().describe()),
            RevertState::PendingConfirmation { remaining_secs } => format!(
                "Applied {}, confirm within {}s",
                self.controller.display().describe(),
                remaining_secs
            ),
        };
    }
}
