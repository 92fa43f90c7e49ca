//! The video settings controller.
//!
//! Users stage a resolution and window mode, apply them, and optionally open
//! a revert window: a visible countdown that restores the last confirmed
//! settings unless the user confirms first.
//!
//! ```text
//!            apply_changes_with_revert_window
//!   Idle ─────────────────────────────────────▶ PendingConfirmation
//!    ▲                                              │   ▲
//!    │  confirm_and_cancel_revert / countdown ends  │   │ apply again
//!    └──────────────────────────────────────────────┘   │ (restarts)
//!                                                   └───┘
//! ```

use std::time::Instant;

use crate::display::Display;
use crate::prefs::{RESOLUTION_KEY, SettingsStore, WINDOW_MODE_KEY};
use crate::resolution::Resolution;
use crate::timer::{Countdown, CountdownEvent};
use crate::view::SettingsView;
use crate::wrap::{next_wrapped_index, previous_wrapped_index};

/// Fullscreen flag used when nothing has been persisted yet.
pub const DEFAULT_FULLSCREEN: bool = true;

/// Where the confirm/revert workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertState {
    /// No countdown; what is applied is what was confirmed.
    Idle,
    /// Changes are applied and will be undone when the countdown runs out.
    PendingConfirmation { remaining_secs: u32 },
}

/// Text for the revert dialogue's countdown label.
pub fn countdown_label(seconds: u32) -> String {
    format!("reset in {} seconds.", seconds)
}

pub struct VideoSettingsController<D, S, V> {
    display: D,
    store: S,
    view: V,

    resolutions: Vec<Resolution>,
    staged_resolution_index: usize,
    staged_fullscreen: bool,

    // Revert target. Only confirm or a finished revert change these.
    confirmed_resolution_index: usize,
    confirmed_fullscreen: bool,

    countdown: Option<Countdown>,
    attached: bool,
}

impl<D, S, V> VideoSettingsController<D, S, V>
where
    D: Display,
    S: SettingsStore,
    V: SettingsView,
{
    /// Create a controller. Nothing is read or applied until [`initialize`](Self::initialize).
    pub fn new(display: D, store: S, view: V) -> Self {
        Self {
            display,
            store,
            view,
            resolutions: Vec::new(),
            staged_resolution_index: 0,
            staged_fullscreen: DEFAULT_FULLSCREEN,
            confirmed_resolution_index: 0,
            confirmed_fullscreen: DEFAULT_FULLSCREEN,
            countdown: None,
            attached: false,
        }
    }

    // ==============================================
    // Lifecycle
    // ==============================================

    /// Load persisted settings and apply them. The loaded values count as confirmed.
    pub fn initialize(&mut self) {
        self.cancel_countdown();
        self.resolutions = self.display.enumerate_resolutions();

        let index = self.load_resolution_index();
        let fullscreen = self.store.get_bool(WINDOW_MODE_KEY, DEFAULT_FULLSCREEN);

        self.staged_resolution_index = index;
        self.confirmed_resolution_index = index;
        self.staged_fullscreen = fullscreen;
        self.confirmed_fullscreen = fullscreen;

        match self.resolutions.get(index).copied() {
            Some(res) => {
                self.view.set_resolution_text(&res.to_string());
                self.display
                    .apply_resolution(res.width, res.height, fullscreen);
                self.store.set_int(RESOLUTION_KEY, index as i32);
            }
            None => {
                log::warn!("Display reported no resolutions; only applying window mode");
                self.display.apply_fullscreen(fullscreen);
            }
        }

        self.reflect_window_mode(fullscreen);
        self.view.hide_revert_dialogue();

        log::info!(
            "Video settings loaded: {} modes, index {}, fullscreen {}",
            self.resolutions.len(),
            index,
            fullscreen
        );
    }

    /// Start listening to toggle notifications.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop listening to toggle notifications.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn load_resolution_index(&self) -> usize {
        let default = self.resolutions.len().saturating_sub(1);
        let stored = self.store.get_int(RESOLUTION_KEY, default as i32);

        match usize::try_from(stored) {
            Ok(index) if index < self.resolutions.len() => index,
            _ if self.resolutions.is_empty() => 0,
            _ => {
                // Enumeration changed since the index was saved
                log::warn!(
                    "Stored resolution index {} is outside the {} available modes, using {}",
                    stored,
                    self.resolutions.len(),
                    default
                );
                default
            }
        }
    }

    // ==============================================
    // Resolution
    // ==============================================

    /// Stage the next mode in the list, wrapping at the end. Preview only.
    pub fn stage_next_resolution(&mut self) -> usize {
        let index = next_wrapped_index(self.resolutions.len(), self.staged_resolution_index);
        self.stage_resolution(index);
        index
    }

    /// Stage the previous mode in the list, wrapping at the start. Preview only.
    pub fn stage_previous_resolution(&mut self) -> usize {
        let index = previous_wrapped_index(self.resolutions.len(), self.staged_resolution_index);
        self.stage_resolution(index);
        index
    }

    fn stage_resolution(&mut self, index: usize) {
        self.staged_resolution_index = index;
        if let Some(res) = self.resolutions.get(index) {
            self.view.set_resolution_text(&res.to_string());
            log::debug!("Staged resolution {} ({})", index, res);
        }
    }

    /// Apply the staged resolution to the display and persist it.
    pub fn apply_staged_resolution(&mut self) {
        self.set_resolution(self.staged_resolution_index);
    }

    /// Label, apply and persist the mode at `index`, keeping the current window mode.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_resolution(&mut self, index: usize) {
        let Some(res) = self.resolutions.get(index).copied() else {
            log::debug!("No resolution at index {}, nothing applied", index);
            return;
        };

        self.view.set_resolution_text(&res.to_string());
        let fullscreen = self.display.current_fullscreen();
        self.display.apply_resolution(res.width, res.height, fullscreen);
        self.store.set_int(RESOLUTION_KEY, index as i32);

        log::info!("Applied resolution {}", res);
    }

    // ==============================================
    // Window mode
    // ==============================================

    /// Stage a window mode. Preview only.
    pub fn set_staged_window_mode(&mut self, fullscreen: bool) {
        self.staged_fullscreen = fullscreen;
        log::debug!("Staged fullscreen {}", fullscreen);
    }

    /// Called when the user flips the fullscreen toggle.
    pub fn on_fullscreen_toggle_changed(&mut self, fullscreen: bool) {
        if self.attached {
            self.set_staged_window_mode(fullscreen);
        } else {
            log::trace!("Toggle change ignored while detached");
        }
    }

    /// Apply the staged window mode to the display and persist it.
    pub fn apply_staged_window_mode(&mut self) {
        self.apply_window_mode(self.staged_fullscreen);
    }

    fn apply_window_mode(&mut self, fullscreen: bool) {
        self.display.apply_fullscreen(fullscreen);
        self.store.set_bool(WINDOW_MODE_KEY, fullscreen);
        log::info!("Applied fullscreen {}", fullscreen);
    }

    fn reflect_window_mode(&mut self, fullscreen: bool) {
        self.view.set_fullscreen_checked(fullscreen);
        self.view.set_windowed_checked(!fullscreen);
    }

    // ==============================================
    // Confirm / revert
    // ==============================================

    /// Apply everything staged and open a revert window of `timeout_secs`.
    ///
    /// Unless [`confirm_and_cancel_revert`](Self::confirm_and_cancel_revert) is
    /// called before the countdown runs out, the last confirmed settings come
    /// back. Starting a new window cancels any pending one.
    pub fn apply_changes_with_revert_window(&mut self, timeout_secs: u32, now: Instant) {
        self.cancel_countdown();

        self.apply_staged_resolution();
        self.apply_staged_window_mode();

        self.view.show_revert_dialogue();
        self.view.set_countdown_text(&countdown_label(timeout_secs));
        self.countdown = Some(Countdown::start(timeout_secs, now));

        log::info!("Revert window opened for {}s", timeout_secs);

        // A zero-length window has nothing to wait for
        self.update(now);
    }

    /// Advance the revert countdown. Call once per frame.
    pub fn update(&mut self, now: Instant) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };

        for event in countdown.poll(now) {
            match event {
                CountdownEvent::Tick(remaining) => {
                    self.view.set_countdown_text(&countdown_label(remaining));
                    log::debug!("Revert in {}s", remaining);
                }
                CountdownEvent::Finished => {
                    log::info!("Revert window expired without confirmation");
                    self.revert();
                }
            }
        }
    }

    /// Restore the last confirmed settings and close the dialogue.
    pub fn revert(&mut self) {
        self.cancel_countdown();
        self.view.hide_revert_dialogue();

        self.staged_resolution_index = self.confirmed_resolution_index;
        self.apply_staged_resolution();

        self.staged_fullscreen = self.confirmed_fullscreen;
        self.apply_window_mode(self.confirmed_fullscreen);
        self.reflect_window_mode(self.confirmed_fullscreen);

        log::info!(
            "Reverted to index {}, fullscreen {}",
            self.confirmed_resolution_index,
            self.confirmed_fullscreen
        );
    }

    /// Keep the applied settings: stop the countdown and make them the revert target.
    pub fn confirm_and_cancel_revert(&mut self) {
        self.cancel_countdown();
        self.view.hide_revert_dialogue();

        self.confirmed_resolution_index = self.staged_resolution_index;
        // Read back from the display in case staging and reality diverged
        self.confirmed_fullscreen = self.display.current_fullscreen();

        log::info!(
            "Confirmed index {}, fullscreen {}",
            self.confirmed_resolution_index,
            self.confirmed_fullscreen
        );
    }

    fn cancel_countdown(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.cancel();
        }
    }

    pub fn revert_state(&self) -> RevertState {
        match &self.countdown {
            Some(countdown) => RevertState::PendingConfirmation {
                remaining_secs: countdown.remaining(),
            },
            None => RevertState::Idle,
        }
    }

    pub fn is_pending_confirmation(&self) -> bool {
        self.countdown.is_some()
    }

    // ==============================================
    // Accessors
    // ==============================================

    pub fn available_resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn staged_resolution_index(&self) -> usize {
        self.staged_resolution_index
    }

    pub fn staged_resolution(&self) -> Option<Resolution> {
        self.resolutions.get(self.staged_resolution_index).copied()
    }

    pub fn staged_fullscreen(&self) -> bool {
        self.staged_fullscreen
    }

    pub fn confirmed_resolution_index(&self) -> usize {
        self.confirmed_resolution_index
    }

    pub fn confirmed_resolution(&self) -> Option<Resolution> {
        self.resolutions.get(self.confirmed_resolution_index).copied()
    }

    pub fn confirmed_fullscreen(&self) -> bool {
        self.confirmed_fullscreen
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Widgets the user interacts with directly, such as the mode toggles.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::display::SimulatedDisplay;
    use crate::prefs::MemoryStore;
    use crate::view::PanelModel;

    type TestController = VideoSettingsController<SimulatedDisplay, MemoryStore, PanelModel>;

    fn modes() -> Vec<Resolution> {
        vec![
            Resolution::new(1280, 720),
            Resolution::new(1920, 1080),
            Resolution::new(2560, 1440),
        ]
    }

    fn controller_with(store: MemoryStore) -> TestController {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut controller =
            VideoSettingsController::new(SimulatedDisplay::new(modes()), store, PanelModel::new());
        controller.initialize();
        controller.attach();
        controller
    }

    fn controller() -> TestController {
        controller_with(MemoryStore::new())
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    // =============================================================
    // Startup
    // =============================================================

    #[test]
    fn test_initialize_defaults_to_last_mode_fullscreen() {
        let c = controller();

        assert_eq!(c.confirmed_resolution_index(), 2);
        assert_eq!(c.staged_resolution_index(), 2);
        assert!(c.confirmed_fullscreen());
        assert!(c.staged_fullscreen());

        assert_eq!(c.display().current_resolution(), Some(Resolution::new(2560, 1440)));
        assert!(c.display().current_fullscreen());
        assert_eq!(c.display().write_count(), 1);

        assert_eq!(c.view().resolution_text, "2560x1440");
        assert!(c.view().fullscreen_checked);
        assert!(!c.view().windowed_checked);
        assert!(!c.view().dialogue_visible);
        assert_eq!(c.revert_state(), RevertState::Idle);
    }

    #[test]
    fn test_initialize_persists_resolution_but_not_window_mode() {
        let c = controller();
        assert_eq!(c.store().get_int(RESOLUTION_KEY, -1), 2);
        assert!(!c.store().has_key(WINDOW_MODE_KEY));
    }

    #[test]
    fn test_initialize_reads_persisted_values() {
        let mut store = MemoryStore::new();
        store.set_int(RESOLUTION_KEY, 0);
        store.set_bool(WINDOW_MODE_KEY, false);

        let c = controller_with(store);
        assert_eq!(c.confirmed_resolution_index(), 0);
        assert!(!c.confirmed_fullscreen());
        assert_eq!(c.display().current_resolution(), Some(Resolution::new(1280, 720)));
        assert!(!c.display().current_fullscreen());
        assert!(!c.view().fullscreen_checked);
        assert!(c.view().windowed_checked);
    }

    #[test]
    fn test_initialize_replaces_stale_index() {
        let mut store = MemoryStore::new();
        store.set_int(RESOLUTION_KEY, 7);

        let c = controller_with(store);
        assert_eq!(c.confirmed_resolution_index(), 2);
        assert_eq!(c.store().get_int(RESOLUTION_KEY, -1), 2);
    }

    #[test]
    fn test_initialize_without_modes() {
        let mut c = VideoSettingsController::new(
            SimulatedDisplay::new(Vec::new()),
            MemoryStore::new(),
            PanelModel::new(),
        );
        c.initialize();

        assert_eq!(c.staged_resolution_index(), 0);
        assert_eq!(c.staged_resolution(), None);
        assert!(c.display().current_fullscreen());
        assert_eq!(c.stage_next_resolution(), 0);
        assert_eq!(c.stage_previous_resolution(), 0);
        c.apply_staged_resolution();
        assert_eq!(c.display().current_resolution(), None);
    }

    // =============================================================
    // Staging
    // =============================================================

    #[test]
    fn test_next_wraps_and_updates_label() {
        let mut c = controller();
        assert_eq!(c.stage_next_resolution(), 0);
        assert_eq!(c.view().resolution_text, "1280x720");
        assert_eq!(c.stage_previous_resolution(), 2);
        assert_eq!(c.view().resolution_text, "2560x1440");
    }

    #[test]
    fn test_staging_does_not_touch_display_or_store() {
        let mut c = controller();
        let writes = c.display().write_count();

        c.stage_next_resolution();
        c.stage_next_resolution();
        c.set_staged_window_mode(false);

        assert_eq!(c.display().write_count(), writes);
        assert_eq!(c.store().get_int(RESOLUTION_KEY, -1), 2);
        assert!(!c.store().has_key(WINDOW_MODE_KEY));
        assert_eq!(c.confirmed_resolution_index(), 2);
        assert!(c.confirmed_fullscreen());
    }

    #[test]
    fn test_apply_staged_values() {
        let mut c = controller();
        c.stage_next_resolution();
        c.apply_staged_resolution();
        assert_eq!(c.display().current_resolution(), Some(Resolution::new(1280, 720)));
        assert!(c.display().current_fullscreen());
        assert_eq!(c.store().get_int(RESOLUTION_KEY, -1), 0);

        c.set_staged_window_mode(false);
        c.apply_staged_window_mode();
        assert!(!c.display().current_fullscreen());
        assert!(!c.store().get_bool(WINDOW_MODE_KEY, true));

        // Applying alone never confirms
        assert_eq!(c.confirmed_resolution_index(), 2);
        assert!(c.confirmed_fullscreen());
    }

    #[test]
    fn test_toggle_notifications_follow_attachment() {
        let mut c = controller();
        c.on_fullscreen_toggle_changed(false);
        assert!(!c.staged_fullscreen());

        c.detach();
        c.on_fullscreen_toggle_changed(true);
        assert!(!c.staged_fullscreen());

        c.attach();
        c.on_fullscreen_toggle_changed(true);
        assert!(c.staged_fullscreen());
    }

    // =============================================================
    // Revert window
    // =============================================================

    #[test]
    fn test_revert_window_shows_dialogue_and_applies() {
        let t0 = Instant::now();
        let mut c = controller();
        c.stage_next_resolution();
        c.set_staged_window_mode(false);

        c.apply_changes_with_revert_window(5, t0);

        assert!(c.view().dialogue_visible);
        assert_eq!(c.view().countdown_text, "reset in 5 seconds.");
        assert_eq!(c.display().current_resolution(), Some(Resolution::new(1280, 720)));
        assert!(!c.display().current_fullscreen());
        assert_eq!(
            c.revert_state(),
            RevertState::PendingConfirmation { remaining_secs: 5 }
        );
    }

    #[test]
    fn test_countdown_updates_label_each_second() {
        let t0 = Instant::now();
        let mut c = controller();
        c.apply_changes_with_revert_window(5, t0);

        c.update(t0 + Duration::from_millis(500));
        assert_eq!(c.view().countdown_text, "reset in 5 seconds.");
        c.update(t0 + secs(1));
        assert_eq!(c.view().countdown_text, "reset in 4 seconds.");
        c.update(t0 + secs(4));
        assert_eq!(c.view().countdown_text, "reset in 1 seconds.");
        assert_eq!(
            c.revert_state(),
            RevertState::PendingConfirmation { remaining_secs: 1 }
        );
    }

    #[test]
    fn test_expired_window_reverts() {
        let t0 = Instant::now();
        let mut c = controller();
        c.stage_next_resolution();
        c.set_staged_window_mode(false);
        c.apply_changes_with_revert_window(5, t0);

        c.update(t0 + secs(5));

        assert_eq!(c.revert_state(), RevertState::Idle);
        assert!(!c.view().dialogue_visible);
        assert_eq!(c.staged_resolution_index(), 2);
        assert!(c.staged_fullscreen());
        assert_eq!(c.display().current_resolution(), Some(Resolution::new(2560, 1440)));
        assert!(c.display().current_fullscreen());
        assert_eq!(c.store().get_int(RESOLUTION_KEY, -1), 2);
        assert!(c.store().get_bool(WINDOW_MODE_KEY, false));
        assert!(c.view().fullscreen_checked);
        assert!(!c.view().windowed_checked);
        assert_eq!(c.view().resolution_text, "2560x1440");
    }

    #[test]
    fn test_confirm_keeps_new_values() {
        let t0 = Instant::now();
        let mut c = controller();
        c.stage_previous_resolution();
        c.set_staged_window_mode(false);
        c.apply_changes_with_revert_window(5, t0);

        c.update(t0 + secs(2));
        c.confirm_and_cancel_revert();

        assert_eq!(c.revert_state(), RevertState::Idle);
        assert!(!c.view().dialogue_visible);
        assert_eq!(c.confirmed_resolution_index(), 1);
        assert!(!c.confirmed_fullscreen());

        // The cancelled countdown must never fire
        let writes = c.display().write_count();
        c.update(t0 + secs(60));
        assert_eq!(c.display().write_count(), writes);
        assert_eq!(c.staged_resolution_index(), 1);
        assert_eq!(c.display().current_resolution(), Some(Resolution::new(1920, 1080)));
    }

    #[test]
    fn test_confirm_reads_fullscreen_from_display() {
        let t0 = Instant::now();
        let mut c = controller();
        c.apply_changes_with_revert_window(5, t0);

        // Staging changes after apply are not what the display shows
        c.set_staged_window_mode(false);
        c.confirm_and_cancel_revert();
        assert!(c.confirmed_fullscreen());
    }

    #[test]
    fn test_confirm_without_countdown_is_harmless() {
        let mut c = controller();
        c.confirm_and_cancel_revert();
        assert_eq!(c.revert_state(), RevertState::Idle);
        assert_eq!(c.confirmed_resolution_index(), 2);
    }

    #[test]
    fn test_new_window_restarts_countdown() {
        let t0 = Instant::now();
        let mut c = controller();
        c.stage_next_resolution();
        c.apply_changes_with_revert_window(5, t0);

        c.update(t0 + secs(3));
        c.stage_next_resolution();
        c.apply_changes_with_revert_window(5, t0 + secs(3));
        assert_eq!(c.view().countdown_text, "reset in 5 seconds.");

        // The first window would have expired here
        c.update(t0 + secs(6));
        assert!(c.is_pending_confirmation());
        assert_eq!(c.staged_resolution_index(), 1);

        c.update(t0 + secs(8));
        assert_eq!(c.revert_state(), RevertState::Idle);
        assert_eq!(c.staged_resolution_index(), 2);
    }

    #[test]
    fn test_zero_timeout_reverts_immediately() {
        let t0 = Instant::now();
        let mut c = controller();
        c.stage_next_resolution();
        c.apply_changes_with_revert_window(0, t0);

        assert_eq!(c.revert_state(), RevertState::Idle);
        assert!(!c.view().dialogue_visible);
        assert_eq!(c.staged_resolution_index(), 2);
    }

    #[test]
    fn test_manual_revert_cancels_countdown() {
        let t0 = Instant::now();
        let mut c = controller();
        c.stage_next_resolution();
        c.apply_changes_with_revert_window(5, t0);

        c.revert();
        assert_eq!(c.revert_state(), RevertState::Idle);
        assert_eq!(c.staged_resolution_index(), 2);

        let writes = c.display().write_count();
        c.update(t0 + secs(10));
        assert_eq!(c.display().write_count(), writes);
    }
}
