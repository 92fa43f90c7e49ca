use std::time::{Duration, Instant};

use vidset_core::prefs::{RESOLUTION_KEY, WINDOW_MODE_KEY};
use vidset_core::{
    PanelModel, Resolution, RevertState, SettingsStore, SimulatedDisplay, TomlStore,
    VideoSettingsController,
};

fn modes() -> Vec<Resolution> {
    vec![
        Resolution::new(1280, 720),
        Resolution::new(1920, 1080),
        Resolution::new(2560, 1440),
    ]
}

fn open(path: &std::path::Path) -> VideoSettingsController<SimulatedDisplay, TomlStore, PanelModel> {
    let store = TomlStore::open(path).expect("open prefs");
    let mut controller =
        VideoSettingsController::new(SimulatedDisplay::new(modes()), store, PanelModel::new());
    controller.initialize();
    controller.attach();
    controller
}

#[test]
fn confirmed_settings_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");
    let t0 = Instant::now();

    let mut first = open(&path);
    first.stage_next_resolution();
    first.stage_next_resolution();
    first.on_fullscreen_toggle_changed(false);
    first.apply_changes_with_revert_window(10, t0);
    first.update(t0 + Duration::from_secs(3));
    first.confirm_and_cancel_revert();
    first.store_mut().flush().unwrap();

    let second = open(&path);
    assert_eq!(second.confirmed_resolution_index(), 1);
    assert_eq!(second.confirmed_resolution(), Some(Resolution::new(1920, 1080)));
    assert!(!second.confirmed_fullscreen());
    assert!(second.view().windowed_checked);
    assert_eq!(second.revert_state(), RevertState::Idle);
}

#[test]
fn unconfirmed_settings_are_rolled_back_on_disk_too() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");
    let t0 = Instant::now();

    let mut controller = open(&path);
    controller.stage_previous_resolution();
    controller.on_fullscreen_toggle_changed(false);
    controller.apply_changes_with_revert_window(5, t0);

    // Mid-window the new values are what the store holds
    assert_eq!(controller.store().get_int(RESOLUTION_KEY, -1), 1);
    assert!(!controller.store().get_bool(WINDOW_MODE_KEY, true));

    for second in 1..=5 {
        controller.update(t0 + Duration::from_secs(second));
    }
    controller.store_mut().flush().unwrap();

    let reopened = TomlStore::open(&path).unwrap();
    assert_eq!(reopened.get_int(RESOLUTION_KEY, -1), 2);
    assert!(reopened.get_bool(WINDOW_MODE_KEY, false));
}

#[test]
fn cycling_through_every_mode_returns_home() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = open(&dir.path().join("prefs.toml"));
    let start = controller.staged_resolution_index();
    let n = controller.available_resolutions().len();

    for _ in 0..n {
        controller.stage_next_resolution();
    }
    assert_eq!(controller.staged_resolution_index(), start);

    for _ in 0..n {
        controller.stage_previous_resolution();
    }
    assert_eq!(controller.staged_resolution_index(), start);

    controller.stage_next_resolution();
    controller.stage_previous_resolution();
    assert_eq!(controller.staged_resolution_index(), start);
}
