pub mod controller;
pub mod display;
pub mod prefs;
pub mod resolution;
pub mod timer;
pub mod view;
pub mod wrap;

pub use controller::{RevertState, VideoSettingsController, countdown_label};
pub use display::{Display, SimulatedDisplay};
pub use prefs::{MemoryStore, SettingsStore, StoreError, TomlStore};
pub use resolution::Resolution;
pub use view::{PanelModel, SettingsView};
