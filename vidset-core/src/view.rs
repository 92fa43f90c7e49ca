/// Widgets the settings controller writes to.
pub trait SettingsView {
    /// Label showing the staged resolution, e.g. `1920x1080`.
    fn set_resolution_text(&mut self, text: &str);

    fn set_fullscreen_checked(&mut self, checked: bool);

    fn set_windowed_checked(&mut self, checked: bool);

    /// Show the confirm-or-revert dialogue. It is modal while visible.
    fn show_revert_dialogue(&mut self);

    fn hide_revert_dialogue(&mut self);

    fn set_countdown_text(&mut self, text: &str);
}

/// Plain-data view that front ends render from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelModel {
    pub resolution_text: String,
    pub fullscreen_checked: bool,
    pub windowed_checked: bool,
    pub dialogue_visible: bool,
    pub countdown_text: String,
}

impl PanelModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsView for PanelModel {
    fn set_resolution_text(&mut self, text: &str) {
        self.resolution_text = text.to_string();
    }

    fn set_fullscreen_checked(&mut self, checked: bool) {
        self.fullscreen_checked = checked;
    }

    fn set_windowed_checked(&mut self, checked: bool) {
        self.windowed_checked = checked;
    }

    fn show_revert_dialogue(&mut self) {
        self.dialogue_visible = true;
    }

    fn hide_revert_dialogue(&mut self) {
        self.dialogue_visible = false;
    }

    fn set_countdown_text(&mut self, text: &str) {
        self.countdown_text = text.to_string();
    }
}
