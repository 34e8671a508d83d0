/// Global settings broadcast by the manager into every active scene.
///
/// Nodes never read ambient state: the manager pushes a settings cascade at
/// scene creation and on every change edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Master volume in `[0, 1]`, multiplied into each node's own volume.
    pub master_volume: f64,
    /// Host-defined effect-density knob in `[0, 1]`; factories read it to
    /// scale particle counts and similar.
    pub stability: f64,
    /// Whether the whole forest is frozen (draw continues).
    pub paused: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            stability: 1.0,
            paused: false,
        }
    }
}

/// Partial settings update from the dashboard/transport boundary.
///
/// `toggle_pause` flips the current pause state rather than setting it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsDelta {
    /// New master volume, clamped to `[0, 1]`.
    pub master_volume: Option<f64>,
    /// New stability value, clamped to `[0, 1]`.
    pub stability: Option<f64>,
    /// Flip the pause state.
    pub toggle_pause: bool,
}

/// Which edges a delta produced; drives the manager's cascades.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsChange {
    /// Master volume changed.
    pub volume_changed: bool,
    /// Pause state flipped.
    pub pause_toggled: bool,
}

impl Settings {
    /// Fold a delta in, reporting which edges fired.
    pub fn apply(&mut self, delta: &SettingsDelta) -> SettingsChange {
        let mut change = SettingsChange::default();
        if let Some(volume) = delta.master_volume {
            let volume = volume.clamp(0.0, 1.0);
            if volume != self.master_volume {
                self.master_volume = volume;
                change.volume_changed = true;
            }
        }
        if let Some(stability) = delta.stability {
            self.stability = stability.clamp(0.0, 1.0);
        }
        if delta.toggle_pause {
            self.paused = !self.paused;
            change.pause_toggled = true;
        }
        change
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/settings.rs"]
mod tests;
