/// Host-implemented handle to one playable sound.
///
/// The engine owns when a sound starts, stops, pauses and how loud it is;
/// the host owns the actual audio backend. All calls are fire-and-forget.
pub trait SoundHandle {
    /// Start (or restart) playback.
    fn play(&mut self);
    /// Stop playback and rewind.
    fn stop(&mut self);
    /// Pause playback, keeping position.
    fn pause(&mut self);
    /// Resume from a pause.
    fn resume(&mut self);
    /// Set effective volume in `[0, 1]` (node volume x master volume).
    fn set_volume(&mut self, volume: f64);
}

/// Audio capability composed by sound-bearing nodes.
pub struct AudioBearing {
    /// Host sound handle.
    pub handle: Box<dyn SoundHandle>,
    /// Node-local volume in `[0, 1]`, scaled by the master volume.
    pub volume: f64,
    /// Looping sounds are stopped by `finish()`; one-shots are left to end
    /// on their own.
    pub looping: bool,
}

impl AudioBearing {
    /// Non-looping sound at full node volume.
    pub fn new(handle: Box<dyn SoundHandle>) -> Self {
        Self {
            handle,
            volume: 1.0,
            looping: false,
        }
    }

    /// Looping sound at full node volume.
    pub fn looping(handle: Box<dyn SoundHandle>) -> Self {
        Self {
            handle,
            volume: 1.0,
            looping: true,
        }
    }
}

impl std::fmt::Debug for AudioBearing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioBearing")
            .field("volume", &self.volume)
            .field("looping", &self.looping)
            .finish()
    }
}
