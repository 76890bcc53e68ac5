//! Feedback cue tones
//!
//! Each game event maps to a short oscillator beep with a linear fade-out.
//! Synthesis belongs to the host; this module only decides what to play and
//! how loud.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A single beep: start at `volume`, ramp linearly to silence over `duration`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    pub waveform: Waveform,
    /// Start gain, 0.0 - 1.0
    pub volume: f32,
}

impl Tone {
    const fn new(frequency: f32, duration: f32, waveform: Waveform, volume: f32) -> Self {
        Self {
            frequency,
            duration,
            waveform,
            volume,
        }
    }

    /// Copy with the gain multiplied by `gain`
    pub fn scaled(self, gain: f32) -> Self {
        Self {
            volume: self.volume * gain.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_audible(&self) -> bool {
        self.volume > 0.0 && self.duration > 0.0
    }
}

/// The beep for an event, if it has one
pub fn tone_for(event: GameEvent) -> Option<Tone> {
    let tone = match event {
        GameEvent::Jump => Tone::new(660.0, 0.05, Waveform::Triangle, 0.15),
        GameEvent::DoubleJump => Tone::new(520.0, 0.05, Waveform::Sawtooth, 0.15),
        GameEvent::CoinCollected => Tone::new(1200.0, 0.03, Waveform::Square, 0.12),
        GameEvent::PowerupCollected(_) => Tone::new(300.0, 0.08, Waveform::Sine, 0.18),
        GameEvent::ShieldBlock => Tone::new(200.0, 0.06, Waveform::Triangle, 0.18),
        GameEvent::GameOver => Tone::new(80.0, 0.5, Waveform::Sine, 0.25),
        GameEvent::PauseToggled(_) => return None,
    };
    Some(tone)
}

/// Volume stage between the cue table and the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Mixer {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// The tone to play for an event at the current volume, if any
    pub fn tone(&self, event: GameEvent) -> Option<Tone> {
        tone_for(event)
            .map(|t| t.scaled(self.effective_volume()))
            .filter(Tone::is_audible)
    }
}
