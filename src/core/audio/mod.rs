//=========================================================================
// Audio Requests
//=========================================================================
//
// "Play sound" requests travel over a crossbeam channel to whichever
// audio subsystem owns the mixer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

//=== SoundRequest ========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    pub path: PathBuf,
    pub looped: bool,
    pub playback: PlaybackParams,
}

impl SoundRequest {
    pub fn once(path: impl Into<PathBuf>, playback: PlaybackParams) -> Self {
        Self {
            path: path.into(),
            looped: false,
            playback,
        }
    }
}

/// Volume, stereo balance (-1 left, +1 right) and speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackParams {
    pub volume: f32,
    pub balance: f32,
    pub speed: f32,
}

impl PlaybackParams {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            volume: 1.0,
            balance: 0.0,
            speed: 1.0,
        }
    }
}

/// Sending half of the audio request queue.
pub type SoundSender = Sender<SoundRequest>;
