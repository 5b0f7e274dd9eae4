//=========================================================================
// State-Change Audio Cue
//=========================================================================
//
// Bus subscriber that plays a sound whenever the game state changes. The
// state machine never calls it directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::state::GameState;
use crate::core::audio::{PlaybackParams, SoundRequest, SoundSender};
use crate::core::event_bus::{names, EventBus, Propagation, SubscriptionId};

//=== AudioCueConfig ======================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioCueConfig {
    pub sound: PathBuf,
    pub idle: PlaybackParams,
    pub running: PlaybackParams,
}

impl Default for AudioCueConfig {
    fn default() -> Self {
        Self {
            sound: PathBuf::from("Data/Audio/TestSound.mp3"),
            idle: PlaybackParams::default(),
            running: PlaybackParams::default().with_speed(0.5),
        }
    }
}

//=== Subscription ========================================================

pub(super) fn subscribe(events: &mut EventBus, sounds: SoundSender, cue: AudioCueConfig) -> SubscriptionId {
    events.subscribe(names::GAME_STATE_CHANGED, move |args| {
        let id = args.get_value(names::STATE_KEY, "DEFAULT");
        let playback = match GameState::from_id(id) {
            Some(GameState::Idle) => cue.idle,
            Some(GameState::Running) => cue.running,
            None => {
                warn!(target: "audio", "State change with unknown state '{}'", id);
                return Propagation::Continue;
            }
        };

        if sounds.send(SoundRequest::once(cue.sound.clone(), playback)).is_err() {
            debug!(target: "audio", "Audio subsystem gone, cue for '{}' dropped", id);
        }
        Propagation::Continue
    })
}
