//=========================================================================
// Headless Audio
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

//=== Internal Dependencies ===============================================

use super::CallLog;
use crate::core::audio::{SoundRequest, SoundSender};
use crate::core::subsystem::{AudioSubsystem, Subsystem, SubsystemError};

//=== HeadlessAudio =======================================================

/// "Plays" each request by recording it.
pub struct HeadlessAudio {
    log: CallLog,
    requests_tx: Sender<SoundRequest>,
    requests_rx: Receiver<SoundRequest>,
}

impl HeadlessAudio {
    pub fn new(log: CallLog) -> Self {
        let (requests_tx, requests_rx) = unbounded();
        Self {
            log,
            requests_tx,
            requests_rx,
        }
    }

    fn play_pending(&mut self) {
        while let Ok(request) = self.requests_rx.try_recv() {
            debug!(target: "audio", "Play {:?}", request);
            self.log.record(format!(
                "Audio.play({} speed={})",
                request.path.display(),
                request.playback.speed
            ));
        }
    }
}

impl Subsystem for HeadlessAudio {
    fn name(&self) -> &'static str {
        "Audio"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.log.record("Audio.startup");
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.log.record("Audio.begin_frame");
        self.play_pending();
    }

    fn end_frame(&mut self) {
        self.log.record("Audio.end_frame");
        self.play_pending();
    }

    fn shutdown(&mut self) {
        self.play_pending();
        self.log.record("Audio.shutdown");
    }
}

impl AudioSubsystem for HeadlessAudio {
    fn sound_requests(&self) -> SoundSender {
        self.requests_tx.clone()
    }
}
