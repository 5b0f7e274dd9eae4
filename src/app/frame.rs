//=========================================================================
// Frame Orchestrator
//=========================================================================
//
// Fixed four-phase loop. Every frame runs all four phases in order; the
// quit token is only consulted between frames.
//
//   BeginFrame → Update → Render → EndFrame
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::quit::QuitToken;

//=== FramePhase ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePhase {
    BeginFrame,
    Update,
    Render,
    EndFrame,
}

impl FramePhase {
    pub const ORDER: [FramePhase; 4] = [
        FramePhase::BeginFrame,
        FramePhase::Update,
        FramePhase::Render,
        FramePhase::EndFrame,
    ];
}

//=== FramePipeline =======================================================

/// Whatever the orchestrator drives, one method per phase.
pub trait FramePipeline {
    fn begin_frame(&mut self);
    fn update(&mut self);
    fn render(&mut self);
    fn end_frame(&mut self);
}

//=== FrameOrchestrator ===================================================

#[derive(Debug, Default)]
pub struct FrameOrchestrator {
    frame_count: u64,
    current: Option<FramePhase>,
}

impl FrameOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Phase in progress, `None` between frames.
    pub fn current_phase(&self) -> Option<FramePhase> {
        self.current
    }

    pub fn run_frame<P: FramePipeline + ?Sized>(&mut self, pipeline: &mut P) {
        for phase in FramePhase::ORDER {
            self.current = Some(phase);
            trace!(target: "app::frame", "Frame {} {:?}", self.frame_count, phase);

            match phase {
                FramePhase::BeginFrame => pipeline.begin_frame(),
                FramePhase::Update => pipeline.update(),
                FramePhase::Render => pipeline.render(),
                FramePhase::EndFrame => pipeline.end_frame(),
            }
        }
        self.current = None;
        self.frame_count += 1;
    }

    /// Runs whole frames until `quit` is observed at the top of an
    /// iteration. Returns the number of frames run by this call.
    pub fn run_until<P: FramePipeline + ?Sized>(&mut self, pipeline: &mut P, quit: &QuitToken) -> u64 {
        let start = self.frame_count;
        while !quit.is_requested() {
            self.run_frame(pipeline);
        }
        let ran = self.frame_count - start;
        debug!(target: "app::frame", "Main loop exited after {} frames", ran);
        ran
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<FramePhase>,
        quit_after_update: Option<(QuitToken, usize)>,
        updates: usize,
    }

    impl FramePipeline for Recorder {
        fn begin_frame(&mut self) {
            self.calls.push(FramePhase::BeginFrame);
        }
        fn update(&mut self) {
            self.calls.push(FramePhase::Update);
            self.updates += 1;
            if let Some((token, n)) = &self.quit_after_update {
                if self.updates == *n {
                    token.request();
                }
            }
        }
        fn render(&mut self) {
            self.calls.push(FramePhase::Render);
        }
        fn end_frame(&mut self) {
            self.calls.push(FramePhase::EndFrame);
        }
    }

    #[test]
    fn phases_run_in_fixed_order() {
        let mut frames = FrameOrchestrator::new();
        let mut recorder = Recorder::default();

        frames.run_frame(&mut recorder);
        frames.run_frame(&mut recorder);

        let expected: Vec<_> = FramePhase::ORDER.iter().chain(FramePhase::ORDER.iter()).copied().collect();
        assert_eq!(recorder.calls, expected);
        assert_eq!(frames.frame_count(), 2);
        assert_eq!(frames.current_phase(), None);
    }

    #[test]
    fn quit_mid_frame_finishes_the_frame() {
        let quit = QuitToken::new();
        let mut frames = FrameOrchestrator::new();
        let mut recorder = Recorder {
            quit_after_update: Some((quit.clone(), 3)),
            ..Recorder::default()
        };

        let ran = frames.run_until(&mut recorder, &quit);

        assert_eq!(ran, 3);
        assert_eq!(recorder.calls.len(), 12);
        assert_eq!(recorder.calls.last(), Some(&FramePhase::EndFrame));
    }

    #[test]
    fn pre_set_quit_runs_no_frames() {
        let quit = QuitToken::new();
        quit.request();
        let mut recorder = Recorder::default();

        assert_eq!(FrameOrchestrator::new().run_until(&mut recorder, &quit), 0);
        assert!(recorder.calls.is_empty());
    }
}
