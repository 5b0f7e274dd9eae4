//=========================================================================
// Headless Console
//=========================================================================
//
// Developer console without a text engine. Understands exactly one
// command, `quit`, which fires the `quit` event through the bus.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::CallLog;
use crate::core::event_bus::{names, EventArgs, EventSender};
use crate::core::render::{add_verts_for_aabb2_2d, Aabb2, Rgba8};
use crate::core::subsystem::{ConsoleSubsystem, RenderSubsystem, Subsystem, SubsystemError};

//=== HeadlessConsole =====================================================

pub struct HeadlessConsole {
    log: CallLog,
    events: EventSender,
    open: bool,
}

impl HeadlessConsole {
    pub fn new(log: CallLog, events: EventSender) -> Self {
        Self {
            log,
            events,
            open: false,
        }
    }
}

impl Subsystem for HeadlessConsole {
    fn name(&self) -> &'static str {
        "Console"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.log.record("Console.startup");
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.log.record("Console.begin_frame");
    }

    fn end_frame(&mut self) {
        self.log.record("Console.end_frame");
    }

    fn shutdown(&mut self) {
        self.log.record("Console.shutdown");
    }
}

impl ConsoleSubsystem for HeadlessConsole {
    fn is_open(&self) -> bool {
        self.open
    }

    fn set_open(&mut self, open: bool) {
        self.log.record(format!("Console.set_open({open})"));
        self.open = open;
    }

    fn execute(&mut self, command_line: &str) {
        let command = command_line.trim();
        self.log.record(format!("Console.execute({command})"));

        match command.to_ascii_lowercase().as_str() {
            "quit" => {
                info!(target: "app", "Console quit command");
                self.events.fire(names::QUIT, EventArgs::new());
            }
            "" => {}
            other => warn!(target: "app", "Unknown console command '{}'", other),
        }
    }

    fn render(&self, renderer: &mut dyn RenderSubsystem, bounds: Aabb2) {
        if !self.open {
            return;
        }
        let mut verts = Vec::new();
        add_verts_for_aabb2_2d(&mut verts, bounds, Rgba8::TRANSLUCENT_BLACK);
        renderer.draw_vertex_array(&verts);
    }
}
