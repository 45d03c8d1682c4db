mod app;
mod effects;
mod logging;
mod ui;

pub use app::run_app;

use ahma_core::Msg;

/// Everything the shell's main loop reacts to.
pub(crate) enum ShellEvent {
    /// A state-machine message from the engine pump or the tick thread.
    Core(Msg),
    /// A line typed by the user.
    Line(String),
    /// Stdin closed.
    Quit,
}
