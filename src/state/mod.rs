// State management module.
// Holds loading phase, profile, view state, and console log for the app.

pub mod console;
pub mod profile;
pub mod view;

pub use console::{Console, ConsoleLevel};
pub use profile::ProfileView;
pub use view::{Card, DEFAULT_PAGE_SIZE, PageControl, RenderedPage, ViewState, render_view};

/// Bootstrap phase. There is no way back to Loading once Ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
}
