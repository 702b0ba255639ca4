pub mod art;
mod event_handler;
pub mod literature;
pub mod music;
mod navigation;
pub mod screens;
mod state;

pub use event_handler::handle_backend_event;
pub use navigation::{music_back, navigate};
pub use screens::Screen;
pub use state::{AppState, BackendEvent, WorkflowPhase};
