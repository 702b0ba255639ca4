use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::api::{ApiClient, ApiOutcome, ArtPreviews, LiteratureReply, MusicReply};
use crate::config::Config;
use crate::stats::{MediaKind, Stats};
use crate::ui::window::WindowWidgets;

use super::art::ArtState;
use super::literature::LiteratureState;
use super::music::MusicState;
use super::screens::{Screen, ScreenRegistry};

/// Events sent from background tasks to the GTK main thread.
///
/// Upload events carry the generation token their submission was issued
/// under; the handler drops anything stale.
#[derive(Debug)]
pub enum BackendEvent {
    ArtUploadFinished {
        generation: u64,
        outcome: ApiOutcome<ArtPreviews>,
    },
    ArtPreviewLoaded {
        generation: u64,
        index: usize,
        bytes: Vec<u8>,
    },
    ArtPreviewFailed {
        generation: u64,
        index: usize,
        error: String,
    },
    LiteratureFinished {
        generation: u64,
        outcome: ApiOutcome<LiteratureReply>,
    },
    MusicFinished {
        generation: u64,
        outcome: ApiOutcome<MusicReply>,
    },
    MusicAudioCached {
        generation: u64,
        path: PathBuf,
    },
    MusicAudioCacheFailed {
        generation: u64,
        error: String,
    },
    SaveFinished {
        kind: MediaKind,
        result: Result<PathBuf, String>,
    },
}

/// Which of a screen's two sub-panels is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    AwaitingInput,
    ResultReady,
}

/// Central application state. Lives on the GTK main thread inside Rc<RefCell<>>.
pub struct AppState {
    pub config: Config,
    pub stats: Stats,
    pub api: ApiClient,
    pub tokio_rt: tokio::runtime::Runtime,
    pub backend_sender: async_channel::Sender<BackendEvent>,

    pub screens: ScreenRegistry,
    pub art: ArtState,
    pub literature: LiteratureState,
    pub music: MusicState,

    // UI handles
    pub widgets: Option<WindowWidgets>,
}

impl AppState {
    pub fn new(sender: async_channel::Sender<BackendEvent>) -> Self {
        let config = Config::load();
        let stats = Stats::load();
        let api = ApiClient::new(&config.server_url);
        let tokio_rt = tokio::runtime::Runtime::new()
            .expect("Failed to create tokio runtime");

        let mut registered = vec![Screen::Home, Screen::Art, Screen::Literature];
        if config.music_enabled {
            registered.push(Screen::Music);
        }

        Self {
            config,
            stats,
            api,
            tokio_rt,
            backend_sender: sender,
            screens: ScreenRegistry::new(registered),
            art: ArtState::default(),
            literature: LiteratureState::default(),
            music: MusicState::default(),
            widgets: None,
        }
    }
}

/// Pop a toast on the main window. Quietly does nothing before the window
/// handles are installed.
pub fn show_toast(state: &Rc<RefCell<AppState>>, message: &str) {
    let s = state.borrow();
    if let Some(ref w) = s.widgets {
        let toast = libadwaita::Toast::new(message);
        toast.set_timeout(3);
        w.toast_overlay.add_toast(toast);
    } else {
        log::info!("toast (no window yet): {message}");
    }
}
