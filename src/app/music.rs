use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use gtk4::prelude::*;

use crate::api::{ApiOutcome, MusicReply};
use crate::app::screens::Screen;
use crate::app::state::{show_toast, AppState, BackendEvent, WorkflowPhase};

pub const UPLOAD_IDLE: &str = "Upload";
pub const UPLOAD_BUSY: &str = "Processing\u{2026}";

pub const SAVE_FILENAME: &str = "protected_audio.wav";

/// The processed audio resource plus where the static was inserted.
#[derive(Debug, Clone)]
pub struct MusicResult {
    pub audio_url: String,
    pub timestamp: f64,
    /// Local copy for playback, filled in once the cache download lands.
    pub cached: Option<PathBuf>,
}

/// Pure state of the music workflow.
#[derive(Debug, Default)]
pub struct MusicState {
    pub phase: WorkflowPhase,
    pub chosen_file: Option<PathBuf>,
    pub result: Option<MusicResult>,
    generation: u64,
}

impl MusicState {
    pub fn validate(&self) -> Result<PathBuf, String> {
        self.chosen_file
            .clone()
            .ok_or_else(|| "Please select an audio file first.".into())
    }

    pub fn begin_submit(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Each success replaces the previous result wholesale; the download
    /// action always targets the most recent one.
    pub fn apply_success(&mut self, reply: MusicReply) {
        self.result = Some(MusicResult {
            audio_url: reply.audio_url,
            timestamp: reply.timestamp,
            cached: None,
        });
        self.phase = WorkflowPhase::ResultReady;
    }

    pub fn attach_cache(&mut self, path: PathBuf) {
        if let Some(ref mut result) = self.result {
            result.cached = Some(path);
        }
    }

    /// The music screen's own back action. Navigation never resets this
    /// workflow; this is the only way back to awaiting-input.
    pub fn reset(&mut self) {
        self.phase = WorkflowPhase::AwaitingInput;
    }

    /// Deliberately a no-op: unlike art and literature, entering the music
    /// screen keeps whatever phase it was in.
    pub fn on_screen_entered(&mut self, _screen: Screen) {}
}

/// Validate and dispatch a music upload on the tokio runtime.
pub fn submit(state: &Rc<RefCell<AppState>>) {
    let file = match state.borrow().music.validate() {
        Ok(file) => file,
        Err(msg) => {
            show_toast(state, &msg);
            return;
        }
    };

    let generation = state.borrow_mut().music.begin_submit();

    let s = state.borrow();
    if let Some(ref w) = s.widgets {
        if let Some(ref music) = w.music {
            music.upload_button.set_label(UPLOAD_BUSY);
        }
    }
    let api = s.api.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".into());

        let outcome = match tokio::fs::read(&file).await {
            Ok(bytes) => api.upload_music(filename, bytes).await,
            Err(e) => {
                ApiOutcome::Transport(format!("could not read {}: {e}", file.display()))
            }
        };

        let _ = sender
            .send(BackendEvent::MusicFinished { generation, outcome })
            .await;
    });
}

/// Save the processed audio under a user-chosen location. Always targets
/// the most recent result, straight from the playback cache when that
/// download already landed.
pub fn download(state: &Rc<RefCell<AppState>>) {
    let (source, window) = {
        let s = state.borrow();
        (
            s.music.result.as_ref().map(|r| match r.cached {
                Some(ref cached) => SaveSource::Cached(cached.clone()),
                None => SaveSource::Remote(s.api.resolve(&r.audio_url)),
            }),
            s.widgets.as_ref().map(|w| w.window.clone()),
        )
    };
    let source = match source {
        Some(source) => source,
        None => {
            log::warn!("Music download requested before any successful upload");
            return;
        }
    };
    let window = match window {
        Some(window) => window,
        None => return,
    };

    let dialog = gtk4::FileDialog::builder()
        .title("Save protected audio")
        .initial_name(SAVE_FILENAME)
        .build();

    let state_clone = state.clone();
    dialog.save(
        Some(&window),
        gtk4::gio::Cancellable::NONE,
        move |result| {
            let dest = match result.ok().and_then(|f| f.path()) {
                Some(dest) => dest,
                None => return,
            };
            let s = state_clone.borrow();
            let sender = s.backend_sender.clone();
            s.tokio_rt.spawn(async move {
                let result = match source {
                    SaveSource::Cached(cached) => tokio::fs::copy(&cached, &dest)
                        .await
                        .map(|_| dest)
                        .map_err(|e| e.to_string()),
                    SaveSource::Remote(url) => crate::download::fetch_to_file(&url, &dest)
                        .await
                        .map(|_| dest)
                        .map_err(|e| e.to_string()),
                };
                let _ = sender
                    .send(BackendEvent::SaveFinished {
                        kind: crate::stats::MediaKind::Music,
                        result,
                    })
                    .await;
            });
        },
    );
}

enum SaveSource {
    Cached(PathBuf),
    Remote(String),
}

/// Download the processed audio into the cache dir for local playback.
pub fn dispatch_audio_cache(state: &Rc<RefCell<AppState>>, generation: u64) {
    let s = state.borrow();
    let url = match s.music.result {
        Some(ref result) => s.api.resolve(&result.audio_url),
        None => return,
    };
    let sender = s.backend_sender.clone();

    let mut dest = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    dest.push("mediaguard");
    dest.push(format!("playback_{generation}.wav"));

    s.tokio_rt.spawn(async move {
        let event = match crate::download::fetch_to_file(&url, &dest).await {
            Ok(()) => BackendEvent::MusicAudioCached {
                generation,
                path: dest,
            },
            Err(e) => BackendEvent::MusicAudioCacheFailed {
                generation,
                error: e.to_string(),
            },
        };
        let _ = sender.send(event).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply() -> MusicReply {
        MusicReply {
            audio_url: "/static/previews/protected_audio.wav?t=1700000000".into(),
            timestamp: 125.0,
        }
    }

    #[test]
    fn no_file_fails_validation() {
        let music = MusicState::default();
        assert!(music.validate().is_err());
    }

    #[test]
    fn success_replaces_prior_result() {
        let mut music = MusicState::default();
        music.apply_success(reply());
        music.attach_cache(PathBuf::from("/tmp/a.wav"));
        music.apply_success(MusicReply {
            audio_url: "/static/previews/protected_audio.wav?t=1700000999".into(),
            timestamp: 30.0,
        });
        let result = music.result.as_ref().unwrap();
        assert!((result.timestamp - 30.0).abs() < f64::EPSILON);
        // The fresh result has no cache until its own download lands.
        assert!(result.cached.is_none());
        assert_eq!(music.phase, WorkflowPhase::ResultReady);
    }

    #[test]
    fn navigation_never_resets_music() {
        let mut music = MusicState::default();
        music.apply_success(reply());
        music.on_screen_entered(Screen::Music);
        music.on_screen_entered(Screen::Home);
        assert_eq!(music.phase, WorkflowPhase::ResultReady);
    }

    #[test]
    fn own_back_action_resets_phase() {
        let mut music = MusicState::default();
        music.apply_success(reply());
        music.reset();
        assert_eq!(music.phase, WorkflowPhase::AwaitingInput);
        // Result is kept until the next successful submission.
        assert!(music.result.is_some());
    }

    #[test]
    fn stale_generation_is_detected() {
        let mut music = MusicState::default();
        let first = music.begin_submit();
        let second = music.begin_submit();
        assert!(!music.is_current(first));
        assert!(music.is_current(second));
    }
}
