use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use gtk4::prelude::*;

use crate::api::{ApiOutcome, ArtPreviews};
use crate::app::state::{show_toast, AppState, BackendEvent, WorkflowPhase};
use crate::app::screens::Screen;

pub const UPLOAD_IDLE: &str = "Upload";
pub const UPLOAD_BUSY: &str = "Analyzing\u{2026}";

pub const SAVE_FILENAME: &str = "protected.png";

/// One upload's three candidate previews plus the current selection.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    /// Preview URLs with the cache-busting `?t=` suffix already appended.
    pub previews: [String; 3],
    pub selected: usize,
}

/// Pure state of the art workflow.
#[derive(Debug, Default)]
pub struct ArtState {
    pub phase: WorkflowPhase,
    pub chosen_file: Option<PathBuf>,
    pub candidates: Option<CandidateSet>,
    generation: u64,
}

impl ArtState {
    /// Validate the pending submission without touching the network.
    pub fn validate(&self) -> Result<PathBuf, String> {
        self.chosen_file
            .clone()
            .ok_or_else(|| "Select an image file first.".into())
    }

    /// Claim the single in-flight slot. Any response carrying an older
    /// generation is stale and must be dropped.
    pub fn begin_submit(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Enter result-ready with a fresh candidate set. One timestamp, taken
    /// at response time, cache-busts all three previews so changed backend
    /// artifacts at the same path are not served stale.
    pub fn apply_success(&mut self, previews: ArtPreviews, stamp_ms: i64) {
        let [p1, p2, p3] = previews.paths;
        self.candidates = Some(CandidateSet {
            previews: [
                format!("{p1}?t={stamp_ms}"),
                format!("{p2}?t={stamp_ms}"),
                format!("{p3}?t={stamp_ms}"),
            ],
            selected: 0,
        });
        self.phase = WorkflowPhase::ResultReady;
    }

    pub fn select(&mut self, index: usize) {
        if index > 2 {
            return;
        }
        if let Some(ref mut set) = self.candidates {
            set.selected = index;
        }
    }

    /// Resource path of the selected candidate, cache-busting suffix
    /// stripped. None before any successful upload.
    pub fn selected_path(&self) -> Option<String> {
        let set = self.candidates.as_ref()?;
        let url = &set.previews[set.selected];
        Some(url.split('?').next().unwrap_or(url).to_string())
    }

    pub fn reset(&mut self) {
        self.phase = WorkflowPhase::AwaitingInput;
    }

    /// Entering the art screen always re-enters awaiting-input.
    pub fn on_screen_entered(&mut self, screen: Screen) {
        if screen == Screen::Art {
            self.reset();
        }
    }
}

/// Validate and dispatch an art upload on the tokio runtime.
pub fn submit(state: &Rc<RefCell<AppState>>) {
    let file = match state.borrow().art.validate() {
        Ok(file) => file,
        Err(msg) => {
            show_toast(state, &msg);
            return;
        }
    };

    let generation = state.borrow_mut().art.begin_submit();

    let s = state.borrow();
    if let Some(ref w) = s.widgets {
        w.art.upload_button.set_label(UPLOAD_BUSY);
    }
    let api = s.api.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "art".into());

        let outcome = match tokio::fs::read(&file).await {
            Ok(bytes) => api.upload_art(filename, bytes).await,
            Err(e) => {
                ApiOutcome::Transport(format!("could not read {}: {e}", file.display()))
            }
        };

        let _ = sender
            .send(BackendEvent::ArtUploadFinished { generation, outcome })
            .await;
    });
}

/// Apply a candidate selection: pure state first, then the toggles.
pub fn select_candidate(state: &Rc<RefCell<AppState>>, index: usize) {
    state.borrow_mut().art.select(index);
    let s = state.borrow();
    if let Some(ref w) = s.widgets {
        crate::ui::art::set_selection(&w.art, index);
    }
    if let Some(path) = s.art.selected_path() {
        log::debug!("selected candidate {index}: {path}");
    }
}

/// Save the selected candidate under a user-chosen location. Without a
/// prior successful upload this is a logged no-op.
pub fn download(state: &Rc<RefCell<AppState>>) {
    let (path, window) = {
        let s = state.borrow();
        (
            s.art.selected_path(),
            s.widgets.as_ref().map(|w| w.window.clone()),
        )
    };
    let path = match path {
        Some(path) => path,
        None => {
            log::warn!("Art download requested before any successful upload");
            return;
        }
    };
    let window = match window {
        Some(window) => window,
        None => return,
    };
    let url = state.borrow().api.resolve(&path);

    let dialog = gtk4::FileDialog::builder()
        .title("Save protected image")
        .initial_name(SAVE_FILENAME)
        .build();

    let state_clone = state.clone();
    dialog.save(
        Some(&window),
        gtk4::gio::Cancellable::NONE,
        move |result| {
            // Dismissing the dialog is not an error worth reporting.
            let dest = match result.ok().and_then(|f| f.path()) {
                Some(dest) => dest,
                None => return,
            };
            let s = state_clone.borrow();
            let sender = s.backend_sender.clone();
            s.tokio_rt.spawn(async move {
                let result = crate::download::fetch_to_file(&url, &dest)
                    .await
                    .map(|_| dest)
                    .map_err(|e| e.to_string());
                let _ = sender
                    .send(BackendEvent::SaveFinished {
                        kind: crate::stats::MediaKind::Art,
                        result,
                    })
                    .await;
            });
        },
    );
}

/// Fetch the three cache-busted previews for rendering.
pub fn dispatch_preview_fetches(state: &Rc<RefCell<AppState>>, generation: u64) {
    let s = state.borrow();
    let urls: Vec<String> = match s.art.candidates {
        Some(ref set) => set.previews.iter().map(|p| s.api.resolve(p)).collect(),
        None => return,
    };
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        for (index, url) in urls.into_iter().enumerate() {
            let event = match crate::download::fetch_bytes(&url).await {
                Ok(bytes) => BackendEvent::ArtPreviewLoaded {
                    generation,
                    index,
                    bytes,
                },
                Err(e) => BackendEvent::ArtPreviewFailed {
                    generation,
                    index,
                    error: e.to_string(),
                },
            };
            let _ = sender.send(event).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn previews() -> ArtPreviews {
        ArtPreviews {
            paths: [
                "/static/previews/opt_0.png".into(),
                "/static/previews/opt_1.png".into(),
                "/static/previews/opt_2.png".into(),
            ],
        }
    }

    #[test]
    fn no_file_fails_validation() {
        let art = ArtState::default();
        assert!(art.validate().is_err());
    }

    #[test]
    fn success_defaults_to_first_candidate() {
        let mut art = ArtState::default();
        art.apply_success(previews(), 1234);
        assert_eq!(art.phase, WorkflowPhase::ResultReady);
        let set = art.candidates.as_ref().unwrap();
        assert_eq!(set.selected, 0);
        assert_eq!(set.previews[0], "/static/previews/opt_0.png?t=1234");
        // One timestamp shared by all three.
        assert!(set.previews.iter().all(|p| p.ends_with("?t=1234")));
    }

    #[test]
    fn selection_recomputes_stripped_path() {
        let mut art = ArtState::default();
        art.apply_success(previews(), 99);
        art.select(1);
        assert_eq!(art.candidates.as_ref().unwrap().selected, 1);
        assert_eq!(
            art.selected_path().unwrap(),
            "/static/previews/opt_1.png"
        );
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut art = ArtState::default();
        art.apply_success(previews(), 99);
        art.select(7);
        assert_eq!(art.candidates.as_ref().unwrap().selected, 0);
    }

    #[test]
    fn selected_path_before_any_upload_is_none() {
        let art = ArtState::default();
        assert!(art.selected_path().is_none());
    }

    #[test]
    fn entering_art_screen_resets_phase() {
        let mut art = ArtState::default();
        art.apply_success(previews(), 1);
        art.on_screen_entered(Screen::Art);
        assert_eq!(art.phase, WorkflowPhase::AwaitingInput);
    }

    #[test]
    fn entering_other_screens_keeps_phase() {
        let mut art = ArtState::default();
        art.apply_success(previews(), 1);
        art.on_screen_entered(Screen::Music);
        assert_eq!(art.phase, WorkflowPhase::ResultReady);
    }

    #[test]
    fn stale_generation_is_detected() {
        let mut art = ArtState::default();
        let first = art.begin_submit();
        let second = art.begin_submit();
        assert!(!art.is_current(first));
        assert!(art.is_current(second));
    }
}
