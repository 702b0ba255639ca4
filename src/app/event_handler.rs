use std::cell::RefCell;
use std::rc::Rc;

use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;

use crate::api::ApiOutcome;
use crate::stats::MediaKind;
use crate::timefmt::format_time;
use crate::ui;

use super::navigation::sync_view;
use super::state::{show_toast, AppState, BackendEvent};
use super::{art, music};

/// Handle a backend event. This is the core state machine.
pub fn handle_backend_event(state: &Rc<RefCell<AppState>>, event: BackendEvent) {
    match event {
        BackendEvent::ArtUploadFinished { generation, outcome } => {
            if !state.borrow().art.is_current(generation) {
                // A newer submission owns the busy label and the result
                // slot; this response is dead.
                log::info!("Dropping stale art response (generation {generation})");
                return;
            }
            if let Some(ref w) = state.borrow().widgets {
                w.art.upload_button.set_label(art::UPLOAD_IDLE);
            }

            match outcome {
                ApiOutcome::Success(previews) => {
                    let stamp_ms = chrono::Utc::now().timestamp_millis();
                    let detail = {
                        let mut s = state.borrow_mut();
                        s.art.apply_success(previews, stamp_ms);
                        s.art
                            .chosen_file
                            .as_ref()
                            .and_then(|p| p.file_name())
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| "image".into())
                    };
                    record_protection(state, MediaKind::Art, &detail);
                    sync_view(state);
                    if let Some(ref w) = state.borrow().widgets {
                        ui::art::set_selection(&w.art, 0);
                    }
                    art::dispatch_preview_fetches(state, generation);
                }
                ApiOutcome::AppError(msg) => {
                    log::warn!("Art upload rejected: {msg}");
                    show_toast(state, &format!("Error: {msg}"));
                }
                ApiOutcome::Transport(msg) => {
                    log::error!("Art upload transport failure: {msg}");
                    show_toast(state, "Could not reach the protection server.");
                }
            }
        }

        BackendEvent::ArtPreviewLoaded {
            generation,
            index,
            bytes,
        } => {
            if !state.borrow().art.is_current(generation) {
                log::info!("Dropping stale preview {index} (generation {generation})");
                return;
            }
            let s = state.borrow();
            if let Some(ref w) = s.widgets {
                match gdk::Texture::from_bytes(&glib::Bytes::from_owned(bytes)) {
                    Ok(texture) => w.art.pictures[index].set_paintable(Some(&texture)),
                    Err(e) => log::warn!("Preview {index} not decodable: {e}"),
                }
            }
        }

        BackendEvent::ArtPreviewFailed {
            generation,
            index,
            error,
        } => {
            if state.borrow().art.is_current(generation) {
                log::warn!("Preview {index} failed to load: {error}");
            }
        }

        BackendEvent::LiteratureFinished { generation, outcome } => {
            if !state.borrow().literature.is_current(generation) {
                log::info!("Dropping stale literature response (generation {generation})");
                return;
            }

            match outcome {
                ApiOutcome::Success(reply) => {
                    let detail = format!("{} words", reply.result.split_whitespace().count());
                    state.borrow_mut().literature.apply_success(reply);
                    {
                        let s = state.borrow();
                        if let Some(ref w) = s.widgets {
                            if let Some(ref result) = s.literature.result {
                                w.literature.result_label.set_text(&result.text);
                                // The debug area is optional; missing widget
                                // or missing annotation are both fine.
                                if let Some(ref debug_label) = w.literature.debug_label {
                                    debug_label.set_text(
                                        result.debug.as_deref().unwrap_or(""),
                                    );
                                }
                            }
                        }
                    }
                    record_protection(state, MediaKind::Literature, &detail);
                    sync_view(state);
                }
                ApiOutcome::AppError(msg) => {
                    log::warn!("Literature submission rejected: {msg}");
                    show_toast(state, &format!("Error: {msg}"));
                }
                ApiOutcome::Transport(msg) => {
                    log::error!("Literature transport failure: {msg}");
                    show_toast(state, "Could not reach the protection server.");
                }
            }
        }

        BackendEvent::MusicFinished { generation, outcome } => {
            if !state.borrow().music.is_current(generation) {
                log::info!("Dropping stale music response (generation {generation})");
                return;
            }
            if let Some(ref w) = state.borrow().widgets {
                if let Some(ref m) = w.music {
                    m.upload_button.set_label(music::UPLOAD_IDLE);
                }
            }

            match outcome {
                ApiOutcome::Success(reply) => {
                    let when = format_time(reply.timestamp);
                    let detail = {
                        let mut s = state.borrow_mut();
                        s.music.apply_success(reply);
                        s.music
                            .chosen_file
                            .as_ref()
                            .and_then(|p| p.file_name())
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| "audio".into())
                    };
                    record_protection(state, MediaKind::Music, &detail);
                    sync_view(state);
                    show_toast(
                        state,
                        &format!("Success! Poisoning static inserted at {when}."),
                    );
                    music::dispatch_audio_cache(state, generation);
                }
                ApiOutcome::AppError(msg) => {
                    log::warn!("Music upload rejected: {msg}");
                    show_toast(state, &format!("Error: {msg}"));
                }
                ApiOutcome::Transport(msg) => {
                    log::error!("Music upload transport failure: {msg}");
                    show_toast(state, "Connection error to audio server.");
                }
            }
        }

        BackendEvent::MusicAudioCached { generation, path } => {
            if !state.borrow().music.is_current(generation) {
                log::info!("Dropping stale audio cache (generation {generation})");
                return;
            }
            state.borrow_mut().music.attach_cache(path.clone());
            let s = state.borrow();
            if let Some(ref w) = s.widgets {
                if let Some(ref m) = w.music {
                    // Swapping the file is what forces the player to reload.
                    m.video.set_filename(Some(&path));
                }
            }
        }

        BackendEvent::MusicAudioCacheFailed { generation, error } => {
            if state.borrow().music.is_current(generation) {
                log::error!("Processed audio not retrievable: {error}");
                show_toast(state, "Could not load the processed audio for playback.");
            }
        }

        BackendEvent::SaveFinished { kind, result } => match result {
            Ok(path) => {
                log::info!("{} save finished: {}", kind.label(), path.display());
                show_toast(state, &format!("Saved to {}", path.display()));
            }
            Err(e) => {
                log::error!("{} save failed: {e}", kind.label());
                show_toast(state, &format!("Save failed: {e}"));
            }
        },
    }
}

/// Bump the counters, persist them, refresh the home screen.
fn record_protection(state: &Rc<RefCell<AppState>>, kind: MediaKind, detail: &str) {
    let mut s = state.borrow_mut();
    s.stats.record(kind, detail);
    if let Err(e) = s.stats.save() {
        log::warn!("Failed to save stats: {e}");
    }
    if let Some(ref w) = s.widgets {
        ui::home::refresh_stats(&w.home, &s.stats);
    }
}
