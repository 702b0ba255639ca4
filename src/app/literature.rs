use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use crate::api::LiteratureReply;
use crate::app::screens::Screen;
use crate::app::state::{show_toast, AppState, BackendEvent, WorkflowPhase};

/// The transformed text plus the server's optional marker annotation.
#[derive(Debug, Clone)]
pub struct LiteratureResult {
    pub text: String,
    pub debug: Option<String>,
}

/// Pure state of the literature workflow.
#[derive(Debug, Default)]
pub struct LiteratureState {
    pub phase: WorkflowPhase,
    pub result: Option<LiteratureResult>,
    generation: u64,
}

impl LiteratureState {
    /// Trimmed non-empty input, or None (validation failure, no network call).
    pub fn clean_input(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn begin_submit(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn apply_success(&mut self, reply: LiteratureReply) {
        self.result = Some(LiteratureResult {
            text: reply.result,
            debug: reply.debug,
        });
        self.phase = WorkflowPhase::ResultReady;
    }

    /// Text for the clipboard: the displayed result, never the annotation.
    /// Empty before any successful submission.
    pub fn copy_text(&self) -> &str {
        self.result.as_ref().map(|r| r.text.as_str()).unwrap_or("")
    }

    pub fn reset(&mut self) {
        self.phase = WorkflowPhase::AwaitingInput;
    }

    /// Entering the literature screen always re-enters awaiting-input.
    pub fn on_screen_entered(&mut self, screen: Screen) {
        if screen == Screen::Literature {
            self.reset();
        }
    }
}

/// Validate and dispatch a literature submission on the tokio runtime.
pub fn submit(state: &Rc<RefCell<AppState>>) {
    let raw = {
        let s = state.borrow();
        match s.widgets {
            Some(ref w) => {
                let buffer = w.literature.text_view.buffer();
                buffer
                    .text(&buffer.start_iter(), &buffer.end_iter(), false)
                    .to_string()
            }
            None => return,
        }
    };

    let text = match LiteratureState::clean_input(&raw) {
        Some(text) => text,
        None => {
            show_toast(state, "Enter some text first.");
            return;
        }
    };

    let generation = state.borrow_mut().literature.begin_submit();

    let s = state.borrow();
    let api = s.api.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        let outcome = api.upload_literature(text).await;
        let _ = sender
            .send(BackendEvent::LiteratureFinished { generation, outcome })
            .await;
    });
}

/// Copy the displayed result to the clipboard and confirm.
pub fn copy_result(state: &Rc<RefCell<AppState>>) {
    let text = state.borrow().literature.copy_text().to_string();
    match crate::clipboard::copy_to_clipboard(&text) {
        Ok(()) => show_toast(state, "Copied!"),
        Err(e) => {
            log::error!("Clipboard error: {e}");
            show_toast(state, "Could not access the clipboard.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_input_is_rejected() {
        assert!(LiteratureState::clean_input(" ").is_none());
        assert!(LiteratureState::clean_input("\n\t  ").is_none());
        assert!(LiteratureState::clean_input("").is_none());
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(
            LiteratureState::clean_input("  hello world \n").as_deref(),
            Some("hello world")
        );
    }

    #[test]
    fn success_without_debug_is_fine() {
        let mut lit = LiteratureState::default();
        lit.apply_success(LiteratureReply {
            result: "X".into(),
            debug: None,
        });
        assert_eq!(lit.phase, WorkflowPhase::ResultReady);
        assert_eq!(lit.copy_text(), "X");
        assert!(lit.result.as_ref().unwrap().debug.is_none());
    }

    #[test]
    fn copy_text_is_empty_before_any_result() {
        let lit = LiteratureState::default();
        assert_eq!(lit.copy_text(), "");
    }

    #[test]
    fn new_result_replaces_the_old_one() {
        let mut lit = LiteratureState::default();
        lit.apply_success(LiteratureReply {
            result: "first".into(),
            debug: Some("d1".into()),
        });
        lit.apply_success(LiteratureReply {
            result: "second".into(),
            debug: None,
        });
        assert_eq!(lit.copy_text(), "second");
        assert!(lit.result.as_ref().unwrap().debug.is_none());
    }

    #[test]
    fn entering_literature_screen_resets_phase() {
        let mut lit = LiteratureState::default();
        lit.apply_success(LiteratureReply {
            result: "X".into(),
            debug: None,
        });
        lit.on_screen_entered(Screen::Literature);
        assert_eq!(lit.phase, WorkflowPhase::AwaitingInput);
        // The stored result survives until the next submission.
        assert_eq!(lit.copy_text(), "X");
    }

    #[test]
    fn entering_other_screens_keeps_phase() {
        let mut lit = LiteratureState::default();
        lit.apply_success(LiteratureReply {
            result: "X".into(),
            debug: None,
        });
        lit.on_screen_entered(Screen::Home);
        assert_eq!(lit.phase, WorkflowPhase::ResultReady);
    }
}
