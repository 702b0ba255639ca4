use std::cell::RefCell;
use std::rc::Rc;

use super::screens::Screen;
use super::state::AppState;
use crate::ui;

/// Navigate to a screen: update the registry, fan the screen-entered
/// notification out to every workflow (each applies its own reset policy),
/// then sync the widgets.
pub fn navigate(state: &Rc<RefCell<AppState>>, screen: Screen) {
    let entered = state.borrow_mut().screens.show(screen);
    if let Some(entered) = entered {
        log::debug!("entered screen {entered:?}");
        let mut s = state.borrow_mut();
        s.art.on_screen_entered(entered);
        s.literature.on_screen_entered(entered);
        s.music.on_screen_entered(entered);
    }
    sync_view(state);
}

/// The music screen's own back action: local phase reset only, the
/// registry is untouched (the screen itself stays visible).
pub fn music_back(state: &Rc<RefCell<AppState>>) {
    state.borrow_mut().music.reset();
    sync_view(state);
}

/// Apply registry visibility and every workflow's phase to the widgets.
pub fn sync_view(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    if let Some(ref w) = s.widgets {
        ui::window::sync_visible_screen(w, s.screens.visible());
        ui::art::set_art_phase(&w.art, s.art.phase);
        ui::literature::set_literature_phase(&w.literature, s.literature.phase);
        if let Some(ref music) = w.music {
            ui::music::set_music_phase(music, s.music.phase);
        }
    }
}
