mod api;
mod app;
mod clipboard;
mod config;
mod download;
mod stats;
mod timefmt;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use libadwaita::prelude::*;

use app::{AppState, BackendEvent, Screen};

fn main() {
    env_logger::init();
    log::info!("MediaGuard starting");

    let application = libadwaita::Application::builder()
        .application_id("com.github.mediaguard.desktop")
        .build();

    application.connect_activate(on_activate);
    application.run();
}

fn on_activate(gtk_app: &libadwaita::Application) {
    // Async channel for backend → UI communication
    let (backend_tx, backend_rx) = async_channel::unbounded::<BackendEvent>();

    let state = Rc::new(RefCell::new(AppState::new(backend_tx)));

    // Build UI
    let widgets = {
        let s = state.borrow();
        ui::window::build_window(gtk_app, &s.config, &s.stats)
    };

    // Navigation controls
    {
        let state_clone = state.clone();
        widgets.nav_home.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Home);
        });
    }
    {
        let state_clone = state.clone();
        widgets.nav_art.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Art);
        });
    }
    if let Some(ref nav_music) = widgets.nav_music {
        let state_clone = state.clone();
        nav_music.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Music);
        });
    }
    {
        let state_clone = state.clone();
        widgets.nav_literature.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Literature);
        });
    }

    // Home cards mirror the navigation bar
    {
        let state_clone = state.clone();
        widgets.home.art_card.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Art);
        });
    }
    if let Some(ref music_card) = widgets.home.music_card {
        let state_clone = state.clone();
        music_card.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Music);
        });
    }
    {
        let state_clone = state.clone();
        widgets.home.literature_card.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Literature);
        });
    }

    // History window
    {
        let state_clone = state.clone();
        let window = widgets.window.clone();
        widgets.home.history_row.connect_activated(move |_| {
            let history = state_clone.borrow().stats.history.clone();
            ui::history::show_history_window(&window, &history);
        });
    }

    // Server URL changes
    {
        let state_clone = state.clone();
        widgets.home.server_row.connect_changed(move |row| {
            let url = row.text().to_string();
            let mut s = state_clone.borrow_mut();
            s.config.server_url = url.clone();
            s.api = api::ApiClient::new(&url);
            if let Err(e) = s.config.save() {
                log::warn!("Failed to save config: {e}");
            }
        });
    }

    // --- Art workflow ---
    {
        let state_clone = state.clone();
        let window = widgets.window.clone();
        widgets.art.choose_button.connect_clicked(move |_| {
            choose_file(&state_clone, &window, FileTarget::Art);
        });
    }
    {
        let state_clone = state.clone();
        widgets.art.upload_button.connect_clicked(move |_| {
            app::art::submit(&state_clone);
        });
    }
    for (index, toggle) in widgets.art.toggles.iter().enumerate() {
        let state_clone = state.clone();
        toggle.connect_clicked(move |_| {
            app::art::select_candidate(&state_clone, index);
        });
    }
    {
        let state_clone = state.clone();
        widgets.art.download_button.connect_clicked(move |_| {
            app::art::download(&state_clone);
        });
    }
    {
        let state_clone = state.clone();
        widgets.art.back_button.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Art);
        });
    }

    // --- Literature workflow ---
    {
        let state_clone = state.clone();
        widgets.literature.submit_button.connect_clicked(move |_| {
            app::literature::submit(&state_clone);
        });
    }
    {
        let state_clone = state.clone();
        widgets.literature.copy_button.connect_clicked(move |_| {
            app::literature::copy_result(&state_clone);
        });
    }
    {
        let state_clone = state.clone();
        widgets.literature.back_button.connect_clicked(move |_| {
            app::navigate(&state_clone, Screen::Literature);
        });
    }

    // --- Music workflow (only when its controls exist) ---
    if let Some(ref music) = widgets.music {
        {
            let state_clone = state.clone();
            let window = widgets.window.clone();
            music.choose_button.connect_clicked(move |_| {
                choose_file(&state_clone, &window, FileTarget::Music);
            });
        }
        {
            let state_clone = state.clone();
            music.upload_button.connect_clicked(move |_| {
                app::music::submit(&state_clone);
            });
        }
        {
            let state_clone = state.clone();
            music.download_button.connect_clicked(move |_| {
                app::music::download(&state_clone);
            });
        }
        {
            let state_clone = state.clone();
            music.back_button.connect_clicked(move |_| {
                app::music_back(&state_clone);
            });
        }
    }

    // Store UI handles in state, then show the window
    {
        let mut s = state.borrow_mut();
        s.widgets = Some(widgets);
    }
    if let Some(ref w) = state.borrow().widgets {
        w.window.present();
    }

    // Attach backend event handler
    {
        let state_clone = state.clone();
        gtk4::glib::spawn_future_local(async move {
            while let Ok(event) = backend_rx.recv().await {
                app::handle_backend_event(&state_clone, event);
            }
        });
    }

    // Initial screen
    app::navigate(&state, Screen::Home);
}

#[derive(Clone, Copy)]
enum FileTarget {
    Art,
    Music,
}

/// Open a file chooser and remember the selection for the given workflow.
fn choose_file(
    state: &Rc<RefCell<AppState>>,
    window: &libadwaita::ApplicationWindow,
    target: FileTarget,
) {
    let filter = gtk4::FileFilter::new();
    let title = match target {
        FileTarget::Art => {
            filter.add_pixbuf_formats();
            "Choose an image"
        }
        FileTarget::Music => {
            filter.add_mime_type("audio/mpeg");
            filter.add_mime_type("audio/wav");
            filter.add_mime_type("audio/x-wav");
            "Choose an audio file"
        }
    };

    let dialog = gtk4::FileDialog::builder()
        .title(title)
        .default_filter(&filter)
        .build();

    let state_clone = state.clone();
    dialog.open(
        Some(window),
        gtk4::gio::Cancellable::NONE,
        move |result| {
            let path = match result.ok().and_then(|f| f.path()) {
                Some(path) => path,
                None => return,
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            match target {
                FileTarget::Art => {
                    state_clone.borrow_mut().art.chosen_file = Some(path);
                    if let Some(ref w) = state_clone.borrow().widgets {
                        w.art.file_row.set_subtitle(&name);
                    }
                }
                FileTarget::Music => {
                    state_clone.borrow_mut().music.chosen_file = Some(path);
                    if let Some(ref w) = state_clone.borrow().widgets {
                        if let Some(ref music) = w.music {
                            music.file_row.set_subtitle(&name);
                        }
                    }
                }
            }
        },
    );
}
