use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::app::Screen;
use crate::config::Config;
use crate::stats::Stats;

use super::art::ArtWidgets;
use super::home::HomeWidgets;
use super::literature::LiteratureWidgets;
use super::music::MusicWidgets;

/// Handles returned from building the main window.
pub struct WindowWidgets {
    pub window: libadwaita::ApplicationWindow,
    pub toast_overlay: libadwaita::ToastOverlay,
    pub nav_home: gtk4::Button,
    pub nav_art: gtk4::Button,
    pub nav_music: Option<gtk4::Button>,
    pub nav_literature: gtk4::Button,
    pub home: HomeWidgets,
    pub art: ArtWidgets,
    pub literature: LiteratureWidgets,
    /// Absent when the music workflow is disabled; nothing gets wired.
    pub music: Option<MusicWidgets>,
}

/// Build the main window with all four screens stacked as siblings.
/// Visibility is applied afterwards through `sync_visible_screen`.
pub fn build_window(
    app: &libadwaita::Application,
    config: &Config,
    stats: &Stats,
) -> WindowWidgets {
    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title("MediaGuard")
        .default_width(720)
        .default_height(640)
        .build();

    let toast_overlay = libadwaita::ToastOverlay::new();
    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    let nav_home = gtk4::Button::with_label("Home");
    let nav_art = gtk4::Button::with_label("Art");
    let nav_literature = gtk4::Button::with_label("Literature");
    header.pack_start(&nav_home);
    header.pack_start(&nav_art);

    let nav_music = if config.music_enabled {
        let button = gtk4::Button::with_label("Music");
        header.pack_start(&button);
        Some(button)
    } else {
        None
    };
    header.pack_start(&nav_literature);

    toolbar_view.add_top_bar(&header);

    let home = super::home::build_home(config, stats);
    let art = super::art::build_art();
    let literature = super::literature::build_literature(config.show_literature_debug);
    let music = if config.music_enabled {
        Some(super::music::build_music())
    } else {
        None
    };

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    content.append(&home.container);
    content.append(&art.container);
    content.append(&literature.container);
    if let Some(ref music) = music {
        content.append(&music.container);
    }

    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&content)
        .build();
    toolbar_view.set_content(Some(&scrolled));
    toast_overlay.set_child(Some(&toolbar_view));
    window.set_content(Some(&toast_overlay));

    WindowWidgets {
        window,
        toast_overlay,
        nav_home,
        nav_art,
        nav_music,
        nav_literature,
        home,
        art,
        literature,
        music,
    }
}

/// Hide every screen container, then show the visible one (if any).
pub fn sync_visible_screen(w: &WindowWidgets, visible: Option<Screen>) {
    w.home.container.set_visible(visible == Some(Screen::Home));
    w.art.container.set_visible(visible == Some(Screen::Art));
    w.literature
        .container
        .set_visible(visible == Some(Screen::Literature));
    if let Some(ref music) = w.music {
        music.container.set_visible(visible == Some(Screen::Music));
    }
}
