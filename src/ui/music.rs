use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::app::music::UPLOAD_IDLE;
use crate::app::WorkflowPhase;

/// Handles for the music screen's two sub-panels.
pub struct MusicWidgets {
    pub container: gtk4::Box,
    pub upload_panel: gtk4::Box,
    pub result_panel: gtk4::Box,
    pub file_row: libadwaita::ActionRow,
    pub choose_button: gtk4::Button,
    pub upload_button: gtk4::Button,
    pub video: gtk4::Video,
    pub download_button: gtk4::Button,
    pub back_button: gtk4::Button,
}

/// Build the music screen: an upload panel and a playback/result panel.
pub fn build_music() -> MusicWidgets {
    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    container.set_margin_start(16);
    container.set_margin_end(16);
    container.set_margin_top(12);
    container.set_margin_bottom(12);

    // --- Upload panel ---
    let upload_panel = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    let upload_group = libadwaita::PreferencesGroup::new();
    upload_group.set_title("Protect a track");
    upload_group.set_description(Some(
        "MP3 or WAV, at least 20 seconds. A burst of static is hidden in the quietest stretch.",
    ));

    let file_row = libadwaita::ActionRow::builder()
        .title("Audio file")
        .subtitle("None selected")
        .build();
    let choose_button = gtk4::Button::builder()
        .label("Choose\u{2026}")
        .valign(gtk4::Align::Center)
        .build();
    file_row.add_suffix(&choose_button);
    upload_group.add(&file_row);
    upload_panel.append(&upload_group);

    let upload_button = gtk4::Button::with_label(UPLOAD_IDLE);
    upload_button.add_css_class("suggested-action");
    upload_button.add_css_class("pill");
    upload_button.set_halign(gtk4::Align::Center);
    upload_panel.append(&upload_button);

    container.append(&upload_panel);

    // --- Result panel ---
    let result_panel = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    let heading = gtk4::Label::new(Some("Protected audio"));
    heading.add_css_class("title-3");
    result_panel.append(&heading);

    let video = gtk4::Video::new();
    video.set_autoplay(false);
    video.set_size_request(-1, 160);
    video.add_css_class("card");
    result_panel.append(&video);

    let actions = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    actions.set_halign(gtk4::Align::Center);

    let download_button = gtk4::Button::with_label("Download");
    download_button.add_css_class("suggested-action");
    let back_button = gtk4::Button::with_label("Back");
    actions.append(&download_button);
    actions.append(&back_button);
    result_panel.append(&actions);

    result_panel.set_visible(false);
    container.append(&result_panel);

    MusicWidgets {
        container,
        upload_panel,
        result_panel,
        file_row,
        choose_button,
        upload_button,
        video,
        download_button,
        back_button,
    }
}

/// Show the sub-panel matching the workflow phase.
pub fn set_music_phase(w: &MusicWidgets, phase: WorkflowPhase) {
    let awaiting = phase == WorkflowPhase::AwaitingInput;
    w.upload_panel.set_visible(awaiting);
    w.result_panel.set_visible(!awaiting);
}
