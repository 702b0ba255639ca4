use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::app::art::UPLOAD_IDLE;
use crate::app::WorkflowPhase;

/// Handles for the art screen's two sub-panels.
pub struct ArtWidgets {
    pub container: gtk4::Box,
    pub upload_panel: gtk4::Box,
    pub select_panel: gtk4::Box,
    pub file_row: libadwaita::ActionRow,
    pub choose_button: gtk4::Button,
    pub upload_button: gtk4::Button,
    pub pictures: [gtk4::Picture; 3],
    pub toggles: [gtk4::ToggleButton; 3],
    pub download_button: gtk4::Button,
    pub back_button: gtk4::Button,
}

/// Build the art screen: an upload panel and a candidate-selection panel.
pub fn build_art() -> ArtWidgets {
    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    container.set_margin_start(16);
    container.set_margin_end(16);
    container.set_margin_top(12);
    container.set_margin_bottom(12);

    // --- Upload panel ---
    let upload_panel = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    let upload_group = libadwaita::PreferencesGroup::new();
    upload_group.set_title("Protect artwork");
    upload_group
        .set_description(Some("The server renders three watermark placements to pick from."));

    let file_row = libadwaita::ActionRow::builder()
        .title("Image file")
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

    // --- Selection panel ---
    let select_panel = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    let prompt = gtk4::Label::new(Some("Pick the placement you like best"));
    prompt.add_css_class("title-3");
    select_panel.append(&prompt);

    let candidates = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    candidates.set_homogeneous(true);

    let pictures: [gtk4::Picture; 3] = std::array::from_fn(|_| {
        let picture = gtk4::Picture::new();
        picture.set_content_fit(gtk4::ContentFit::Contain);
        picture.set_size_request(180, 140);
        picture.add_css_class("card");
        picture
    });
    let toggles: [gtk4::ToggleButton; 3] =
        std::array::from_fn(|i| gtk4::ToggleButton::with_label(&format!("Option {}", i + 1)));
    toggles[1].set_group(Some(&toggles[0]));
    toggles[2].set_group(Some(&toggles[0]));

    for (picture, toggle) in pictures.iter().zip(&toggles) {
        let column = gtk4::Box::new(gtk4::Orientation::Vertical, 6);
        column.append(picture);
        column.append(toggle);
        candidates.append(&column);
    }
    select_panel.append(&candidates);

    let actions = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    actions.set_halign(gtk4::Align::Center);

    let download_button = gtk4::Button::with_label("Download");
    download_button.add_css_class("suggested-action");
    let back_button = gtk4::Button::with_label("Back");
    actions.append(&download_button);
    actions.append(&back_button);
    select_panel.append(&actions);

    select_panel.set_visible(false);
    container.append(&select_panel);

    ArtWidgets {
        container,
        upload_panel,
        select_panel,
        file_row,
        choose_button,
        upload_button,
        pictures,
        toggles,
        download_button,
        back_button,
    }
}

/// Show the sub-panel matching the workflow phase.
pub fn set_art_phase(w: &ArtWidgets, phase: WorkflowPhase) {
    let awaiting = phase == WorkflowPhase::AwaitingInput;
    w.upload_panel.set_visible(awaiting);
    w.select_panel.set_visible(!awaiting);
}

/// Mark exactly one toggle active.
pub fn set_selection(w: &ArtWidgets, index: usize) {
    for (i, toggle) in w.toggles.iter().enumerate() {
        toggle.set_active(i == index);
    }
}
