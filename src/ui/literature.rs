use gtk4::prelude::*;

use crate::app::WorkflowPhase;

/// Handles for the literature screen's two sub-panels.
pub struct LiteratureWidgets {
    pub container: gtk4::Box,
    pub upload_panel: gtk4::Box,
    pub result_panel: gtk4::Box,
    pub text_view: gtk4::TextView,
    pub submit_button: gtk4::Button,
    pub result_label: gtk4::Label,
    /// Only built when the debug panel is enabled in config.
    pub debug_label: Option<gtk4::Label>,
    pub copy_button: gtk4::Button,
    pub back_button: gtk4::Button,
}

/// Build the literature screen: a text-entry panel and a result panel.
pub fn build_literature(show_debug: bool) -> LiteratureWidgets {
    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    container.set_margin_start(16);
    container.set_margin_end(16);
    container.set_margin_top(12);
    container.set_margin_bottom(12);

    // --- Upload panel ---
    let upload_panel = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    let heading = gtk4::Label::new(Some("Protect your writing"));
    heading.add_css_class("title-3");
    upload_panel.append(&heading);

    let text_view = gtk4::TextView::new();
    text_view.set_wrap_mode(gtk4::WrapMode::WordChar);
    text_view.set_top_margin(8);
    text_view.set_bottom_margin(8);
    text_view.set_left_margin(8);
    text_view.set_right_margin(8);

    let text_scroll = gtk4::ScrolledWindow::builder()
        .child(&text_view)
        .min_content_height(220)
        .build();
    text_scroll.add_css_class("card");
    upload_panel.append(&text_scroll);

    let submit_button = gtk4::Button::with_label("Protect");
    submit_button.add_css_class("suggested-action");
    submit_button.add_css_class("pill");
    submit_button.set_halign(gtk4::Align::Center);
    upload_panel.append(&submit_button);

    container.append(&upload_panel);

    // --- Result panel ---
    let result_panel = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    let result_heading = gtk4::Label::new(Some("Protected text"));
    result_heading.add_css_class("title-3");
    result_panel.append(&result_heading);

    let result_label = gtk4::Label::new(None);
    result_label.set_wrap(true);
    result_label.set_xalign(0.0);
    result_label.set_selectable(true);

    let result_scroll = gtk4::ScrolledWindow::builder()
        .child(&result_label)
        .min_content_height(220)
        .build();
    result_scroll.add_css_class("card");
    result_panel.append(&result_scroll);

    let debug_label = if show_debug {
        let expander = gtk4::Expander::new(Some("Marker annotation"));
        let label = gtk4::Label::new(None);
        label.set_wrap(true);
        label.set_xalign(0.0);
        label.add_css_class("monospace");
        expander.set_child(Some(&label));
        result_panel.append(&expander);
        Some(label)
    } else {
        None
    };

    let actions = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    actions.set_halign(gtk4::Align::Center);

    let copy_button = gtk4::Button::with_label("Copy");
    copy_button.add_css_class("suggested-action");
    let back_button = gtk4::Button::with_label("Back");
    actions.append(&copy_button);
    actions.append(&back_button);
    result_panel.append(&actions);

    result_panel.set_visible(false);
    container.append(&result_panel);

    LiteratureWidgets {
        container,
        upload_panel,
        result_panel,
        text_view,
        submit_button,
        result_label,
        debug_label,
        copy_button,
        back_button,
    }
}

/// Show the sub-panel matching the workflow phase.
pub fn set_literature_phase(w: &LiteratureWidgets, phase: WorkflowPhase) {
    let awaiting = phase == WorkflowPhase::AwaitingInput;
    w.upload_panel.set_visible(awaiting);
    w.result_panel.set_visible(!awaiting);
}
