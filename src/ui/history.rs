use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::stats::ProtectionRecord;

/// Show a window listing past protections.
pub fn show_history_window(parent: &impl IsA<gtk4::Window>, history: &[ProtectionRecord]) {
    let window = libadwaita::Window::builder()
        .title("Protection History")
        .default_width(480)
        .default_height(520)
        .transient_for(parent)
        .modal(true)
        .build();

    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    let back_btn = gtk4::Button::from_icon_name("go-previous-symbolic");
    back_btn.set_tooltip_text(Some("Back"));
    let win_for_back = window.clone();
    back_btn.connect_clicked(move |_| {
        win_for_back.close();
    });
    header.pack_start(&back_btn);
    toolbar_view.add_top_bar(&header);

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    if history.is_empty() {
        let empty_label = gtk4::Label::new(Some("Nothing protected yet."));
        empty_label.add_css_class("dim-label");
        empty_label.set_vexpand(true);
        empty_label.set_valign(gtk4::Align::Center);
        content.append(&empty_label);
    } else {
        let group = libadwaita::PreferencesGroup::new();
        group.set_title("Recent Protections");

        for record in history.iter().rev() {
            let row = libadwaita::ActionRow::builder()
                .title(record.kind.label())
                .subtitle(&record.detail)
                .build();
            let stamp = gtk4::Label::new(Some(&record.timestamp));
            stamp.add_css_class("dim-label");
            row.add_suffix(&stamp);
            group.add(&row);
        }

        content.append(&group);
    }

    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&content)
        .build();
    toolbar_view.set_content(Some(&scrolled));
    window.set_content(Some(&toolbar_view));
    window.present();
}
