use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::config::Config;
use crate::stats::Stats;

/// Handles for the home screen.
pub struct HomeWidgets {
    pub container: gtk4::Box,
    pub art_card: gtk4::Button,
    pub music_card: Option<gtk4::Button>,
    pub literature_card: gtk4::Button,
    pub art_count: gtk4::Label,
    pub literature_count: gtk4::Label,
    pub music_count: gtk4::Label,
    pub history_row: libadwaita::ActionRow,
    pub server_row: libadwaita::EntryRow,
}

fn media_card(title: &str, subtitle: &str) -> gtk4::Button {
    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 4);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    let title_label = gtk4::Label::new(Some(title));
    title_label.add_css_class("title-2");
    let subtitle_label = gtk4::Label::new(Some(subtitle));
    subtitle_label.add_css_class("dim-label");

    content.append(&title_label);
    content.append(&subtitle_label);

    let button = gtk4::Button::builder().child(&content).hexpand(true).build();
    button.add_css_class("card");
    button
}

fn count_row(group: &libadwaita::PreferencesGroup, title: &str, initial: usize) -> gtk4::Label {
    let row = libadwaita::ActionRow::builder().title(title).build();
    let label = gtk4::Label::new(Some(&initial.to_string()));
    label.add_css_class("dim-label");
    row.add_suffix(&label);
    group.add(&row);
    label
}

/// Build the home screen: media cards, counters, history, server settings.
pub fn build_home(config: &Config, stats: &Stats) -> HomeWidgets {
    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    container.set_margin_start(16);
    container.set_margin_end(16);
    container.set_margin_top(12);
    container.set_margin_bottom(12);

    let heading = gtk4::Label::new(Some("What do you want to protect?"));
    heading.add_css_class("title-1");
    heading.set_margin_bottom(12);
    container.append(&heading);

    let cards = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    cards.set_homogeneous(true);

    let art_card = media_card("Art", "Watermark an image");
    cards.append(&art_card);

    let music_card = if config.music_enabled {
        let card = media_card("Music", "Protect an audio track");
        cards.append(&card);
        Some(card)
    } else {
        None
    };

    let literature_card = media_card("Literature", "Watermark your text");
    cards.append(&literature_card);
    container.append(&cards);

    // --- Statistics group ---
    let stats_group = libadwaita::PreferencesGroup::new();
    stats_group.set_title("Protected so far");
    stats_group.set_margin_top(16);

    let art_count = count_row(&stats_group, "Artworks", stats.art_protected);
    let literature_count = count_row(&stats_group, "Texts", stats.literature_protected);
    let music_count = count_row(&stats_group, "Tracks", stats.music_protected);

    let history_row = libadwaita::ActionRow::builder()
        .title("History")
        .activatable(true)
        .build();
    let chevron = gtk4::Image::from_icon_name("go-next-symbolic");
    history_row.add_suffix(&chevron);
    stats_group.add(&history_row);

    container.append(&stats_group);

    // --- Server group ---
    let server_group = libadwaita::PreferencesGroup::new();
    server_group.set_title("Protection server");
    server_group.set_margin_top(16);

    let server_row = libadwaita::EntryRow::builder()
        .title("Base URL")
        .text(&config.server_url)
        .build();
    server_group.add(&server_row);

    container.append(&server_group);

    HomeWidgets {
        container,
        art_card,
        music_card,
        literature_card,
        art_count,
        literature_count,
        music_count,
        history_row,
        server_row,
    }
}

/// Refresh the counters after a completed protection.
pub fn refresh_stats(home: &HomeWidgets, stats: &Stats) {
    home.art_count.set_text(&stats.art_protected.to_string());
    home.literature_count
        .set_text(&stats.literature_protected.to_string());
    home.music_count.set_text(&stats.music_protected.to_string());
}
