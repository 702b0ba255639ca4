use gtk4::gdk;
use gtk4::prelude::*;

/// Copy text to the system clipboard via the default GDK display.
pub fn copy_to_clipboard(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let display = gdk::Display::default().ok_or("no display connection")?;
    display.clipboard().set_text(text);
    Ok(())
}
