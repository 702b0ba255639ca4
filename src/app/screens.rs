/// The four top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Art,
    Music,
    Literature,
}

/// Owns the set of registered screens and the single visible one.
///
/// Invariant: at most one screen is visible. Showing an unregistered screen
/// hides everything and leaves nothing visible — degenerate but accepted
/// (it only arises when a screen is disabled by config).
#[derive(Debug, Clone)]
pub struct ScreenRegistry {
    registered: Vec<Screen>,
    visible: Option<Screen>,
}

impl ScreenRegistry {
    pub fn new(registered: Vec<Screen>) -> Self {
        Self {
            registered,
            visible: None,
        }
    }

    pub fn is_registered(&self, screen: Screen) -> bool {
        self.registered.contains(&screen)
    }

    /// Hide everything, then show `screen` if registered. Returns the screen
    /// actually entered so the caller can fan out screen-entered
    /// notifications to the workflows.
    pub fn show(&mut self, screen: Screen) -> Option<Screen> {
        self.visible = if self.is_registered(screen) {
            Some(screen)
        } else {
            log::warn!("show() on unregistered screen {screen:?}");
            None
        };
        self.visible
    }

    pub fn visible(&self) -> Option<Screen> {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_screens() -> Vec<Screen> {
        vec![Screen::Home, Screen::Art, Screen::Music, Screen::Literature]
    }

    #[test]
    fn show_leaves_exactly_the_named_screen_visible() {
        let mut reg = ScreenRegistry::new(all_screens());
        for screen in all_screens() {
            assert_eq!(reg.show(screen), Some(screen));
            assert_eq!(reg.visible(), Some(screen));
        }
    }

    #[test]
    fn show_replaces_the_previous_screen() {
        let mut reg = ScreenRegistry::new(all_screens());
        reg.show(Screen::Art);
        reg.show(Screen::Music);
        assert_eq!(reg.visible(), Some(Screen::Music));
    }

    #[test]
    fn unregistered_screen_hides_everything() {
        // Music disabled by config.
        let mut reg =
            ScreenRegistry::new(vec![Screen::Home, Screen::Art, Screen::Literature]);
        reg.show(Screen::Art);
        assert_eq!(reg.show(Screen::Music), None);
        assert_eq!(reg.visible(), None);
    }
}
