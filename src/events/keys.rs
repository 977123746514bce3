/// Actions bound to the page's global keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleInspector,
    /// Restore the orbit camera to its start position.
    ResetCamera,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "i" | "I" => Some(KeyAction::ToggleInspector),
        "r" | "R" => Some(KeyAction::ResetCamera),
        _ => None,
    }
}
