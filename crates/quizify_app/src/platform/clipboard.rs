use arboard::Clipboard;

/// Lazily opened system clipboard. Kept open so the copied text outlives the call on X11.
#[derive(Default)]
pub struct ClipboardWriter {
    clipboard: Option<Clipboard>,
}

impl ClipboardWriter {
    pub fn set_text(&mut self, text: &str) -> Result<(), String> {
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new().map_err(|err| err.to_string())?);
        }
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_owned())
                .map_err(|err| err.to_string()),
            None => Err("clipboard unavailable".to_string()),
        }
    }
}
