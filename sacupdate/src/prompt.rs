//! User-facing dialogs for the update flow.

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Modal questions and notices shown while checking for updates.
///
/// Every call blocks until the user dismisses the dialog.
pub trait Prompter {
    fn info(&self, title: &str, message: &str);
    fn warn(&self, title: &str, message: &str);
    /// Ask a yes/no question. Returns `true` for yes.
    fn confirm(&self, title: &str, message: &str) -> bool;
}

impl<T: Prompter + ?Sized> Prompter for &T {
    fn info(&self, title: &str, message: &str) {
        (**self).info(title, message);
    }

    fn warn(&self, title: &str, message: &str) {
        (**self).warn(title, message);
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        (**self).confirm(title, message)
    }
}

/// Native message boxes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogPrompter;

impl DialogPrompter {
    fn dialog(level: MessageLevel, title: &str, message: &str) -> MessageDialog {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
    }
}

impl Prompter for DialogPrompter {
    fn info(&self, title: &str, message: &str) {
        Self::dialog(MessageLevel::Info, title, message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn warn(&self, title: &str, message: &str) {
        Self::dialog(MessageLevel::Warning, title, message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        let answer = Self::dialog(MessageLevel::Info, title, message)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }
}
