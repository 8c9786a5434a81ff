//! Native dialogs via rfd

use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::gui::{Mode, Notice, Prompter};
use crate::image_pipeline::TIFF_EXTENSIONS;

pub struct NativePrompter;

impl Prompter for NativePrompter {
    fn choose_mode(&self) -> Option<Mode> {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("TIFF to PNG")
            .set_description(
                "Convert a single file?\n\nYes: pick one TIFF file\nNo: convert every TIFF in a directory",
            )
            .set_buttons(MessageButtons::YesNoCancel)
            .show();

        match answer {
            MessageDialogResult::Yes => Some(Mode::SingleFile),
            MessageDialogResult::No => Some(Mode::Directory),
            _ => None,
        }
    }

    fn pick_input_file(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Select TIFF File")
            .add_filter("TIFF Images", TIFF_EXTENSIONS)
            .pick_file()
    }

    fn pick_output_file(&self, suggested: &Path) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Save PNG As")
            .add_filter("PNG Images", &["png"]);
        if let Some(dir) = suggested.parent() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = suggested.file_name().and_then(|n| n.to_str()) {
            dialog = dialog.set_file_name(name);
        }
        dialog.save_file()
    }

    fn pick_input_directory(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Select Directory With TIFF Files")
            .pick_folder()
    }

    fn pick_output_directory(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Select Output Directory (cancel to save next to inputs)")
            .pick_folder()
    }

    fn notify(&self, level: Notice, title: &str, message: &str) {
        let level = match level {
            Notice::Info => MessageLevel::Info,
            Notice::Warning => MessageLevel::Warning,
            Notice::Error => MessageLevel::Error,
        };
        let _ = MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
