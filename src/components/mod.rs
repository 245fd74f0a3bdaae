mod delete_confirm_dialog;
mod header;
mod profile_editor;
mod profile_selector;
mod status_bar;
mod toggle_button;

pub use delete_confirm_dialog::DeleteConfirmDialog;
pub use header::Header;
pub use profile_editor::ProfileEditor;
pub use profile_selector::ProfileSelector;
pub use status_bar::StatusBar;
pub use toggle_button::ToggleButton;
