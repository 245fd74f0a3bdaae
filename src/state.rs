use crate::dns::{NetshSwitcher, ProfileStore, ToggleOutcome};

#[derive(Clone, Debug)]
pub struct AppState {
    pub switcher: NetshSwitcher,
    pub selected_profile: Option<String>,
    pub form: ProfileForm,
    pub active_interface: Option<String>,
    pub current_dns: Vec<String>,
    pub pending_delete: Option<String>,
    pub message: Option<Message>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub preferred: String,
    pub alternate: String,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl From<ToggleOutcome> for Message {
    fn from(outcome: ToggleOutcome) -> Self {
        Self {
            text: outcome.message,
            is_error: outcome.is_error,
        }
    }
}

impl AppState {
    pub fn new(store: ProfileStore) -> Self {
        let switcher = NetshSwitcher::open(store);
        let selected_profile = switcher.list_profiles().first().map(|p| p.name.clone());

        Self {
            switcher,
            selected_profile,
            form: ProfileForm::default(),
            active_interface: None,
            current_dns: Vec::new(),
            pending_delete: None,
            message: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.switcher.connection().busy
    }

    pub fn is_connected(&self) -> bool {
        self.switcher.connection().connected
    }

    pub fn set_message(&mut self, message: Message) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn select_profile(&mut self, name: &str) {
        self.selected_profile = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }

    /// Keeps the selection pointing at a stored profile after the list changed.
    pub fn reconcile_selection(&mut self) {
        let profiles = self.switcher.list_profiles();
        let still_exists = self
            .selected_profile
            .as_ref()
            .is_some_and(|name| profiles.iter().any(|p| &p.name == name));

        if !still_exists {
            self.selected_profile = profiles.first().map(|p| p.name.clone());
        }
    }

    pub fn add_profile_from_form(&mut self) {
        let form = self.form.clone();
        match self
            .switcher
            .add_profile(&form.name, &form.preferred, &form.alternate)
        {
            Ok(()) => {
                self.selected_profile = Some(form.name.trim().to_string());
                self.form = ProfileForm::default();
                self.set_message(Message::success(format!(
                    "Profile \"{}\" saved",
                    form.name.trim()
                )));
            }
            Err(e) => {
                self.set_message(Message::error(format!("Failed to save profile: {}", e)));
            }
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(name) = self.pending_delete.take() else {
            return;
        };

        match self.switcher.delete_profile(&name) {
            Ok(()) => {
                self.reconcile_selection();
                self.set_message(Message::success(format!("Profile \"{}\" deleted", name)));
            }
            Err(e) => {
                self.set_message(Message::error(format!("Failed to delete profile: {}", e)));
            }
        }
    }
}
