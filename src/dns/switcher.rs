use crate::dns::applier::{DnsApplier, NetshApplier};
use crate::dns::command::SystemNetsh;
use crate::dns::connection::ConnectionController;
use crate::dns::network::{InterfaceLocator, NetshLocator};
use crate::dns::store::{self, ProfileStore, StoreError, find_profile};
use crate::dns::types::{ConnectionState, DnsProfile, ProfileList, ToggleOutcome};
use crate::dns::validation::{validate_ipv4, validate_profile_name};
use tracing::{info, warn};

pub type NetshSwitcher = DnsSwitcher<NetshLocator, NetshApplier>;

/// Everything the presentation layer calls: profile management plus the
/// connection toggle. The in-memory list always mirrors the last successful
/// load or save.
#[derive(Clone, Debug)]
pub struct DnsSwitcher<L, A> {
    store: ProfileStore,
    profiles: ProfileList,
    controller: ConnectionController<L, A>,
}

impl NetshSwitcher {
    pub fn open(store: ProfileStore) -> Self {
        Self::with_backend(store, NetshLocator, NetshApplier::new(SystemNetsh))
    }
}

impl<L: InterfaceLocator, A: DnsApplier> DnsSwitcher<L, A> {
    pub fn with_backend(store: ProfileStore, locator: L, applier: A) -> Self {
        let profiles = store.load();
        info!(path = %store.path().display(), count = profiles.len(), "profiles loaded");
        Self {
            store,
            profiles,
            controller: ConnectionController::new(locator, applier),
        }
    }

    pub fn list_profiles(&self) -> &[DnsProfile] {
        &self.profiles
    }

    pub fn connection(&self) -> &ConnectionState {
        self.controller.state()
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.controller.set_busy(busy);
    }

    pub fn add_profile(&mut self, name: &str, preferred: &str, alternate: &str) -> store::Result<()> {
        let profile = DnsProfile::new(name.trim(), preferred.trim(), alternate.trim());

        if !validate_profile_name(&profile.name) {
            return Err(StoreError::EmptyName);
        }
        if profile.preferred.is_empty() || !validate_ipv4(&profile.preferred) {
            return Err(StoreError::InvalidAddress("preferred"));
        }
        if !validate_ipv4(&profile.alternate) {
            return Err(StoreError::InvalidAddress("alternate"));
        }
        if find_profile(&self.profiles, &profile.name).is_some() {
            return Err(StoreError::DuplicateName(profile.name));
        }

        let next = store::add_profile(&self.profiles, profile);
        self.commit(next)
    }

    pub fn delete_profile(&mut self, name: &str) -> store::Result<()> {
        let next = store::delete_profile(&self.profiles, name);
        self.commit(next)
    }

    fn commit(&mut self, next: ProfileList) -> store::Result<()> {
        if let Err(e) = self.store.save(&next) {
            warn!(path = %self.store.path().display(), error = %e, "failed to save profiles");
            return Err(e);
        }
        self.profiles = next;
        Ok(())
    }

    pub async fn toggle(&mut self, selected: Option<&str>) -> ToggleOutcome {
        let result = self.controller.toggle(&self.profiles, selected).await;
        self.controller.set_busy(false);

        let connected = self.controller.is_connected();
        match result {
            Ok(transition) => ToggleOutcome::success(connected, transition.message()),
            Err(e) => ToggleOutcome::error(connected, e.to_string()),
        }
    }

    pub async fn active_interface(&self) -> Option<String> {
        self.controller.locator().active_interface().await
    }

    pub async fn revert_on_exit(&self) {
        self.controller.revert_on_exit().await;
    }
}
