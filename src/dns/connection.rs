//! The toggle between a static profile and DHCP-sourced DNS.
//!
//! The controller holds the only authoritative `connected` flag. It is never
//! reconciled with the OS: changes made by other tools go unnoticed.
//!
//! Clones share one lock, and every OS mutation runs while holding it, so the
//! exit revert never interleaves with a toggle that is still running.

use crate::dns::applier::DnsApplier;
use crate::dns::command::NetshError;
use crate::dns::network::InterfaceLocator;
use crate::dns::store::find_profile;
use crate::dns::types::{ConnectionState, DnsProfile, StatusIndicator};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

#[derive(Error, Debug)]
pub enum ToggleError {
    #[error("No profile selected")]
    NoProfileSelected,
    #[error("Profile \"{0}\" not found")]
    ProfileNotFound(String),
    #[error("No active network interface found")]
    NoActiveInterface,
    #[error("Failed to set DNS. Try running as administrator")]
    Apply(#[source] NetshError),
    #[error("Failed to reset DNS. Try running as administrator")]
    Revert(#[source] NetshError),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Transition {
    Applied { interface: String, profile: String },
    Reverted { interface: String },
}

impl Transition {
    pub fn message(&self) -> String {
        match self {
            Transition::Applied { interface, profile } => {
                format!("DNS set to \"{}\" on {}", profile, interface)
            }
            Transition::Reverted { interface } => {
                format!("DNS reset to automatic on {}", interface)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConnectionController<L, A> {
    locator: L,
    applier: A,
    state: ConnectionState,
    os_lock: Arc<Mutex<()>>,
}

impl<L: InterfaceLocator, A: DnsApplier> ConnectionController<L, A> {
    pub fn new(locator: L, applier: A) -> Self {
        Self {
            locator,
            applier,
            state: ConnectionState::new(),
            os_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.state.busy = busy;
    }

    /// Flips between the selected static profile and DHCP. On error the
    /// `connected` flag is left untouched.
    #[instrument(skip(self, profiles))]
    pub async fn toggle(
        &mut self,
        profiles: &[DnsProfile],
        selected: Option<&str>,
    ) -> Result<Transition, ToggleError> {
        let os_lock = Arc::clone(&self.os_lock);
        let _guard = os_lock.lock().await;

        let result = if self.state.connected {
            self.disconnect().await
        } else {
            self.connect(profiles, selected).await
        };

        match &result {
            Ok(transition) => {
                self.state.status = StatusIndicator::Success;
                info!(?transition, "toggle succeeded");
            }
            Err(e) => {
                self.state.status = StatusIndicator::Error;
                warn!(error = %e, cause = ?std::error::Error::source(e), "toggle failed");
            }
        }

        result
    }

    async fn connect(
        &mut self,
        profiles: &[DnsProfile],
        selected: Option<&str>,
    ) -> Result<Transition, ToggleError> {
        let name = selected
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ToggleError::NoProfileSelected)?;

        let profile = find_profile(profiles, name)
            .ok_or_else(|| ToggleError::ProfileNotFound(name.to_string()))?;

        let interface = self
            .locator
            .active_interface()
            .await
            .ok_or(ToggleError::NoActiveInterface)?;

        self.applier
            .apply_static(&interface, &profile.preferred, profile.alternate())
            .await
            .map_err(ToggleError::Apply)?;

        self.state.connected = true;
        self.state.active_profile_name = Some(profile.name.clone());

        Ok(Transition::Applied {
            interface,
            profile: profile.name.clone(),
        })
    }

    async fn disconnect(&mut self) -> Result<Transition, ToggleError> {
        // Without an interface nothing was reverted, so stay connected.
        let interface = self
            .locator
            .active_interface()
            .await
            .ok_or(ToggleError::NoActiveInterface)?;

        // A failed revert keeps the static profile in place as far as we know.
        self.applier
            .apply_dynamic(&interface)
            .await
            .map_err(ToggleError::Revert)?;

        self.state.connected = false;
        self.state.active_profile_name = None;

        Ok(Transition::Reverted { interface })
    }

    /// Best-effort DHCP reversion run when the application closes, whatever
    /// the `connected` flag says. Waits for any toggle in flight on a clone.
    pub async fn revert_on_exit(&self) {
        let _guard = self.os_lock.lock().await;
        debug!("exit revert holds the OS lock");

        let Some(interface) = self.locator.active_interface().await else {
            warn!("no active interface to revert on exit");
            return;
        };

        if let Err(e) = self.applier.apply_dynamic(&interface).await {
            warn!(interface, error = %e, "revert on exit failed");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, PartialEq, Eq, Debug)]
    pub enum Call {
        Static(String, String, Option<String>),
        Dynamic(String),
    }

    #[derive(Clone, Default)]
    pub struct MockLocator {
        pub interfaces: Vec<String>,
    }

    impl MockLocator {
        pub fn with(name: &str) -> Self {
            Self {
                interfaces: vec![name.to_string()],
            }
        }

        pub fn none() -> Self {
            Self::default()
        }
    }

    impl InterfaceLocator for MockLocator {
        async fn list_active_interfaces(&self) -> Vec<String> {
            self.interfaces.clone()
        }
    }

    #[derive(Clone, Default)]
    pub struct MockApplier {
        pub calls: Rc<RefCell<Vec<Call>>>,
        pub fail_static: bool,
        pub fail_dynamic: bool,
    }

    impl MockApplier {
        pub fn failing() -> Self {
            Self {
                fail_static: true,
                fail_dynamic: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    fn exit_failure() -> NetshError {
        NetshError::NonZeroExit {
            code: Some(1),
            message: "The requested operation requires elevation.".into(),
        }
    }

    impl DnsApplier for MockApplier {
        async fn apply_static(
            &self,
            interface: &str,
            preferred: &str,
            alternate: Option<&str>,
        ) -> crate::dns::command::Result<()> {
            self.calls.borrow_mut().push(Call::Static(
                interface.to_string(),
                preferred.to_string(),
                alternate.map(str::to_string),
            ));
            if self.fail_static {
                Err(exit_failure())
            } else {
                Ok(())
            }
        }

        async fn apply_dynamic(&self, interface: &str) -> crate::dns::command::Result<()> {
            self.calls
                .borrow_mut()
                .push(Call::Dynamic(interface.to_string()));
            if self.fail_dynamic {
                Err(exit_failure())
            } else {
                Ok(())
            }
        }
    }

    /// Applier whose static call parks until `release` is notified.
    #[derive(Clone, Default)]
    struct GatedApplier {
        events: Rc<RefCell<Vec<&'static str>>>,
        release: Rc<tokio::sync::Notify>,
    }

    impl GatedApplier {
        fn events(&self) -> Vec<&'static str> {
            self.events.borrow().clone()
        }
    }

    impl DnsApplier for GatedApplier {
        async fn apply_static(
            &self,
            _interface: &str,
            _preferred: &str,
            _alternate: Option<&str>,
        ) -> crate::dns::command::Result<()> {
            self.events.borrow_mut().push("static started");
            self.release.notified().await;
            self.events.borrow_mut().push("static finished");
            Ok(())
        }

        async fn apply_dynamic(&self, _interface: &str) -> crate::dns::command::Result<()> {
            self.events.borrow_mut().push("dynamic");
            Ok(())
        }
    }

    fn cloudflare() -> Vec<DnsProfile> {
        vec![DnsProfile::new("Cloudflare", "1.1.1.1", "1.0.0.1")]
    }

    #[tokio::test]
    async fn test_toggle_without_selection() {
        let applier = MockApplier::default();
        let mut controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());

        let result = controller.toggle(&cloudflare(), None).await;
        assert!(matches!(result, Err(ToggleError::NoProfileSelected)));

        let result = controller.toggle(&cloudflare(), Some("  ")).await;
        assert!(matches!(result, Err(ToggleError::NoProfileSelected)));

        assert!(!controller.is_connected());
        assert_eq!(controller.state().status, StatusIndicator::Error);
        assert!(applier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_profile() {
        let applier = MockApplier::default();
        let mut controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());

        let result = controller.toggle(&cloudflare(), Some("Quad9")).await;
        assert!(matches!(result, Err(ToggleError::ProfileNotFound(name)) if name == "Quad9"));
        assert!(!controller.is_connected());
        assert!(applier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_without_interface_skips_apply() {
        let applier = MockApplier::default();
        let mut controller = ConnectionController::new(MockLocator::none(), applier.clone());

        let result = controller.toggle(&cloudflare(), Some("Cloudflare")).await;
        assert!(matches!(result, Err(ToggleError::NoActiveInterface)));
        assert!(!controller.is_connected());
        assert_eq!(controller.state().status, StatusIndicator::Error);
        assert!(applier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_on_applies_profile() {
        let applier = MockApplier::default();
        let mut controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());

        let transition = controller
            .toggle(&cloudflare(), Some("Cloudflare"))
            .await
            .expect("toggle on");

        assert_eq!(
            transition,
            Transition::Applied {
                interface: "Ethernet".into(),
                profile: "Cloudflare".into()
            }
        );
        assert!(controller.is_connected());
        assert_eq!(
            controller.state().active_profile_name.as_deref(),
            Some("Cloudflare")
        );
        assert_eq!(controller.state().status, StatusIndicator::Success);
        assert_eq!(
            applier.calls(),
            vec![Call::Static(
                "Ethernet".into(),
                "1.1.1.1".into(),
                Some("1.0.0.1".into())
            )]
        );
    }

    #[tokio::test]
    async fn test_toggle_on_failure_stays_disconnected() {
        let applier = MockApplier::failing();
        let mut controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());

        let result = controller.toggle(&cloudflare(), Some("Cloudflare")).await;
        match result {
            Err(ToggleError::Apply(cause)) => {
                assert!(matches!(cause, NetshError::NonZeroExit { code: Some(1), .. }));
            }
            other => panic!("expected apply error, got {:?}", other),
        }
        assert!(!controller.is_connected());
        assert_eq!(controller.state().active_profile_name, None);
        assert_eq!(controller.state().status, StatusIndicator::Error);
    }

    #[tokio::test]
    async fn test_toggle_twice_reverts_with_dynamic() {
        let applier = MockApplier::default();
        let mut controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());

        controller
            .toggle(&cloudflare(), Some("Cloudflare"))
            .await
            .expect("toggle on");
        let transition = controller
            .toggle(&cloudflare(), Some("Cloudflare"))
            .await
            .expect("toggle off");

        assert_eq!(
            transition,
            Transition::Reverted {
                interface: "Ethernet".into()
            }
        );
        assert!(!controller.is_connected());
        assert_eq!(controller.state().active_profile_name, None);
        assert_eq!(
            applier.calls(),
            vec![
                Call::Static("Ethernet".into(), "1.1.1.1".into(), Some("1.0.0.1".into())),
                Call::Dynamic("Ethernet".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_toggle_off_without_interface_stays_connected() {
        let applier = MockApplier::default();
        let mut controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());
        controller
            .toggle(&cloudflare(), Some("Cloudflare"))
            .await
            .expect("toggle on");

        controller.locator = MockLocator::none();
        let result = controller.toggle(&cloudflare(), Some("Cloudflare")).await;

        assert!(matches!(result, Err(ToggleError::NoActiveInterface)));
        assert!(controller.is_connected());
        assert_eq!(applier.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_revert_stays_connected() {
        let mut applier = MockApplier::default();
        let mut controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());
        controller
            .toggle(&cloudflare(), Some("Cloudflare"))
            .await
            .expect("toggle on");

        applier.fail_dynamic = true;
        controller.applier = applier.clone();
        let result = controller.toggle(&cloudflare(), Some("Cloudflare")).await;

        assert!(matches!(result, Err(ToggleError::Revert(_))));
        assert!(controller.is_connected());
        assert_eq!(
            controller.state().active_profile_name.as_deref(),
            Some("Cloudflare")
        );
    }

    #[tokio::test]
    async fn test_profile_without_alternate() {
        let applier = MockApplier::default();
        let mut controller = ConnectionController::new(MockLocator::with("Wi-Fi"), applier.clone());
        let profiles = vec![DnsProfile::new("Quad9", "9.9.9.9", "")];

        controller
            .toggle(&profiles, Some("Quad9"))
            .await
            .expect("toggle on");

        assert_eq!(
            applier.calls(),
            vec![Call::Static("Wi-Fi".into(), "9.9.9.9".into(), None)]
        );
    }

    #[tokio::test]
    async fn test_revert_on_exit_is_unconditional() {
        let applier = MockApplier::default();
        let controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());

        controller.revert_on_exit().await;
        assert_eq!(applier.calls(), vec![Call::Dynamic("Ethernet".into())]);
    }

    #[tokio::test]
    async fn test_revert_on_exit_swallows_failures() {
        let applier = MockApplier::failing();
        let controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());
        controller.revert_on_exit().await;

        let applier = MockApplier::default();
        let controller = ConnectionController::new(MockLocator::none(), applier.clone());
        controller.revert_on_exit().await;
        assert!(applier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_revert_on_exit_waits_for_toggle_in_flight() {
        let applier = GatedApplier::default();
        let mut controller = ConnectionController::new(MockLocator::with("Ethernet"), applier.clone());
        let exiting = controller.clone();
        let profiles = cloudflare();

        let toggle = controller.toggle(&profiles, Some("Cloudflare"));
        let exit = async {
            tokio::task::yield_now().await;
            exiting.revert_on_exit().await;
        };
        let release = async {
            for _ in 0..8 {
                tokio::task::yield_now().await;
            }
            assert_eq!(applier.events(), vec!["static started"]);
            applier.release.notify_one();
        };

        let (result, (), ()) = tokio::join!(toggle, exit, release);

        assert!(result.is_ok());
        assert_eq!(
            applier.events(),
            vec!["static started", "static finished", "dynamic"]
        );
    }
}
