use crate::dns::command::{NetshRunner, Result, SystemNetsh, classify_failure};
use crate::dns::privilege::is_elevated;
use tracing::{info, warn};

/// Mutates the DNS configuration of a named interface.
///
/// Neither operation is transactional: when the secondary server is rejected
/// the primary server has already been written.
#[allow(async_fn_in_trait)]
pub trait DnsApplier {
    async fn apply_static(
        &self,
        interface: &str,
        preferred: &str,
        alternate: Option<&str>,
    ) -> Result<()>;

    async fn apply_dynamic(&self, interface: &str) -> Result<()>;
}

#[derive(Clone, Copy, Default, Debug)]
pub struct NetshApplier<R = SystemNetsh> {
    runner: R,
}

impl<R: NetshRunner> NetshApplier<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn run(&self, args: &[&str]) -> Result<()> {
        self.runner
            .run(args)
            .await
            .map(|_| ())
            .map_err(|e| classify_failure(e, is_elevated()))
    }
}

pub fn static_dns_args(interface: &str, preferred: &str) -> Vec<String> {
    vec![
        "interface".into(),
        "ipv4".into(),
        "set".into(),
        "dns".into(),
        format!("name={}", interface),
        "static".into(),
        preferred.into(),
    ]
}

pub fn secondary_dns_args(interface: &str, alternate: &str) -> Vec<String> {
    vec![
        "interface".into(),
        "ipv4".into(),
        "add".into(),
        "dns".into(),
        format!("name={}", interface),
        alternate.into(),
        "index=2".into(),
    ]
}

pub fn dhcp_dns_args(interface: &str) -> Vec<String> {
    vec![
        "interface".into(),
        "ipv4".into(),
        "set".into(),
        "dns".into(),
        format!("name={}", interface),
        "source=dhcp".into(),
    ]
}

fn as_strs(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}

impl<R: NetshRunner> DnsApplier for NetshApplier<R> {
    async fn apply_static(
        &self,
        interface: &str,
        preferred: &str,
        alternate: Option<&str>,
    ) -> Result<()> {
        self.run(&as_strs(&static_dns_args(interface, preferred)))
            .await
            .inspect_err(|e| warn!(interface, preferred, error = %e, "setting primary DNS failed"))?;

        if let Some(alternate) = alternate {
            self.run(&as_strs(&secondary_dns_args(interface, alternate)))
                .await
                .inspect_err(
                    |e| warn!(interface, alternate, error = %e, "adding secondary DNS failed"),
                )?;
        }

        info!(interface, preferred, ?alternate, "static DNS applied");
        Ok(())
    }

    async fn apply_dynamic(&self, interface: &str) -> Result<()> {
        self.run(&as_strs(&dhcp_dns_args(interface)))
            .await
            .inspect_err(|e| warn!(interface, error = %e, "reverting to DHCP failed"))?;

        info!(interface, "DNS reverted to DHCP");
        Ok(())
    }
}
