use crate::dns::command::run_netsh;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static ACTIVE_INTERFACE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\S+[ \t]+Connected[ \t]+Dedicated[ \t]+(\S[^\r\n]*?)[ \t\r]*$")
        .expect("interface line pattern is valid")
});

static IPV4_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,3}(?:\.\d{1,3}){3}\b").expect("IPv4 literal pattern is valid")
});

/// Finds the network interface the toggle acts on.
#[allow(async_fn_in_trait)]
pub trait InterfaceLocator {
    /// Names of connected, dedicated interfaces in OS order. Any failure
    /// yields an empty list.
    async fn list_active_interfaces(&self) -> Vec<String>;

    async fn active_interface(&self) -> Option<String> {
        self.list_active_interfaces().await.into_iter().next()
    }
}

/// Scrapes `netsh interface show interface`.
#[derive(Clone, Copy, Default, Debug)]
pub struct NetshLocator;

impl InterfaceLocator for NetshLocator {
    async fn list_active_interfaces(&self) -> Vec<String> {
        match run_netsh(&["interface", "show", "interface"]).await {
            Ok(output) => {
                let interfaces = parse_active_interfaces(&output);
                debug!(?interfaces, "active interfaces");
                interfaces
            }
            Err(e) => {
                warn!(error = %e, "interface enumeration failed");
                Vec::new()
            }
        }
    }
}

pub fn parse_active_interfaces(output: &str) -> Vec<String> {
    ACTIVE_INTERFACE_LINE
        .captures_iter(output)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// DNS servers currently configured on `interface`, for display only.
pub async fn current_dns_servers(interface: &str) -> Vec<String> {
    let name = format!("name={}", interface);
    match run_netsh(&["interface", "ipv4", "show", "dnsservers", &name]).await {
        Ok(output) => parse_dns_servers(&output),
        Err(e) => {
            warn!(interface, error = %e, "could not read DNS servers");
            Vec::new()
        }
    }
}

pub fn parse_dns_servers(output: &str) -> Vec<String> {
    IPV4_LITERAL
        .find_iter(output)
        .map(|m| m.as_str().to_string())
        .collect()
}
