use std::net::Ipv4Addr;

pub fn validate_ipv4(addr: &str) -> bool {
    if addr.trim().is_empty() {
        return true;
    }
    addr.trim().parse::<Ipv4Addr>().is_ok()
}

pub fn validate_profile_name(name: &str) -> bool {
    !name.trim().is_empty()
}
