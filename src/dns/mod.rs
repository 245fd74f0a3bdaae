pub mod applier;
pub mod command;
pub mod config;
pub mod connection;
pub mod network;
pub mod privilege;
pub mod store;
pub mod switcher;
pub mod types;
pub mod validation;

pub use config::AppPaths;
pub use network::current_dns_servers;
pub use store::ProfileStore;
pub use switcher::NetshSwitcher;
pub use types::ToggleOutcome;
