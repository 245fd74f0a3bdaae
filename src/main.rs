#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod dns;
mod logging;
mod state;

use dioxus::desktop::tao::dpi::LogicalSize;
use dioxus::desktop::{Config, WindowBuilder, WindowCloseBehaviour};
use dns::{AppPaths, ProfileStore};
use std::path::PathBuf;
use tracing::{info, warn};

const WINDOW_WIDTH: f64 = 450.0;
const WINDOW_HEIGHT: f64 = 600.0;

fn main() {
    let paths = match AppPaths::resolve() {
        Ok(paths) => Some(paths),
        Err(e) => {
            eprintln!("Failed to resolve app directories, using working directory: {}", e);
            None
        }
    };

    let _log_guard = match logging::init(paths.as_ref().map(|p| p.logs.as_path())) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let store_path = paths
        .map(|p| p.profiles)
        .unwrap_or_else(|| PathBuf::from("profiles.json"));
    info!(path = %store_path.display(), "using profile store");

    if dns::privilege::is_elevated() == Some(false) {
        warn!("not running as administrator, DNS changes will fail");
    }

    let window_builder = WindowBuilder::new()
        .with_title("Quick DNS Changer")
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

    dioxus::LaunchBuilder::new()
        .with_cfg(
            Config::new()
                .with_menu(None)
                .with_window(window_builder)
                .with_close_behaviour(WindowCloseBehaviour::WindowHides),
        )
        .with_context(ProfileStore::new(store_path))
        .launch(app::App);
}
