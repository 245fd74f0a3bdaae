use crate::components::*;
use crate::dns::{ProfileStore, current_dns_servers};
use crate::state::{AppState, Message, ProfileForm};
use dioxus::desktop::tao::event::{Event, WindowEvent};
use dioxus::desktop::{DesktopContext, WindowCloseBehaviour, use_window, use_wry_event_handler};
use dioxus::prelude::*;
use tracing::info;

#[allow(non_snake_case)]
pub fn App() -> Element {
    let store = use_context::<ProfileStore>();
    let mut state = use_signal(move || AppState::new(store));
    let mut exiting = use_signal(|| false);
    let window = use_window();

    use_effect(move || {
        spawn(async move {
            refresh_current_dns(state).await;
        });
    });

    use_wry_event_handler(move |event, _| {
        if let Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } = event
            && !*exiting.peek()
        {
            exiting.set(true);
            let window = window.clone();
            spawn(async move {
                revert_before_exit(state, window).await;
            });
        }
    });

    let on_profile_change = move |name: String| {
        let mut write_state = state.write();
        write_state.select_profile(&name);
        write_state.clear_message();
    };

    let on_delete = move |_| {
        let mut write_state = state.write();
        write_state.pending_delete = write_state.selected_profile.clone();
    };

    let on_delete_confirm = move |_| {
        state.write().confirm_delete();
    };

    let on_delete_cancel = move |_| {
        state.write().pending_delete = None;
    };

    let on_form_change = move |form: ProfileForm| {
        state.write().form = form;
    };

    let on_add = move |_| {
        state.write().add_profile_from_form();
    };

    let on_toggle = move |_| {
        spawn(async move {
            toggle_connection(state).await;
        });
    };

    let pending_delete = state.read().pending_delete.clone();

    rsx! {
        style { {include_str!("../assets/main.css")} }
        div { class: "app-container",
            Header {}
            div { class: "content",
                ToggleButton { state: state, on_toggle: on_toggle }
                ProfileSelector {
                    state: state,
                    on_profile_change: on_profile_change,
                    on_delete: on_delete
                }
                ProfileEditor {
                    state: state,
                    on_change: on_form_change,
                    on_add: on_add
                }
            }
            StatusBar { state: state }
            if let Some(name) = pending_delete {
                DeleteConfirmDialog {
                    profile_name: name,
                    on_confirm: on_delete_confirm,
                    on_cancel: on_delete_cancel
                }
            }
        }
    }
}

async fn toggle_connection(mut state: Signal<AppState>) {
    let (mut switcher, selected) = {
        let mut write_state = state.write();
        if write_state.is_busy() {
            return;
        }
        write_state.clear_message();
        write_state.switcher.set_busy(true);
        (
            write_state.switcher.clone(),
            write_state.selected_profile.clone(),
        )
    };

    let outcome = switcher.toggle(selected.as_deref()).await;

    {
        let mut write_state = state.write();
        write_state.switcher = switcher;
        write_state.set_message(Message::from(outcome));
    }

    refresh_current_dns(state).await;
}

async fn refresh_current_dns(mut state: Signal<AppState>) {
    let switcher = state.read().switcher.clone();
    let interface = switcher.active_interface().await;

    let servers = match &interface {
        Some(name) => current_dns_servers(name).await,
        None => Vec::new(),
    };

    let mut write_state = state.write();
    write_state.active_interface = interface;
    write_state.current_dns = servers;
}

/// Puts the active interface back on DHCP, then closes the window for real.
/// The window is configured to hide on close, so the revert can wait for a
/// toggle still running on this executor without blocking the event loop.
async fn revert_before_exit(state: Signal<AppState>, window: DesktopContext) {
    info!("reverting DNS to DHCP before exit");
    let switcher = state.peek().switcher.clone();
    switcher.revert_on_exit().await;

    window.set_close_behavior(WindowCloseBehaviour::WindowCloses);
    window.close();
}
