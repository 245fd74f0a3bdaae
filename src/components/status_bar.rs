use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn StatusBar(state: Signal<AppState>) -> Element {
    let message = state.read().message.clone();
    let interface = state
        .read()
        .active_interface
        .clone()
        .unwrap_or_else(|| "None".to_string());
    let servers = state.read().current_dns.clone();

    let servers_display = if servers.is_empty() {
        "Automatic".to_string()
    } else {
        servers.join(", ")
    };

    rsx! {
        div { class: "status-bar",
            if let Some(msg) = message {
                div {
                    class: if msg.is_error { "message error" } else { "message success" },
                    "{msg.text}"
                }
            }

            div { class: "status-section",
                div { class: "status-label", "Active interface:" }
                div { class: "status-value", "{interface}" }
            }

            div { class: "status-section",
                div { class: "status-label", "Current DNS:" }
                div { class: "status-value", "{servers_display}" }
            }
        }
    }
}
