use crate::state::AppState;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdPowerSettingsNew;

#[component]
pub fn ToggleButton(state: Signal<AppState>, on_toggle: EventHandler<()>) -> Element {
    let (is_busy, is_connected, status, active_profile) = {
        let state = state.read();
        let connection = state.switcher.connection();
        (
            connection.busy,
            connection.connected,
            connection.status,
            connection.active_profile_name.clone(),
        )
    };

    let label = if is_busy {
        "Working...".to_string()
    } else if let Some(name) = active_profile.filter(|_| is_connected) {
        format!("Connected: {}", name)
    } else {
        "Disconnected".to_string()
    };

    let connected_class = if is_connected { "on" } else { "off" };
    let status_class = status.css_class();

    rsx! {
        div { class: "toggle-section",
            button {
                class: "toggle-button {connected_class} {status_class}",
                disabled: is_busy,
                title: if is_connected { "Reset DNS to automatic" } else { "Apply selected profile" },
                onclick: move |_| on_toggle.call(()),
                Icon {
                    width: 56,
                    height: 56,
                    icon: MdPowerSettingsNew
                }
            }
            div { class: "toggle-label", "{label}" }
        }
    }
}
