/// Popup UI for the dark mode extension

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::chrome_controller;
use crate::toggle::PopupSnapshot;

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Ready(PopupSnapshot),
    Busy(PopupSnapshot),
}

impl PopupState {
    fn snapshot(&self) -> Option<&PopupSnapshot> {
        match self {
            PopupState::Loading => None,
            PopupState::Ready(snapshot) | PopupState::Busy(snapshot) => Some(snapshot),
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);

    // Read tab and whitelist state on mount
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let snapshot = chrome_controller().open().await;
                state.set(PopupState::Ready(snapshot));
            });
            || ()
        });
    }

    // Dark mode toggle handler
    let on_toggle = {
        let state = state.clone();

        Callback::from(move |_| {
            let PopupState::Ready(snapshot) = &*state else {
                return;
            };
            let mut snapshot = snapshot.clone();
            let state = state.clone();

            state.set(PopupState::Busy(snapshot.clone()));

            spawn_local(async move {
                chrome_controller().toggle(&mut snapshot).await;
                state.set(PopupState::Ready(snapshot));
            });
        })
    };

    // Add/remove current domain handler
    let on_whitelist_toggle = {
        let state = state.clone();

        Callback::from(move |_| {
            let PopupState::Ready(snapshot) = &*state else {
                return;
            };
            let mut snapshot = snapshot.clone();
            let state = state.clone();

            state.set(PopupState::Busy(snapshot.clone()));

            spawn_local(async move {
                chrome_controller().toggle_whitelist(&mut snapshot).await;
                state.set(PopupState::Ready(snapshot));
            });
        })
    };

    // Remove a listed domain handler
    let on_remove_domain = {
        let state = state.clone();

        Callback::from(move |domain: String| {
            let PopupState::Ready(snapshot) = &*state else {
                return;
            };
            let mut snapshot = snapshot.clone();
            let state = state.clone();

            state.set(PopupState::Busy(snapshot.clone()));

            spawn_local(async move {
                chrome_controller().remove_domain(&mut snapshot, &domain).await;
                state.set(PopupState::Ready(snapshot));
            });
        })
    };

    let is_busy = matches!(*state, PopupState::Busy(_));

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Dark Mode"}</h1>

            {match state.snapshot() {
                None => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                Some(snapshot) => {
                    let toggle_class = if snapshot.dark_mode.is_active() {
                        "toggle-button active"
                    } else {
                        "toggle-button"
                    };

                    html! {
                        <>
                            <div class="toggle-row">
                                <button
                                    class={toggle_class}
                                    onclick={on_toggle.clone()}
                                    disabled={is_busy || snapshot.tab_id.is_none()}
                                >
                                    <span class="toggle-text">{snapshot.toggle_label()}</span>
                                </button>
                            </div>

                            <div class="current-domain-section">
                                <p class="current-domain">{snapshot.domain_label()}</p>
                                if let Some(label) = snapshot.whitelist_button_label() {
                                    <Button
                                        onclick={on_whitelist_toggle.clone()}
                                        disabled={is_busy}
                                        variant={if snapshot.whitelisted { ButtonVariant::Danger } else { ButtonVariant::Primary }}
                                        block={true}
                                    >
                                        {label}
                                    </Button>
                                }
                            </div>

                            <div class="whitelist-section">
                                <h2 class="whitelist-title">{"Whitelisted Domains"}</h2>
                                if snapshot.whitelist.is_empty() {
                                    <div class="empty-whitelist">{"No whitelisted domains yet"}</div>
                                } else {
                                    <div class="whitelist-list">
                                        {for snapshot.whitelist.iter().map(|domain| {
                                            let domain = domain.to_string();
                                            html! {
                                                <div key={domain.clone()} class="whitelist-item">
                                                    <span class="whitelist-domain">{&domain}</span>
                                                    <Button
                                                        onclick={on_remove_domain.reform({
                                                            let domain = domain.clone();
                                                            move |_| domain.clone()
                                                        })}
                                                        disabled={is_busy}
                                                        variant={ButtonVariant::Secondary}
                                                        size={ButtonSize::Small}
                                                    >
                                                        {"Remove"}
                                                    </Button>
                                                </div>
                                            }
                                        })}
                                    </div>
                                }
                            </div>
                        </>
                    }
                }
            }}

            <p class="footer-popup">
                {"Dark Toggle v0.1.0"}
            </p>
        </div>
    }
}
