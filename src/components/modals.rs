//! Wallet dialogs.
//!
//! Both dialogs render from [`AppContext::modal`] so only one is ever open.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{AppContext, Modal};
use crate::components::icons as ic;
use crate::config::{WALLET_DOWNLOAD_URL, WALLET_NAME};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/modals.module.css");

#[component]
pub fn WalletModals() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    move || match ctx.modal.get() {
        Modal::None => ().into_any(),
        Modal::InstallWallet => view! { <InstallWalletModal /> }.into_any(),
        Modal::SelectWallet => view! { <WalletSelectionModal /> }.into_any(),
    }
}

/// Backdrop and card shared by both dialogs. Clicking the backdrop closes.
#[component]
fn ModalFrame(title: &'static str, children: Children) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    view! {
        <div class=css::backdrop on:click=move |_| ctx.close_modal()>
            <div
                class=css::card
                role="dialog"
                aria-modal="true"
                on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
            >
                <header class=css::header>
                    <h2 class=css::title>{title}</h2>
                    <button class=css::close title="Close" on:click=move |_| ctx.close_modal()>
                        <Icon icon=ic::CLOSE />
                    </button>
                </header>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn InstallWalletModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let install = move |_: leptos::ev::MouseEvent| {
        if !dom::open_in_new_tab(WALLET_DOWNLOAD_URL) {
            log::warn!("could not open {}", WALLET_DOWNLOAD_URL);
        }
        ctx.close_modal();
    };

    view! {
        <ModalFrame title="Wallet not found">
            <p class=css::body>
                {format!(
                    "{} is not installed. Please install {} to continue.",
                    WALLET_NAME, WALLET_NAME,
                )}
            </p>
            <p class=css::hint>
                "After installing, reload this page so the extension can connect."
            </p>
            <div class=css::actions>
                <button class=css::secondary on:click=move |_| ctx.close_modal()>"Cancel"</button>
                <button class=css::primary on:click=install>
                    <Icon icon=ic::DOWNLOAD />
                    <span>{format!("Install {}", WALLET_NAME)}</span>
                    <Icon icon=ic::EXTERNAL_LINK />
                </button>
            </div>
        </ModalFrame>
    }
}

#[component]
fn WalletSelectionModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    view! {
        <ModalFrame title="Connect a wallet">
            <p class=css::body>"Choose how you want to connect."</p>
            <ul class=css::options>
                <li>
                    <button class=css::option on:click=move |_| ctx.select_wallet()>
                        <Icon icon=ic::WALLET />
                        <span class=css::optionName>{WALLET_NAME}</span>
                        <span class=css::optionTag>"Browser extension"</span>
                    </button>
                </li>
            </ul>
        </ModalFrame>
    }
}
