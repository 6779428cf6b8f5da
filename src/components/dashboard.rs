//! Wallet-gated dashboard.

use leptos::prelude::*;
use leptos_icons::Icon;
use propchain_wallet::format_chain_id;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::AppRoute;

stylance::import_crate_style!(css, "src/components/dashboard.module.css");

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let wallet = ctx.wallet.state;

    view! {
        <h1 class=css::title>
            <Icon icon=ic::DASHBOARD />
            <span>"Dashboard"</span>
        </h1>
        <Show
            when=move || wallet.with(|w| w.is_connected())
            fallback=move || view! { <ConnectPrompt /> }
        >
            <AccountOverview />
        </Show>
    }
}

/// Shown to visitors without a connected wallet.
#[component]
fn ConnectPrompt() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let wallet = ctx.wallet.state;

    view! {
        <section class=css::prompt>
            <Icon icon=ic::WALLET />
            <h2>"Connect your wallet"</h2>
            <p>"The dashboard is available once a wallet is connected."</p>
            <button
                class=css::connectButton
                disabled=move || wallet.with(|w| w.is_connecting())
                on:click=move |_| ctx.request_connect()
            >
                {move || ctx.wallet.display_name()}
            </button>
        </section>
    }
}

#[component]
fn AccountOverview() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let wallet = ctx.wallet.state;

    let address = Signal::derive(move || {
        wallet.with(|w| w.address().map(|a| a.checksummed()).unwrap_or_default())
    });
    let network = Signal::derive(move || {
        wallet.with(|w| match w.chain_id() {
            Some(id) => format!(
                "{} ({})",
                w.network_name().unwrap_or("Unknown"),
                format_chain_id(id)
            ),
            None => "Unknown".to_string(),
        })
    });
    let favorites = Signal::derive(move || ctx.favorites.with(Vec::len));

    // Re-evaluated on every transition, which is when a failed write happens
    let degraded = move || wallet.with(|_| ctx.wallet.is_persistence_degraded());

    view! {
        <Show when=degraded>
            <p class=css::notice>
                "Browser storage is unavailable. Your connection will not be remembered after reload."
            </p>
        </Show>
        <div class=css::cards>
            <section class=css::card>
                <span class=css::label>
                    <Icon icon=ic::WALLET />
                    "Account"
                </span>
                <code class=css::address>{address}</code>
            </section>
            <section class=css::card>
                <span class=css::label>
                    <Icon icon=ic::NETWORK />
                    "Network"
                </span>
                <span class=css::value>{network}</span>
            </section>
            <section class=css::card>
                <span class=css::label>
                    <Icon icon=ic::HEART />
                    "Saved properties"
                </span>
                <a class=css::value href=AppRoute::Favorites.to_hash()>{favorites}</a>
            </section>
        </div>
    }
}
