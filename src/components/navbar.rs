//! Navigation bar.
//!
//! Brand, page links and the wallet controls. The wallet area renders one
//! of three states: connected badge with disconnect, a connect button that
//! reads "Connecting..." while a request is pending, and inline error text.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::models::AppRoute;

stylance::import_crate_style!(css, "src/components/navbar.module.css");

const LINKS: [(AppRoute, &str); 4] = [
    (AppRoute::Home, "Home"),
    (AppRoute::Listings, "Listings"),
    (AppRoute::Favorites, "Favorites"),
    (AppRoute::Dashboard, "Dashboard"),
];

#[component]
pub fn Navbar(route: Memo<AppRoute>) -> impl IntoView {
    view! {
        <nav class=css::bar>
            <a class=css::brand href=AppRoute::Home.to_hash()>
                <Icon icon=ic::HOME />
                <span>{APP_NAME}</span>
            </a>

            <ul class=css::links>
                {LINKS
                    .into_iter()
                    .map(|(target, label)| {
                        let class = move || {
                            if route.get().highlights(target) { css::linkActive } else { css::link }
                        };
                        view! {
                            <li>
                                <a class=class href=target.to_hash()>{label}</a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <WalletControls />
        </nav>
    }
}

#[component]
fn WalletControls() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let wallet = ctx.wallet.state;

    let error = Signal::derive(move || wallet.with(|w| w.error().map(str::to_string)));
    let network = Signal::derive(move || {
        wallet.with(|w| w.network_name().unwrap_or("Unknown network").to_string())
    });

    view! {
        <div class=css::wallet>
            {move || error.get().map(|msg| view! { <span class=css::error>{msg}</span> })}

            <Show
                when=move || wallet.with(|w| w.is_connected())
                fallback=move || view! {
                    <button
                        class=css::connectButton
                        disabled=move || wallet.with(|w| w.is_connecting())
                        on:click=move |_| ctx.request_connect()
                    >
                        <Icon icon=ic::WALLET />
                        <span>{move || ctx.wallet.display_name()}</span>
                    </button>
                }
            >
                <span class=css::badge title=network>
                    <span class=css::dot></span>
                    {move || ctx.wallet.display_name()}
                </span>
                <button
                    class=css::disconnectButton
                    title="Disconnect"
                    on:click=move |_| ctx.wallet.disconnect()
                >
                    <Icon icon=ic::LOGOUT />
                    <span class=css::buttonLabel>"Disconnect"</span>
                </button>
            </Show>
        </div>
    }
}
