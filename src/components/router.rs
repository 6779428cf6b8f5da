//! Application router component.
//!
//! Handles URL-based routing with hash history.
//! Uses native hashchange events instead of leptos_router for true hash routing.
//!
//! - **URL hash is the source of truth**: the page is derived from `#/path`
//! - **Navbar and modals never re-render on navigation**
//! - **hashchange events**: Browser back/forward buttons work automatically

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::components::dashboard::Dashboard;
use crate::components::listings::{Favorites, Home, Listings, NotFound, PropertyDetail};
use crate::components::modals::WalletModals;
use crate::components::navbar::Navbar;
use crate::models::AppRoute;

stylance::import_crate_style!(css, "src/components/router.module.css");

/// Main application router.
///
/// - `#/` → Home (featured listings)
/// - `#/listings` → All listings
/// - `#/property/{id}` → Property detail
/// - `#/favorites` → Favorited listings
/// - `#/dashboard` → Wallet-gated dashboard
#[component]
pub fn AppRouter() -> impl IntoView {
    let route = RwSignal::new(AppRoute::current());

    // Set up hashchange event listener (runs once on mount)
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let closure = Closure::wrap(Box::new(move || {
            let _ = route.try_set(AppRoute::current());
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    let route_memo = Memo::new(move |_| route.get());

    view! {
        <div class=css::layout>
            <Navbar route=route_memo />
            <main class=css::content>
                {move || match route_memo.get() {
                    AppRoute::Home => view! { <Home /> }.into_any(),
                    AppRoute::Listings => view! { <Listings /> }.into_any(),
                    AppRoute::Property(id) => view! { <PropertyDetail id=id /> }.into_any(),
                    AppRoute::Favorites => view! { <Favorites /> }.into_any(),
                    AppRoute::Dashboard => view! { <Dashboard /> }.into_any(),
                    AppRoute::NotFound => view! { <NotFound /> }.into_any(),
                }}
            </main>
            <WalletModals />
        </div>
    }
}
