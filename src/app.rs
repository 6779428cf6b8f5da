//! Root application module.
//!
//! Contains the main App component, AppContext definition, and
//! application-level setup logic following Leptos conventions.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use propchain_wallet::EventSubscription;
use propchain_wallet::browser::EthereumProvider;

use crate::components::AppRouter;
use crate::config::DEFAULT_FAVORITES;
use crate::utils::dom;
use crate::wallet::WalletHandle;

/// Which wallet dialog, if any, is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    /// No injected provider; offers the download page.
    InstallWallet,
    /// Provider present; lists the supported wallets.
    SelectWallet,
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos handles, which are
/// cheap to copy (they're just pointers to the underlying reactive state).
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Wallet connection state and actions.
    pub wallet: WalletHandle,

    /// Currently open wallet dialog.
    pub modal: RwSignal<Modal>,

    /// Favorited listing ids (in memory only).
    pub favorites: RwSignal<Vec<u32>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            wallet: WalletHandle::new(),
            modal: RwSignal::new(Modal::None),
            favorites: RwSignal::new(DEFAULT_FAVORITES.to_vec()),
        }
    }

    /// Entry point for every "Connect Wallet" button.
    ///
    /// Without an injected provider the install prompt opens instead of the
    /// wallet picker.
    pub fn request_connect(&self) {
        if self.wallet.is_provider_available() {
            self.modal.set(Modal::SelectWallet);
        } else {
            self.modal.set(Modal::InstallWallet);
        }
    }

    /// Called from the wallet picker.
    pub fn select_wallet(&self) {
        self.modal.set(Modal::None);
        let modal = self.modal;
        self.wallet.connect(move || {
            let _ = modal.try_set(Modal::InstallWallet);
        });
    }

    pub fn close_modal(&self) {
        self.modal.set(Modal::None);
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.with(|f| f.contains(&id))
    }

    pub fn toggle_favorite(&self, id: u32) {
        self.favorites.update(|f| {
            if let Some(pos) = f.iter().position(|&x| x == id) {
                f.remove(pos);
            } else {
                f.push(id);
            }
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Attaches wallet events and schedules session restore
/// - Detaches wallet events when the root is torn down
/// - Wraps the app in an ErrorBoundary for graceful error handling
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    let subscription: StoredValue<Option<EventSubscription<EthereumProvider>>, LocalStorage> =
        StoredValue::new_local(ctx.wallet.start());
    on_cleanup(move || {
        if let Some(sub) = subscription.try_update_value(Option::take).flatten() {
            sub.detach();
        }
    });

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #f7f8fa;
                    color: #1f2937;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="
                        max-width: 600px;
                        text-align: center;
                    ">
                        <h1 style="color: #dc2626; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #6b7280; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="
                            text-align: left;
                            background: #ffffff;
                            padding: 1rem;
                            border-radius: 8px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #6b7280;">
                                "Error details"
                            </summary>
                            <ul style="
                                margin: 1rem 0 0 0;
                                padding-left: 1.5rem;
                                color: #dc2626;
                                font-size: 0.9rem;
                            ">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button
                            on:click=move |_| dom::reload()
                            style="
                                background: #2563eb;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 8px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <AppRouter />
        </ErrorBoundary>
    }
}
