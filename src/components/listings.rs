//! Property pages: home, grid, detail and favorites.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{APP_NAME, APP_TAGLINE, FEATURED_COUNT};
use crate::models::{AppRoute, Listing, format_price};

stylance::import_crate_style!(css, "src/components/listings.module.css");

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <section class=css::hero>
            <h1 class=css::heroTitle>{APP_NAME}</h1>
            <p class=css::heroTagline>{APP_TAGLINE}</p>
            <a class=css::heroLink href=AppRoute::Listings.to_hash()>"Browse all listings"</a>
        </section>

        <h2 class=css::sectionTitle>"Featured"</h2>
        <ListingGrid listings=Listing::featured(FEATURED_COUNT).collect() />
    }
}

#[component]
pub fn Listings() -> impl IntoView {
    view! {
        <h1 class=css::sectionTitle>"All listings"</h1>
        <ListingGrid listings=Listing::all().iter().collect() />
    }
}

#[component]
pub fn Favorites() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let favorites = Memo::new(move |_| {
        ctx.favorites
            .with(|ids| Listing::favorites(ids).collect::<Vec<_>>())
    });

    view! {
        <h1 class=css::sectionTitle>"Favorites"</h1>
        <Show
            when=move || favorites.with(|f| !f.is_empty())
            fallback=|| view! {
                <p class=css::empty>"No favorites yet. Tap the heart on a listing to save it."</p>
            }
        >
            {move || view! { <ListingGrid listings=favorites.get() /> }}
        </Show>
    }
}

#[component]
fn ListingGrid(listings: Vec<&'static Listing>) -> impl IntoView {
    view! {
        <div class=css::grid>
            {listings
                .into_iter()
                .map(|listing| view! { <ListingCard listing=listing /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn ListingCard(listing: &'static Listing) -> impl IntoView {
    view! {
        <article class=css::card>
            <a class=css::cardLink href=AppRoute::Property(listing.id).to_hash()>
                <img class=css::cardImage src=listing.image alt=listing.title loading="lazy" />
                <div class=css::cardBody>
                    <span class=css::price>{format_price(listing.price_usd)}</span>
                    <h3 class=css::cardTitle>{listing.title}</h3>
                    <span class=css::location>
                        <Icon icon=ic::LOCATION />
                        {listing.location}
                    </span>
                    <span class=css::facts>
                        {format!(
                            "{} bd · {} ba · {} sqft",
                            listing.beds, listing.baths, listing.area_sqft,
                        )}
                    </span>
                </div>
            </a>
            <FavoriteButton id=listing.id />
        </article>
    }
}

#[component]
fn FavoriteButton(id: u32) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let is_favorite = Memo::new(move |_| ctx.is_favorite(id));

    view! {
        <button
            class=css::favorite
            title=move || if is_favorite.get() { "Remove from favorites" } else { "Add to favorites" }
            on:click=move |_| ctx.toggle_favorite(id)
        >
            {move || if is_favorite.get() {
                view! { <Icon icon=ic::HEART_FILLED /> }.into_any()
            } else {
                view! { <Icon icon=ic::HEART /> }.into_any()
            }}
        </button>
    }
}

#[component]
pub fn PropertyDetail(id: u32) -> impl IntoView {
    let Some(listing) = Listing::find(id) else {
        return view! { <NotFound /> }.into_any();
    };

    view! {
        <article class=css::detail>
            <a class=css::back href=AppRoute::Listings.to_hash()>"← Back to listings"</a>
            <img class=css::detailImage src=listing.image alt=listing.title />
            <div class=css::detailHeader>
                <div>
                    <h1 class=css::detailTitle>{listing.title}</h1>
                    <span class=css::location>
                        <Icon icon=ic::LOCATION />
                        {listing.location}
                    </span>
                </div>
                <span class=css::detailPrice>{format_price(listing.price_usd)}</span>
            </div>
            <dl class=css::stats>
                <div><dt>"Bedrooms"</dt><dd>{listing.beds}</dd></div>
                <div><dt>"Bathrooms"</dt><dd>{listing.baths}</dd></div>
                <div><dt>"Area"</dt><dd>{format!("{} sqft", listing.area_sqft)}</dd></div>
            </dl>
            <p class=css::description>{listing.description}</p>
            <FavoriteButton id=listing.id />
        </article>
    }
    .into_any()
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <section class=css::notFound>
            <h1>"Not found"</h1>
            <p>"The page or property you are looking for does not exist."</p>
            <button class=css::heroLink on:click=move |_| AppRoute::Home.push()>"Go home"</button>
        </section>
    }
}
