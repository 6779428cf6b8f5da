//! Property listings.
//!
//! The catalog is compiled in; listings are presentational data only.

/// A property offered on the site.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub id: u32,
    pub title: &'static str,
    pub location: &'static str,
    pub price_usd: u64,
    pub beds: u8,
    pub baths: u8,
    pub area_sqft: u32,
    pub image: &'static str,
    pub description: &'static str,
    pub featured: bool,
}

static CATALOG: &[Listing] = &[
    Listing {
        id: 1,
        title: "Modern Downtown Loft",
        location: "Austin, TX",
        price_usd: 685_000,
        beds: 2,
        baths: 2,
        area_sqft: 1_350,
        image: "https://images.pexels.com/photos/1643383/pexels-photo-1643383.jpeg",
        description: "Open-plan loft with floor-to-ceiling windows and skyline views.",
        featured: true,
    },
    Listing {
        id: 2,
        title: "Suburban Family Home",
        location: "Plano, TX",
        price_usd: 540_000,
        beds: 4,
        baths: 3,
        area_sqft: 2_800,
        image: "https://images.pexels.com/photos/106399/pexels-photo-106399.jpeg",
        description: "Quiet cul-de-sac, large backyard, walking distance to schools.",
        featured: false,
    },
    Listing {
        id: 3,
        title: "Beachfront Villa",
        location: "Miami, FL",
        price_usd: 2_450_000,
        beds: 5,
        baths: 4,
        area_sqft: 4_100,
        image: "https://images.pexels.com/photos/1396122/pexels-photo-1396122.jpeg",
        description: "Direct beach access, infinity pool and private dock.",
        featured: true,
    },
    Listing {
        id: 4,
        title: "Mountain Cabin Retreat",
        location: "Boulder, CO",
        price_usd: 725_000,
        beds: 3,
        baths: 2,
        area_sqft: 1_900,
        image: "https://images.pexels.com/photos/1029599/pexels-photo-1029599.jpeg",
        description: "Timber-frame cabin on two acres with trail access.",
        featured: true,
    },
    Listing {
        id: 5,
        title: "Historic Brownstone",
        location: "Brooklyn, NY",
        price_usd: 1_895_000,
        beds: 4,
        baths: 3,
        area_sqft: 3_200,
        image: "https://images.pexels.com/photos/280229/pexels-photo-280229.jpeg",
        description: "Restored 1890s brownstone with original millwork and garden.",
        featured: false,
    },
    Listing {
        id: 6,
        title: "Lakeside Condo",
        location: "Chicago, IL",
        price_usd: 420_000,
        beds: 1,
        baths: 1,
        area_sqft: 850,
        image: "https://images.pexels.com/photos/2102587/pexels-photo-2102587.jpeg",
        description: "High-floor condo overlooking the lake, doorman building.",
        featured: false,
    },
];

impl Listing {
    /// All listings in display order.
    pub fn all() -> &'static [Listing] {
        CATALOG
    }

    pub fn find(id: u32) -> Option<&'static Listing> {
        CATALOG.iter().find(|l| l.id == id)
    }

    /// Featured listings for the home page, at most `limit`.
    pub fn featured(limit: usize) -> impl Iterator<Item = &'static Listing> {
        CATALOG.iter().filter(|l| l.featured).take(limit)
    }

    /// Listings whose id is in `ids`, in catalog order.
    pub fn favorites(ids: &[u32]) -> impl Iterator<Item = &'static Listing> + '_ {
        CATALOG.iter().filter(move |l| ids.contains(&l.id))
    }
}

/// Format a USD price with thousands separators (e.g., "$1,250,000").
pub fn format_price(usd: u64) -> String {
    let digits = usd.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
