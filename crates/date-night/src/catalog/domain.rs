use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weekday name to free-text hours ("5:30 PM – 10:00 PM", "Closed").
pub type OpeningHours = BTreeMap<String, String>;

/// Identifier wrapper for catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub String);

impl RestaurantId {
    /// Synthetic identifier assigned by position when the source record has none.
    pub fn synthetic(index: usize) -> Self {
        Self(format!("restaurant-{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse geographic bucket a restaurant is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Area {
    #[serde(rename = "Beverly Hills")]
    BeverlyHills,
    #[serde(rename = "West Hollywood")]
    WestHollywood,
    #[serde(rename = "Santa Monica")]
    SantaMonica,
    #[serde(rename = "Venice")]
    Venice,
    #[serde(rename = "Los Angeles")]
    LosAngeles,
    #[serde(rename = "Hollywood")]
    Hollywood,
    #[serde(rename = "Silver Lake")]
    SilverLake,
    #[serde(rename = "Los Feliz")]
    LosFeliz,
    #[serde(rename = "Pasadena")]
    Pasadena,
    #[serde(rename = "Manhattan Beach")]
    ManhattanBeach,
    #[serde(rename = "Hermosa Beach")]
    HermosaBeach,
    #[serde(rename = "Redondo Beach")]
    RedondoBeach,
    #[serde(rename = "Malibu")]
    Malibu,
    #[serde(rename = "Downtown LA")]
    DowntownLa,
}

impl Area {
    /// Address scan order. The first label found in an address wins, so
    /// "West Hollywood" must precede "Hollywood".
    pub const fn ordered() -> [Self; 14] {
        [
            Self::BeverlyHills,
            Self::WestHollywood,
            Self::SantaMonica,
            Self::Venice,
            Self::LosAngeles,
            Self::Hollywood,
            Self::SilverLake,
            Self::LosFeliz,
            Self::Pasadena,
            Self::ManhattanBeach,
            Self::HermosaBeach,
            Self::RedondoBeach,
            Self::Malibu,
            Self::DowntownLa,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BeverlyHills => "Beverly Hills",
            Self::WestHollywood => "West Hollywood",
            Self::SantaMonica => "Santa Monica",
            Self::Venice => "Venice",
            Self::LosAngeles => "Los Angeles",
            Self::Hollywood => "Hollywood",
            Self::SilverLake => "Silver Lake",
            Self::LosFeliz => "Los Feliz",
            Self::Pasadena => "Pasadena",
            Self::ManhattanBeach => "Manhattan Beach",
            Self::HermosaBeach => "Hermosa Beach",
            Self::RedondoBeach => "Redondo Beach",
            Self::Malibu => "Malibu",
            Self::DowntownLa => "Downtown LA",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::BeverlyHills => "beverly-hills",
            Self::WestHollywood => "west-hollywood",
            Self::SantaMonica => "santa-monica",
            Self::Venice => "venice",
            Self::LosAngeles => "los-angeles",
            Self::Hollywood => "hollywood",
            Self::SilverLake => "silver-lake",
            Self::LosFeliz => "los-feliz",
            Self::Pasadena => "pasadena",
            Self::ManhattanBeach => "manhattan-beach",
            Self::HermosaBeach => "hermosa-beach",
            Self::RedondoBeach => "redondo-beach",
            Self::Malibu => "malibu",
            Self::DowntownLa => "downtown-la",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::BeverlyHills => "Luxury dining in the heart of Beverly Hills. Home to some of LA's most prestigious and romantic restaurants.",
            Self::WestHollywood => "Trendy and vibrant dining scene in West Hollywood. Perfect for couples who love contemporary cuisine and nightlife.",
            Self::SantaMonica => "Oceanfront dining with stunning sunset views. Santa Monica offers romantic beachside restaurants and trendy eateries.",
            Self::Venice => "Bohemian charm meets culinary excellence. Venice offers unique dining experiences with a laid-back, artistic vibe.",
            Self::DowntownLa | Self::LosAngeles => "Urban sophistication in the heart of LA. Downtown offers rooftop dining, modern cuisine, and vibrant nightlife.",
            Self::Hollywood => "Glitz and glamour meet fine dining. Hollywood offers celebrity-favorite restaurants and iconic dining experiences.",
            Self::SilverLake => "Hip and trendy dining scene. Silver Lake offers innovative cuisine, craft cocktails, and intimate date night spots.",
            Self::LosFeliz => "Charming neighborhood with eclectic dining. Los Feliz offers cozy restaurants, wine bars, and romantic hideaways.",
            Self::ManhattanBeach => "Beachside elegance and fresh seafood. Manhattan Beach offers oceanfront dining with stunning sunset views.",
            Self::Pasadena | Self::HermosaBeach | Self::RedondoBeach | Self::Malibu => {
                "Romantic date night restaurants across this corner of Los Angeles."
            }
        }
    }

    /// Accepts either the display label or the slug, ignoring case.
    pub fn from_label(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ordered().into_iter().find(|area| {
            area.label().eq_ignore_ascii_case(needle) || area.slug().eq_ignore_ascii_case(needle)
        })
    }
}

impl Default for Area {
    fn default() -> Self {
        Self::LosAngeles
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed view of a cuisine tag. Tags the directory has no entry for map to
/// `Other` and get the generic copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuisineCategory {
    FineDining,
    Italian,
    French,
    Japanese,
    Mediterranean,
    Steakhouse,
    Seafood,
    Californian,
    Contemporary,
    WineBar,
    Rooftop,
    Mexican,
    Thai,
    Other,
}

impl CuisineCategory {
    pub const fn ordered() -> [Self; 14] {
        [
            Self::FineDining,
            Self::Italian,
            Self::French,
            Self::Japanese,
            Self::Mediterranean,
            Self::Steakhouse,
            Self::Seafood,
            Self::Californian,
            Self::Contemporary,
            Self::WineBar,
            Self::Rooftop,
            Self::Mexican,
            Self::Thai,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FineDining => "Fine Dining",
            Self::Italian => "Italian",
            Self::French => "French",
            Self::Japanese => "Japanese",
            Self::Mediterranean => "Mediterranean",
            Self::Steakhouse => "Steakhouse",
            Self::Seafood => "Seafood",
            Self::Californian => "Californian",
            Self::Contemporary => "Contemporary",
            Self::WineBar => "Wine Bar",
            Self::Rooftop => "Rooftop",
            Self::Mexican => "Mexican",
            Self::Thai => "Thai",
            Self::Other => "Other",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::FineDining => "fine-dining",
            Self::Italian => "italian",
            Self::French => "french",
            Self::Japanese => "japanese",
            Self::Mediterranean => "mediterranean",
            Self::Steakhouse => "steakhouse",
            Self::Seafood => "seafood",
            Self::Californian => "californian",
            Self::Contemporary => "contemporary",
            Self::WineBar => "wine-bar",
            Self::Rooftop => "rooftop",
            Self::Mexican => "mexican",
            Self::Thai => "thai",
            Self::Other => "other",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::FineDining => "Upscale restaurants offering exceptional cuisine, service, and ambiance perfect for special occasions and romantic date nights.",
            Self::Italian => "Authentic Italian cuisine featuring pasta, pizza, and regional specialties in romantic settings.",
            Self::French => "Classic French cuisine with elegant presentations and sophisticated flavors perfect for romantic dinners.",
            Self::Japanese => "Authentic Japanese cuisine including sushi, sashimi, and traditional dishes in intimate settings.",
            Self::Seafood => "Fresh seafood restaurants featuring ocean-to-table dining with stunning views and romantic ambiance.",
            Self::Californian => "Farm-to-table Californian cuisine featuring fresh, local ingredients and innovative preparations.",
            Self::WineBar => "Intimate wine bars offering curated selections, small plates, and romantic ambiance.",
            Self::Steakhouse => "Premium steakhouses with dry-aged cuts, classic cocktails, and a polished room for special occasions.",
            Self::Rooftop => "Elevated dining with city views, ideal for sunset dinners.",
            Self::Mediterranean
            | Self::Contemporary
            | Self::Mexican
            | Self::Thai
            | Self::Other => "Distinctive restaurants with a memorable menu and an atmosphere suited to date night.",
        }
    }
}

impl fmt::Display for CuisineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Guest review as carried by the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helpful: Option<u32>,
}

/// Typed record produced by the legacy adapter. Text-derived fields (area,
/// zip, cuisine categories) are already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRestaurant {
    pub id: Option<RestaurantId>,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: f64,
    pub price_level: u8,
    pub cuisine_types: Vec<String>,
    pub cuisines: Vec<CuisineCategory>,
    pub opening_hours: OpeningHours,
    pub reviews: Vec<Review>,
    pub photos: Vec<String>,
    pub place_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub area: Area,
    pub zip_code: String,
}

impl RawRestaurant {
    /// Exact tag match; `rooftop` is not `rooftop_restaurant`.
    pub fn has_cuisine_tag(&self, tag: &str) -> bool {
        self.cuisine_types.iter().any(|candidate| candidate == tag)
    }
}

/// Enriched record consumed by views and the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub slug: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub rating: f64,
    pub price_level: u8,
    pub cuisine_types: Vec<String>,
    pub cuisines: Vec<CuisineCategory>,
    pub opening_hours: OpeningHours,
    pub reviews: Vec<Review>,
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub date_night_score: u8,
    pub city: String,
    pub area: Area,
    pub neighborhood: Area,
    pub zip_code: String,
    pub description: String,
    pub amenities: Vec<String>,
    pub special_features: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl Restaurant {
    pub fn has_cuisine_tag(&self, tag: &str) -> bool {
        self.cuisine_types.iter().any(|candidate| candidate == tag)
    }

    pub fn price_label(&self) -> String {
        "$".repeat(self.price_level as usize)
    }
}
