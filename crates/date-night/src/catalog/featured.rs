use super::domain::{Restaurant, RestaurantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Paid placement level. Ordered from the cheapest to the most prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeaturedTier {
    Premium,
    Gold,
    Platinum,
}

impl FeaturedTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Premium, Self::Gold, Self::Platinum]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ordered()
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for FeaturedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Placement metadata attached to a featured restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedListing {
    #[serde(alias = "featured_tier")]
    pub featured_tier: FeaturedTier,
    #[serde(alias = "featured_since")]
    pub featured_since: DateTime<Utc>,
    #[serde(alias = "featured_until")]
    pub featured_until: DateTime<Utc>,
    #[serde(alias = "cta_text")]
    pub cta_text: String,
    #[serde(alias = "cta_url")]
    pub cta_url: String,
    #[serde(default, alias = "special_offer", skip_serializing_if = "Option::is_none")]
    pub special_offer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default)]
    pub priority: u32,
}

impl FeaturedListing {
    /// A listing stays live until the instant `featured_until` is reached.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.featured_until > now
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    #[serde(flatten)]
    pub listing: FeaturedListing,
}

impl FeaturedRestaurant {
    pub fn id(&self) -> &RestaurantId {
        &self.restaurant.id
    }
}

/// Partial update; `None` leaves the current value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedUpdate {
    pub featured_tier: Option<FeaturedTier>,
    pub featured_until: Option<DateTime<Utc>>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub special_offer: Option<Option<String>>,
    pub badge: Option<Option<String>>,
    pub priority: Option<u32>,
}

impl FeaturedUpdate {
    fn apply(self, listing: &mut FeaturedListing) {
        if let Some(tier) = self.featured_tier {
            listing.featured_tier = tier;
        }
        if let Some(until) = self.featured_until {
            listing.featured_until = until;
        }
        if let Some(text) = self.cta_text {
            listing.cta_text = text;
        }
        if let Some(url) = self.cta_url {
            listing.cta_url = url;
        }
        if let Some(offer) = self.special_offer {
            listing.special_offer = offer;
        }
        if let Some(badge) = self.badge {
            listing.badge = badge;
        }
        if let Some(priority) = self.priority {
            listing.priority = priority;
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeaturedError {
    #[error("restaurant {0} is already featured")]
    Conflict(RestaurantId),
    #[error("restaurant {0} is not featured")]
    NotFound(RestaurantId),
}

/// Featured placements kept in priority order, highest first. Entries with
/// equal priority keep their insertion order.
///
/// Every mutation consumes the store and hands back the new state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedStore {
    entries: Vec<FeaturedRestaurant>,
}

impl FeaturedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from loaded entries. Later duplicates of an id are
    /// dropped with a warning.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = FeaturedRestaurant>,
    {
        entries.into_iter().fold(Self::new(), |store, entry| {
            let id = entry.id().clone();
            match store.clone().with_added(entry) {
                Ok(next) => next,
                Err(_) => {
                    tracing::warn!(id = %id, "skipping duplicate featured entry");
                    store
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FeaturedRestaurant] {
        &self.entries
    }

    pub fn get(&self, id: &RestaurantId) -> Option<&FeaturedRestaurant> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn with_added(mut self, entry: FeaturedRestaurant) -> Result<Self, FeaturedError> {
        if self.get(entry.id()).is_some() {
            return Err(FeaturedError::Conflict(entry.id().clone()));
        }
        self.entries.push(entry);
        self.sort();
        Ok(self)
    }

    pub fn without(mut self, id: &RestaurantId) -> Result<Self, FeaturedError> {
        let position = self
            .position(id)
            .ok_or_else(|| FeaturedError::NotFound(id.clone()))?;
        self.entries.remove(position);
        Ok(self)
    }

    pub fn with_update(
        mut self,
        id: &RestaurantId,
        update: FeaturedUpdate,
    ) -> Result<Self, FeaturedError> {
        let position = self
            .position(id)
            .ok_or_else(|| FeaturedError::NotFound(id.clone()))?;
        update.apply(&mut self.entries[position].listing);
        self.sort();
        Ok(self)
    }

    /// Unexpired entries in priority order, at most `limit` of them.
    pub fn active(&self, now: DateTime<Utc>, limit: usize) -> Vec<&FeaturedRestaurant> {
        self.entries
            .iter()
            .filter(|entry| entry.listing.is_active(now))
            .take(limit)
            .collect()
    }

    pub fn by_tier(&self, tier: FeaturedTier, now: DateTime<Utc>) -> Vec<&FeaturedRestaurant> {
        self.entries
            .iter()
            .filter(|entry| entry.listing.featured_tier == tier && entry.listing.is_active(now))
            .collect()
    }

    /// Names to keep out of random picks so paid placements are not shown twice.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.restaurant.name.clone())
            .collect()
    }

    fn position(&self, id: &RestaurantId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    fn sort(&mut self) {
        self.entries
            .sort_by(|left, right| right.listing.priority.cmp(&left.listing.priority));
    }
}
