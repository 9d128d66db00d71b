use crate::error::{PetError, Result};
use rand::Rng;
use rand::distributions::{Distribution, Standard};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, opaque identifier of a pet owner.
///
/// Any non-empty trimmed string is accepted. Control characters are
/// rejected because they cannot survive a CSV round trip or a log line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fid(String);

impl Fid {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PetError::MissingIdentifier);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(PetError::InvalidIdentifier(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Validates an optional raw request parameter.
    pub fn from_param(raw: Option<&str>) -> Result<Self> {
        match raw {
            Some(value) => Self::new(value),
            None => Err(PetError::MissingIdentifier),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cosmetic look of a pet, drawn once when the pet is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetVariant {
    Cat,
    Dog,
    Fox,
    Owl,
    Dragon,
}

impl PetVariant {
    pub const ALL: [PetVariant; 5] = [
        PetVariant::Cat,
        PetVariant::Dog,
        PetVariant::Fox,
        PetVariant::Owl,
        PetVariant::Dragon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetVariant::Cat => "cat",
            PetVariant::Dog => "dog",
            PetVariant::Fox => "fox",
            PetVariant::Owl => "owl",
            PetVariant::Dragon => "dragon",
        }
    }
}

impl Distribution<PetVariant> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PetVariant {
        PetVariant::ALL[rng.gen_range(0..PetVariant::ALL.len())]
    }
}

/// Inclusive range every hunger and happiness value is saturated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBounds {
    pub min: u8,
    pub max: u8,
}

impl Default for StatBounds {
    fn default() -> Self {
        Self { min: 0, max: 10 }
    }
}

impl StatBounds {
    pub fn clamp(&self, value: i64) -> u8 {
        // min/max are u8, so the clamped value always fits
        value.clamp(i64::from(self.min), i64::from(self.max)) as u8
    }

    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Full snapshot of one pet.
///
/// Both `last_notified` and `variant` are always part of the schema. Older
/// rows that never tracked one of them load as `None`: a pet without
/// `last_notified` never triggers attention notifications, and a pet without
/// `variant` keeps rendering without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub fid: Fid,
    pub hunger: u8,
    pub happiness: u8,
    pub coins: u64,
    /// Epoch milliseconds of the last attention notification.
    #[serde(rename = "lastNotified", default)]
    pub last_notified: Option<i64>,
    #[serde(default)]
    pub variant: Option<PetVariant>,
}

impl PetState {
    /// Creates a pet with the stock defaults: hunger 5, happiness 5, no coins
    /// and a cooldown timer that has never fired.
    pub fn new(fid: Fid, variant: PetVariant) -> Self {
        Self {
            fid,
            hunger: 5,
            happiness: 5,
            coins: 0,
            last_notified: Some(0),
            variant: Some(variant),
        }
    }

    pub fn with_stats(mut self, hunger: u8, happiness: u8, coins: u64) -> Self {
        self.hunger = hunger;
        self.happiness = happiness;
        self.coins = coins;
        self
    }

    /// Whether this snapshot carries a notification cooldown timer.
    pub fn tracks_notifications(&self) -> bool {
        self.last_notified.is_some()
    }
}

/// A snapshot together with the store's version token for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn new(version: u64, value: T) -> Self {
        Self { version, value }
    }
}
