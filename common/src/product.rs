use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tracking::TrackingStep;

/// Unique product identifier, used as the primary key and in URLs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// Seeded metadata may carry numeric ids; normalise them to their string form.
impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ProductId(s),
            RawId::Unsigned(n) => ProductId(n.to_string()),
            RawId::Signed(n) => ProductId(n.to_string()),
        })
    }
}

/// Classifier verdict shown as the "verified" badge.
///
/// Anything other than `Authentic` is displayed as pending, but the source
/// label is kept so it round-trips on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PredictedStatus {
    Authentic,
    Pending(String),
}

impl PredictedStatus {
    pub const AUTHENTIC: &'static str = "Authentic";

    pub fn is_authentic(&self) -> bool {
        matches!(self, PredictedStatus::Authentic)
    }

    pub fn label(&self) -> &str {
        match self {
            PredictedStatus::Authentic => Self::AUTHENTIC,
            PredictedStatus::Pending(label) => label,
        }
    }
}

impl From<String> for PredictedStatus {
    fn from(label: String) -> Self {
        if label == Self::AUTHENTIC {
            PredictedStatus::Authentic
        } else {
            PredictedStatus::Pending(label)
        }
    }
}

impl Serialize for PredictedStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PredictedStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(PredictedStatus::from)
    }
}

/// A catalogue entry. Everything except `tracking_history` is reference data
/// seeded out of band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    /// Price in a currency-agnostic unit.
    pub price: f64,
    pub year: i32,
    #[serde(default)]
    pub meta_hash: String,
    #[serde(default)]
    pub pid_hash: String,
    #[serde(default)]
    pub short_hash: String,
    pub predicted_status: PredictedStatus,
    /// Classifier confidence in [0, 1].
    pub pred_proba: f64,
    #[serde(default)]
    pub qr_file: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub image_file: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tracking_history: Vec<TrackingStep>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TrackingStep>, D::Error> {
    Ok(Option::<Vec<TrackingStep>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a seeded record cannot be served.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidProduct {
    #[error("pred_proba {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
    #[error("price {0} is negative or not finite")]
    BadPrice(f64),
    #[error("empty product id")]
    EmptyId,
}

impl Product {
    /// Check the data-integrity invariants the service must never violate.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if self.id.0.is_empty() {
            return Err(InvalidProduct::EmptyId);
        }
        if !(0.0..=1.0).contains(&self.pred_proba) {
            return Err(InvalidProduct::ConfidenceOutOfRange(self.pred_proba));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(InvalidProduct::BadPrice(self.price));
        }
        Ok(())
    }

    pub fn is_authentic(&self) -> bool {
        self.predicted_status.is_authentic()
    }

    /// Case-insensitive substring match against name and id.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.id.0.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
pub(crate) fn sample_product(id: &str, name: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        color: "Blue".into(),
        price: 799.0,
        year: 2025,
        meta_hash: "0xabc".into(),
        pid_hash: "0xdef0123456".into(),
        short_hash: "0xdef01234".into(),
        predicted_status: PredictedStatus::Authentic,
        pred_proba: 0.82,
        qr_file: None,
        tracking_url: None,
        image_file: None,
        tracking_history: Vec::new(),
    }
}
