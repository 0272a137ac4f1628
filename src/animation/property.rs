use std::collections::BTreeMap;

use crate::foundation::error::{FolioError, FolioResult};

/// Visual properties a step can drive. Values are plain numbers in the unit the
/// host expects (px, degrees, or a unitless factor).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    X,
    Y,
    /// Horizontal offset as a percentage of the element's own width.
    XPercent,
    Opacity,
    Scale,
    ScaleY,
    Rotation,
    RotateX,
    RotateY,
    /// `filter: blur(Npx)`.
    Blur,
    /// Right inset of `clip-path: inset(0 N% 0 0)`.
    ClipRight,
    /// Height as a percentage of the parent.
    Height,
}

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Ordered property → value map. Ordering keeps output stable for snapshots.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PropertyState(BTreeMap<Property, f64>);

impl PropertyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prop: Property, value: f64) -> Self {
        self.0.insert(prop, value);
        self
    }

    pub fn set(&mut self, prop: Property, value: f64) {
        self.0.insert(prop, value);
    }

    pub fn get(&self, prop: Property) -> Option<f64> {
        self.0.get(&prop).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.keys().copied()
    }

    pub fn same_keys(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.keys().zip(other.0.keys()).all(|(a, b)| a == b)
    }

    /// Overwrite this state's values with `other`'s, keeping keys not present in `other`.
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in other.iter() {
            self.0.insert(k, v);
        }
    }

    pub fn validate(&self) -> FolioResult<()> {
        if let Some((prop, v)) = self.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FolioError::configuration(format!(
                "property {prop:?} has non-finite value {v}"
            )));
        }
        Ok(())
    }
}

impl FromIterator<(Property, f64)> for PropertyState {
    fn from_iter<I: IntoIterator<Item = (Property, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Lerp for PropertyState {
    /// Keys missing from `b` hold `a`'s value.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.iter()
            .map(|(k, av)| {
                let v = match b.get(k) {
                    Some(bv) => f64::lerp(&av, &bv, t),
                    None => av,
                };
                (k, v)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/property.rs"]
mod tests;
