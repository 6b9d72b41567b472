/// Easing system: bounce curves plus the growth animation built on them.
///
/// The easing scene scales its mesh by an eased progress value. Which curve
/// is used is chosen from the debug panel by name and reaches the vertex
/// stage as an integer id.

pub mod animation;
pub mod bounce;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Easing variant matching the panel's dropdown values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EasingVariant {
    #[default]
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl EasingVariant {
    /// Dropdown order; the position in this list is the uniform id.
    pub const ALL: [EasingVariant; 3] = [
        EasingVariant::EaseIn,
        EasingVariant::EaseOut,
        EasingVariant::EaseInOut,
    ];

    /// Parse from the panel name (`easeInBounce`, ...).
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "easeInBounce" => Ok(EasingVariant::EaseIn),
            "easeOutBounce" => Ok(EasingVariant::EaseOut),
            "easeInOutBounce" => Ok(EasingVariant::EaseInOut),
            _ => Err(Error::UnknownEasing(name.to_string())),
        }
    }

    /// Map a uniform id back to a variant.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            EasingVariant::EaseIn => "easeInBounce",
            EasingVariant::EaseOut => "easeOutBounce",
            EasingVariant::EaseInOut => "easeInOutBounce",
        }
    }

    /// Integer id as seen by the vertex stage.
    pub fn id(&self) -> u32 {
        match self {
            EasingVariant::EaseIn => 0,
            EasingVariant::EaseOut => 1,
            EasingVariant::EaseInOut => 2,
        }
    }

    /// Evaluate the curve. `x` must already be clamped to [0, 1].
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            EasingVariant::EaseIn => bounce::ease_in_bounce(x),
            EasingVariant::EaseOut => bounce::ease_out_bounce(x),
            EasingVariant::EaseInOut => bounce::ease_in_out_bounce(x),
        }
    }
}

impl TryFrom<String> for EasingVariant {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::from_name(&name)
    }
}

impl From<EasingVariant> for String {
    fn from(v: EasingVariant) -> Self {
        v.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_ids() {
        for v in EasingVariant::ALL {
            assert_eq!(EasingVariant::from_name(v.name()).unwrap(), v);
            assert_eq!(EasingVariant::from_id(v.id()), Some(v));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = EasingVariant::from_name("easeOutElastic").unwrap_err();
        assert!(matches!(err, Error::UnknownEasing(ref n) if n == "easeOutElastic"));
        assert_eq!(EasingVariant::from_id(3), None);
    }

    #[test]
    fn test_apply_dispatches_to_curve() {
        assert_eq!(EasingVariant::EaseOut.apply(0.4), bounce::ease_out_bounce(0.4));
        assert_eq!(EasingVariant::EaseIn.apply(0.4), bounce::ease_in_bounce(0.4));
        assert_eq!(EasingVariant::EaseInOut.apply(0.4), bounce::ease_in_out_bounce(0.4));
    }
}
