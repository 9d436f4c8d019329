// crates/plastic-core/src/length.rs
use serde::{Deserialize, Serialize};

use crate::PlasticError;

/// A length declared on a node description.
///
/// Scene files accept the tagged form (`{ "percent": 0.5 }`), a bare number
/// in design units, or a string understood by [`Length::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "LengthRepr")]
pub enum Length {
    /// Design units, multiplied by the container multiplier
    Fixed(f32),
    /// Output units, never multiplied
    Device(f32),
    /// Fraction of the parent extent along the same axis (0.0 to 1.0)
    Percent(f32),
}

impl Length {
    /// Parses "50%", "12px" (device) or "400" / "400pt" (design units).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        if let Some(pct) = value.strip_suffix('%') {
            return pct.trim().parse::<f32>().ok().map(|p| Length::Percent(p / 100.0));
        }

        if let Some(px) = value.strip_suffix("px") {
            return px.trim().parse::<f32>().ok().map(Length::Device);
        }

        let value = value.strip_suffix("pt").unwrap_or(value);
        value.trim().parse::<f32>().ok().map(Length::Fixed)
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Length::Fixed(v) | Length::Device(v) | Length::Percent(v) => v.is_finite(),
        }
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Length::Fixed(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f32),
    Text(String),
    Tagged(TaggedLength),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaggedLength {
    Fixed(f32),
    Device(f32),
    Percent(f32),
}

impl TryFrom<LengthRepr> for Length {
    type Error = PlasticError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(v) => Ok(Length::Fixed(v)),
            LengthRepr::Text(text) => {
                Length::parse(&text).ok_or_else(|| PlasticError::Scene(format!("invalid length {:?}", text)))
            }
            LengthRepr::Tagged(TaggedLength::Fixed(v)) => Ok(Length::Fixed(v)),
            LengthRepr::Tagged(TaggedLength::Device(v)) => Ok(Length::Device(v)),
            LengthRepr::Tagged(TaggedLength::Percent(v)) => Ok(Length::Percent(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_parsing() {
        assert_eq!(Length::parse("50%"), Some(Length::Percent(0.5)));
        assert_eq!(Length::parse("12px"), Some(Length::Device(12.0)));
        assert_eq!(Length::parse("400"), Some(Length::Fixed(400.0)));
        assert_eq!(Length::parse(" 8pt "), Some(Length::Fixed(8.0)));
        assert_eq!(Length::parse("auto"), None);
    }

    #[test]
    fn test_length_deserialization_forms() {
        let lengths: Vec<Length> =
            serde_json::from_str(r#"[ { "percent": 0.25 }, { "device": 3 }, 40, "50%", "12px", "8pt" ]"#).unwrap();

        assert_eq!(
            lengths,
            vec![
                Length::Percent(0.25),
                Length::Device(3.0),
                Length::Fixed(40.0),
                Length::Percent(0.5),
                Length::Device(12.0),
                Length::Fixed(8.0),
            ]
        );
        assert!(serde_json::from_str::<Length>("\"auto\"").is_err());
        assert!(serde_json::from_str::<Length>(r#"{ "em": 2 }"#).is_err());
    }

    #[test]
    fn test_serialization_stays_tagged() {
        assert_eq!(serde_json::to_string(&Length::Percent(0.5)).unwrap(), r#"{"percent":0.5}"#);
        let again: Length = serde_json::from_str(&serde_json::to_string(&Length::Device(7.0)).unwrap()).unwrap();
        assert_eq!(again, Length::Device(7.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Length::Percent(1.0).is_finite());
        assert!(!Length::Fixed(f32::NAN).is_finite());
        assert!(!Length::Device(f32::INFINITY).is_finite());
    }
}
