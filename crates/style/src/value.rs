//! Defines the value a style property can hold.
use crate::length::Length;
use crate::parsers::{self, StyleParseError};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Length(Length),
    /// Two or four lengths, as written for `margin` or `page-size`.
    LengthSet(Vec<Length>),
    /// A keyword or string, e.g. `bold` or `Times New Roman`.
    Keyword(String),
    Bool(bool),
    /// Take the parent element's value for the same property.
    Inherit,
}

impl StyleValue {
    pub fn is_inherit(&self) -> bool {
        matches!(self, StyleValue::Inherit)
    }

    pub fn as_length(&self) -> Option<Length> {
        match self {
            StyleValue::Length(length) => Some(*length),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            StyleValue::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The lengths held by a `Length` or `LengthSet`, in order.
    pub fn lengths(&self) -> Option<Vec<Length>> {
        match self {
            StyleValue::Length(length) => Some(vec![*length]),
            StyleValue::LengthSet(lengths) => Some(lengths.clone()),
            _ => None,
        }
    }
}

impl From<Length> for StyleValue {
    fn from(length: Length) -> Self {
        StyleValue::Length(length)
    }
}

impl From<&str> for StyleValue {
    fn from(keyword: &str) -> Self {
        StyleValue::Keyword(keyword.to_string())
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Length(length) => write!(f, "{}", length),
            StyleValue::LengthSet(lengths) => {
                for (i, length) in lengths.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", length)?;
                }
                Ok(())
            }
            StyleValue::Keyword(keyword) => f.write_str(keyword),
            StyleValue::Bool(b) => write!(f, "{}", b),
            StyleValue::Inherit => f.write_str("inherit"),
        }
    }
}

impl FromStr for StyleValue {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_value(s)
    }
}

/// Booleans stay JSON booleans; everything else is written in style syntax.
impl Serialize for StyleValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            StyleValue::Bool(b) => serializer.serialize_bool(*b),
            other => serializer.collect_str(other),
        }
    }
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(StyleValue::Bool(b)),
            Raw::Text(text) => parsers::parse_value(&text).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::Unit;

    #[test]
    fn test_display() {
        let set = StyleValue::LengthSet(vec![Length::new(1.0, Unit::Cm), Length::new(2.0, Unit::Pt)]);
        assert_eq!(set.to_string(), "1cm 2pt");
        assert_eq!(StyleValue::Inherit.to_string(), "inherit");
        assert_eq!(StyleValue::from("bold").to_string(), "bold");
    }

    #[test]
    fn test_serde_json() {
        let values: Vec<StyleValue> =
            serde_json::from_str(r#"[true, "1cm", "1cm 2cm", "inherit", "Times New Roman"]"#).unwrap();
        assert_eq!(values[0], StyleValue::Bool(true));
        assert_eq!(values[1], StyleValue::Length(Length::new(1.0, Unit::Cm)));
        assert_eq!(values[2].lengths().map(|l| l.len()), Some(2));
        assert!(values[3].is_inherit());
        assert_eq!(values[4].as_keyword(), Some("Times New Roman"));

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[true,"1cm","1cm 2cm","inherit","Times New Roman"]"#);

        assert!(serde_json::from_str::<StyleValue>(r#""1cm 2cm 3cm""#).is_err());
        assert!(serde_json::from_str::<StyleValue>("12").is_err());
    }
}
