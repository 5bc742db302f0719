//! JSON encoding for values that serde_json has no native form for.
//!
//! Backend configuration and calibration data carry timestamps and complex
//! numbers. Use the adapters on struct fields:
//!
//! ```
//! use chrono::NaiveDateTime;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Calibration {
//!     #[serde(with = "qutils::encode::datetime")]
//!     date: NaiveDateTime,
//!     value: f64,
//! }
//! ```
//!
//! or build a `BackendValue` tree for free-form property documents.

use crate::render::format_float;
use chrono::NaiveDateTime;
use num_complex::Complex64;
use serde::Serialize;
use std::collections::BTreeMap;

/// `%Y-%m-%d %H:%M:%S`, no timezone.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub mod datetime {
    use super::DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).map_err(de::Error::custom)
    }
}

pub mod complex {
    use super::format_complex;
    use num_complex::Complex64;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(c: &Complex64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_complex(c))
    }
}

/// `1.0+2.0j`, `0.5-0.25j`.
pub fn format_complex(c: &Complex64) -> String {
    let sign = if c.im.is_sign_negative() { "" } else { "+" };
    format!("{}{}{}j", format_float(c.re), sign, format_float(c.im))
}

/// Free-form backend property tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BackendValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(#[serde(with = "datetime")] NaiveDateTime),
    Complex(#[serde(with = "complex")] Complex64),
    List(Vec<BackendValue>),
    Map(BTreeMap<String, BackendValue>),
}

/// Convert a property tree into plain JSON.
pub fn encode_backend_value(value: &BackendValue) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, 4)
            .unwrap()
            .and_hms_opt(5, 6, 7)
            .unwrap()
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Calibration {
        #[serde(with = "datetime")]
        date: NaiveDateTime,
        value: f64,
    }

    #[test]
    fn datetime_field_round_trips() {
        let cal = Calibration {
            date: stamp(),
            value: 0.01,
        };
        let v = serde_json::to_value(&cal).unwrap();
        assert_eq!(v, json!({"date": "2021-03-04 05:06:07", "value": 0.01}));
        assert_eq!(serde_json::from_value::<Calibration>(v).unwrap(), cal);
    }

    #[test]
    fn complex_text() {
        assert_eq!(format_complex(&Complex64::new(1.0, 2.0)), "1.0+2.0j");
        assert_eq!(format_complex(&Complex64::new(0.5, -0.25)), "0.5-0.25j");
    }

    #[test]
    fn property_tree() {
        let tree = BackendValue::Map(BTreeMap::from([
            ("last_update".to_string(), BackendValue::Date(stamp())),
            (
                "u_channel_lo".to_string(),
                BackendValue::List(vec![BackendValue::Complex(Complex64::new(1.0, 0.0))]),
            ),
            ("simulator".to_string(), BackendValue::Bool(false)),
            ("credits".to_string(), BackendValue::Null),
        ]));

        assert_eq!(
            encode_backend_value(&tree).unwrap(),
            json!({
                "credits": null,
                "last_update": "2021-03-04 05:06:07",
                "simulator": false,
                "u_channel_lo": ["1.0+0.0j"]
            })
        );
    }
}
