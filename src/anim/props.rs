//! Public props of an animated counter display

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DURATION_MS;
use crate::error::PropsError;

fn default_duration_ms() -> f64 {
    DEFAULT_DURATION_MS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterProps {
    /// Target value (required)
    pub value: u64,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Render 12345 as "12,345"
    #[serde(default)]
    pub group_thousands: bool,
}

impl CounterProps {
    pub fn new(value: u64) -> Self {
        Self {
            value,
            prefix: String::new(),
            suffix: String::new(),
            duration_ms: DEFAULT_DURATION_MS,
            group_thousands: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_grouping(mut self, group_thousands: bool) -> Self {
        self.group_thousands = group_thousands;
        self
    }

    /// Build props from `data-*` attribute values.
    ///
    /// The value accepts `,` and `_` separators. A missing or bad duration is
    /// not fatal: it falls back to `default_duration_ms`. Grouping is on for
    /// an empty `data-group` or `"true"` (any case), off otherwise.
    pub fn from_attrs(
        value: Option<&str>,
        prefix: Option<&str>,
        suffix: Option<&str>,
        duration: Option<&str>,
        group: Option<&str>,
        default_duration_ms: f64,
    ) -> Result<Self, PropsError> {
        let raw = value.map(str::trim).filter(|v| !v.is_empty());
        let raw = raw.ok_or(PropsError::MissingValue)?;
        let digits: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
        let value = digits
            .parse::<u64>()
            .map_err(|_| PropsError::InvalidValue(raw.to_string()))?;

        let mut props = Self::new(value)
            .with_prefix(prefix.unwrap_or_default())
            .with_suffix(suffix.unwrap_or_default())
            .with_grouping(group.is_some_and(parse_flag))
            .with_duration_ms(default_duration_ms);

        if let Some(d) = duration {
            match d.trim().parse::<f64>() {
                Ok(ms) if ms.is_finite() && ms > 0.0 => props.duration_ms = ms,
                _ => log::warn!("Ignoring invalid count-up duration {:?}", d),
            }
        }

        Ok(props)
    }

    /// Display text for `n`
    pub fn render(&self, n: u64) -> String {
        let number = if self.group_thousands {
            group_thousands(n)
        } else {
            n.to_string()
        };
        format!("{}{}{}", self.prefix, number, self.suffix)
    }
}

fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case("true")
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let props = CounterProps::new(5);
        assert_eq!(props.duration_ms, 1800.0);
        assert_eq!(props.render(5), "5");
    }

    #[test]
    fn test_render_affixes() {
        let props = CounterProps::new(99).with_prefix("$").with_suffix("k+");
        assert_eq!(props.render(0), "$0k+");
        assert_eq!(props.render(99), "$99k+");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_from_attrs() {
        let props =
            CounterProps::from_attrs(Some(" 1,000 "), Some("+"), None, Some("2500"), Some(""), 1800.0)
                .unwrap();
        assert_eq!(props.value, 1000);
        assert_eq!(props.prefix, "+");
        assert_eq!(props.suffix, "");
        assert_eq!(props.duration_ms, 2500.0);
        assert!(props.group_thousands);
    }

    #[test]
    fn test_from_attrs_bad_duration_falls_back() {
        let props =
            CounterProps::from_attrs(Some("10"), None, None, Some("-3"), None, DEFAULT_DURATION_MS)
                .unwrap();
        assert_eq!(props.duration_ms, DEFAULT_DURATION_MS);

        // Page-wide duration wins over the built-in default
        let props =
            CounterProps::from_attrs(Some("10"), None, None, Some("soon"), None, 2400.0).unwrap();
        assert_eq!(props.duration_ms, 2400.0);
        let props = CounterProps::from_attrs(Some("10"), None, None, None, None, 2400.0).unwrap();
        assert_eq!(props.duration_ms, 2400.0);
    }

    #[test]
    fn test_from_attrs_group_flag() {
        let grouped = |g: Option<&str>| {
            CounterProps::from_attrs(Some("1234"), None, None, None, g, DEFAULT_DURATION_MS)
                .unwrap()
                .render(1234)
        };
        assert_eq!(grouped(Some("")), "1,234");
        assert_eq!(grouped(Some("true")), "1,234");
        assert_eq!(grouped(Some(" TRUE ")), "1,234");
        for off in ["no", "0", "off", "False", "false"] {
            assert_eq!(grouped(Some(off)), "1234", "data-group={:?}", off);
        }
        assert_eq!(grouped(None), "1234");
    }

    #[test]
    fn test_from_attrs_errors() {
        assert_eq!(
            CounterProps::from_attrs(None, None, None, None, None, DEFAULT_DURATION_MS),
            Err(PropsError::MissingValue)
        );
        assert_eq!(
            CounterProps::from_attrs(Some("  "), None, None, None, None, DEFAULT_DURATION_MS),
            Err(PropsError::MissingValue)
        );
        assert_eq!(
            CounterProps::from_attrs(Some("-5"), None, None, None, None, DEFAULT_DURATION_MS),
            Err(PropsError::InvalidValue("-5".into()))
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let props: CounterProps = serde_json::from_str(r#"{"value": 12}"#).unwrap();
        assert_eq!(props, CounterProps::new(12));
    }
}
