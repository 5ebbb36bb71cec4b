use serde::Deserialize as _;

use crate::error::ReportError;
use crate::model::ToolDetails;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CounterDiff {
    pub diffs: Diffs,
}

impl CounterDiff {
    /// Parses counter `name` of `tool` out of the raw tool details.
    pub fn lookup(details: &ToolDetails, tool: &str, name: &str) -> Result<Self, ReportError> {
        let value = details
            .get(name)
            .ok_or_else(|| ReportError::MissingCounter {
                tool: tool.to_string(),
                counter: name.to_string(),
            })?;
        CounterDiff::deserialize(value).map_err(|source| ReportError::InvalidCounter {
            source,
            tool: tool.to_string(),
            counter: name.to_string(),
        })
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Diffs {
    /// change between baseline and candidate, in percent
    pub diff_pct: Numeric,
    pub factor: Numeric,
}

impl Diffs {
    /// Returns `(diff_pct, factor)` as floats.
    pub fn values(&self, counter: &str) -> Result<(f64, f64), ReportError> {
        let diff_pct = to_f64(&self.diff_pct, counter, "diff_pct")?;
        let factor = to_f64(&self.factor, counter, "factor")?;
        Ok((diff_pct, factor))
    }
}

fn to_f64(value: &Numeric, counter: &str, field: &'static str) -> Result<f64, ReportError> {
    value.to_f64().map_err(|e| ReportError::Counter {
        source: Box::new(e),
        counter: counter.to_string(),
        field,
    })
}

/// A number that may arrive either as a JSON number or as a numeric string.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Numeric {
    Float(f64),
    Text(String),
}

impl Numeric {
    pub fn to_f64(&self) -> Result<f64, ReportError> {
        match self {
            Numeric::Float(f) => Ok(*f),
            Numeric::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ReportError::NotANumber(s.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_or_string() {
        let diffs: Diffs = serde_json::from_str(r#"{"diff_pct": 5, "factor": "1.05"}"#).unwrap();
        assert_eq!(diffs.diff_pct, Numeric::Float(5.0));
        assert_eq!(diffs.factor, Numeric::Text("1.05".into()));
        assert_eq!(diffs.values("Ir").unwrap(), (5.0, 1.05));
    }

    #[test]
    fn parses_like_a_float() {
        assert_eq!(Numeric::Text(" -3.25 ".into()).to_f64().unwrap(), -3.25);
        assert_eq!(Numeric::Text("1e3".into()).to_f64().unwrap(), 1000.0);
        assert!(Numeric::Text("inf".into()).to_f64().unwrap().is_infinite());
        assert!(Numeric::Text("nan".into()).to_f64().unwrap().is_nan());
    }

    #[test]
    fn not_a_number() {
        let err = Numeric::Text("fast".into()).to_f64().unwrap_err();
        assert!(matches!(err, ReportError::NotANumber(ref s) if s == "fast"));
    }

    #[test]
    fn names_the_failing_field() {
        let diffs: Diffs =
            serde_json::from_str(r#"{"diff_pct": "0", "factor": "n/a"}"#).unwrap();
        let err = diffs.values("Ir").unwrap_err();
        assert_eq!(err.to_string(), "counter \"Ir\": factor");
        match err {
            ReportError::Counter { source, .. } => {
                assert!(matches!(*source, ReportError::NotANumber(_)))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn lookup_counter() {
        let details: ToolDetails = serde_json::from_str(
            r#"{"Ir": {"diffs": {"diff_pct": -3.25, "factor": 0}}, "Dr": {"diffs": null}}"#,
        )
        .unwrap();

        let ir = CounterDiff::lookup(&details, "Callgrind", "Ir").unwrap();
        assert_eq!(ir.diffs.values("Ir").unwrap(), (-3.25, 0.0));

        let err = CounterDiff::lookup(&details, "Callgrind", "Dr").unwrap_err();
        assert!(matches!(err, ReportError::InvalidCounter { ref counter, .. } if counter == "Dr"));

        let err = CounterDiff::lookup(&details, "Callgrind", "Dw").unwrap_err();
        assert!(matches!(err, ReportError::MissingCounter { ref counter, .. } if counter == "Dw"));
    }

    #[test]
    fn missing_factor_rejected() {
        assert!(serde_json::from_str::<CounterDiff>(r#"{"diffs": {"diff_pct": "1"}}"#).is_err());
        assert!(serde_json::from_str::<CounterDiff>(r#"{"diff": {}}"#).is_err());
    }
}
