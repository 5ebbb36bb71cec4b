//! Counter ordering per tool
//!
//! Some tools have a curated counter order that groups related counters
//! (e.g., Callgrind's instruction count, followed by cache hits, followed by
//! the cycle estimate). Tools without an entry get their counters sorted by
//! name.

use std::str::FromStr;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::error::ReportError;
use crate::model::ToolDetails;

const CALLGRIND: &[&str] = &[
    "Ir",
    "L1hits",
    "LLhits",
    "RamHits",
    "TotalRW",
    "EstimatedCycles",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CounterOrder {
    tools: IndexMap<String, Vec<String>>,
}

impl Default for CounterOrder {
    fn default() -> Self {
        let mut order = CounterOrder::empty();
        order.insert("Callgrind", CALLGRIND.iter().map(|s| s.to_string()));
        order
    }
}

impl CounterOrder {
    pub fn empty() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Adds or replaces the counter order for `tool`.
    pub fn insert<S, I>(&mut self, tool: S, counters: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = String>,
    {
        self.tools
            .insert(tool.into(), counters.into_iter().collect());
    }

    pub fn get(&self, tool: &str) -> Option<&[String]> {
        self.tools.get(tool).map(Vec::as_slice)
    }

    /// Returns the counters to render for `tool`, in order.
    ///
    /// For registered tools this is the registered list, whether or not the
    /// counters are present in `details`. Otherwise it is every counter in
    /// `details`, sorted.
    pub fn counters_for<'a>(&'a self, tool: &str, details: &'a ToolDetails) -> Vec<&'a str> {
        match self.get(tool) {
            Some(counters) => counters.iter().map(String::as_str).collect(),
            None => details.keys().map(String::as_str).sorted().collect(),
        }
    }
}

impl Extend<ToolOrder> for CounterOrder {
    fn extend<T: IntoIterator<Item = ToolOrder>>(&mut self, iter: T) {
        for ToolOrder { tool, counters } in iter {
            self.insert(tool, counters);
        }
    }
}

/// A single `TOOL=COUNTER,COUNTER,...` override, as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOrder {
    pub tool: String,
    pub counters: Vec<String>,
}

impl FromStr for ToolOrder {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::InvalidOrder(s.to_string());

        let (tool, counters) = s.split_once('=').ok_or_else(invalid)?;
        let tool = tool.trim();
        let counters = counters
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect_vec();

        if tool.is_empty() || counters.is_empty() {
            return Err(invalid());
        }

        Ok(ToolOrder {
            tool: tool.to_string(),
            counters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details(names: &[&str]) -> ToolDetails {
        names
            .iter()
            .map(|n| (n.to_string(), json!({"diffs": {"diff_pct": "0", "factor": "1"}})))
            .collect()
    }

    #[test]
    fn callgrind_fixed_order() {
        let order = CounterOrder::default();
        let details = details(&[
            "EstimatedCycles",
            "TotalRW",
            "Ir",
            "RamHits",
            "LLhits",
            "L1hits",
        ]);
        assert_eq!(
            order.counters_for("Callgrind", &details),
            ["Ir", "L1hits", "LLhits", "RamHits", "TotalRW", "EstimatedCycles"]
        );
    }

    #[test]
    fn fixed_order_ignores_extra_counters() {
        let order = CounterOrder::default();
        let details = details(&["Ir", "Dr", "Dw"]);
        assert_eq!(order.counters_for("Callgrind", &details).len(), 6);
    }

    #[test]
    fn unknown_tool_sorted() {
        let order = CounterOrder::default();
        let details = details(&["Z", "A", "M"]);
        assert_eq!(order.counters_for("DHAT", &details), ["A", "M", "Z"]);
    }

    #[test]
    fn empty_registry() {
        let order = CounterOrder::empty();
        let details = details(&["TotalRW", "Ir"]);
        assert_eq!(order.counters_for("Callgrind", &details), ["Ir", "TotalRW"]);
    }

    #[test]
    fn extend_overrides() {
        let mut order = CounterOrder::default();
        order.extend([
            "Callgrind=Ir,EstimatedCycles".parse::<ToolOrder>().unwrap(),
            "DHAT = TotalBytes, TotalBlocks".parse::<ToolOrder>().unwrap(),
        ]);
        assert_eq!(
            order.get("Callgrind").unwrap(),
            ["Ir".to_string(), "EstimatedCycles".to_string()]
        );
        assert_eq!(
            order.get("DHAT").unwrap(),
            ["TotalBytes".to_string(), "TotalBlocks".to_string()]
        );
    }

    #[test]
    fn invalid_tool_order() {
        for s in ["Callgrind", "=Ir", "Callgrind=", "Callgrind= , "] {
            assert!(
                matches!(s.parse::<ToolOrder>(), Err(ReportError::InvalidOrder(ref e)) if e == s),
                "{s} should be rejected"
            );
        }
    }
}
