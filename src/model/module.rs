use indexmap::IndexMap;
use serde_json::Value;

/// Counters reported by one tool, keyed by counter name.
///
/// Values stay raw JSON until a counter is actually rendered, so counters
/// that no table shows may carry anything.
pub type ToolDetails = IndexMap<String, Value>;

/// One benchmarked module, as emitted by the benchmark runner's JSON output.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ModuleRecord {
    pub module_path: String,
    pub profiles: Vec<ProfileRecord>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProfileRecord {
    pub summaries: Summaries,
}

impl ProfileRecord {
    pub fn total(&self) -> Option<&ScopeSummary> {
        self.summaries.total.as_ref()
    }
}

/// Summary scopes of a profile. Only the aggregate over all parts is read;
/// per-part scopes are skipped.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Summaries {
    #[serde(default)]
    pub total: Option<ScopeSummary>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScopeSummary {
    /// tool name -> counters
    pub summary: IndexMap<String, ToolDetails>,
}
