mod counter;
mod module;

pub use counter::CounterDiff;
pub use module::{ModuleRecord, ScopeSummary, ToolDetails};
