use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("module \"{module}\": profile #{profile} has no \"{scope}\" summary")]
    MissingScope {
        module: String,
        profile: usize,
        scope: String,
    },
    #[error("tool \"{tool}\": counter \"{counter}\" not found")]
    MissingCounter { tool: String, counter: String },
    #[error("tool \"{tool}\": counter \"{counter}\" is malformed")]
    InvalidCounter {
        #[source]
        source: serde_json::Error,
        tool: String,
        counter: String,
    },
    #[error("\"{0}\" is not a number")]
    NotANumber(String),
    #[error("counter \"{counter}\": {field}")]
    Counter {
        #[source]
        source: Box<ReportError>,
        counter: String,
        field: &'static str,
    },
    #[error("invalid counter order \"{0}\" (expected TOOL=COUNTER[,COUNTER...])")]
    InvalidOrder(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
