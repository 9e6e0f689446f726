pub(crate) mod migrate;
pub(crate) mod report;
pub(crate) mod serve;
pub(crate) mod tokens;
