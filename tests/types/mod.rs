mod error;
mod optional_outcome;
mod report;
