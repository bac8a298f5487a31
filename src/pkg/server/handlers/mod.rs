pub mod candidates;
pub mod probes;
pub mod ui;
