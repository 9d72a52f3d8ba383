pub mod preview;
pub mod run;
pub mod sources;
