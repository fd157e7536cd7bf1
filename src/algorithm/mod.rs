/// Tool requests, outputs and the single dispatch point
pub mod executor;
