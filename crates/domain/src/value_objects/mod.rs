pub mod price;
pub mod return_sample;
pub mod signal;

pub use price::Price;
pub use return_sample::ReturnSample;
pub use signal::{SignalFilter, SignalStats};
