pub mod market;
pub mod position;
pub mod trade;

// Re-export for easier access
pub use market::Market;
pub use position::ResolvedPosition;
pub use trade::Trade;
