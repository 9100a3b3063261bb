pub mod price_candle;
pub mod price_series;

// Re-export for easier access
pub use price_candle::PricePoint;
pub use price_series::PriceSeries;
