#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

#[cfg(feature = "database")]
pub mod postgres;
