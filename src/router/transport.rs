//! Transport seam.
//!
//! The router only decides; something else sends. Implementations own
//! the connection, retries and rate limiting.

use super::decision::Delivery;

/// Delivers decided messages to the network.
pub trait Transport {
    /// Transport-specific failure.
    type Error;

    /// Send `text` according to an already-decided delivery.
    fn deliver(&mut self, delivery: &Delivery, text: &str) -> Result<(), Self::Error>;
}

/// Transport that only logs. Useful in tests and dry runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTransport;

impl Transport for LogTransport {
    type Error = std::convert::Infallible;

    fn deliver(&mut self, delivery: &Delivery, text: &str) -> Result<(), Self::Error> {
        log::info!(
            "deliver {:?} ({:?}): {}{}",
            delivery.recipient,
            delivery.mode,
            delivery.prefix.as_deref().unwrap_or(""),
            text
        );
        Ok(())
    }
}
