use std::default::Default;

/// Contains Config properties which will be used by the session server
#[derive(Clone)]
pub struct ServerConfig {
    /// Capacity of the outbound envelope channel. When a client drains
    /// slowly, writes past this capacity apply backpressure to the session
    /// task instead of buffering without bound.
    pub outbound_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            outbound_capacity: 64,
        }
    }
}
