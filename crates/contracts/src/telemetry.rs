//! Telemetry - externally supplied vehicle state for the HUD

/// Scalar vehicle state sampled once per render tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Telemetry {
    /// Vehicle velocity vector (m/s)
    pub velocity: [f64; 3],

    /// Autopilot engaged flag
    pub autopilot: bool,
}

impl Telemetry {
    /// Ground speed in km/h.
    #[inline]
    pub fn speed_kmh(&self) -> f64 {
        let [x, y, z] = self.velocity;
        3.6 * (x * x + y * y + z * z).sqrt()
    }
}

/// Provider of vehicle telemetry, owned by the external driving collaborator.
pub trait TelemetrySource: Send + Sync {
    /// Sample the current vehicle state; must not block.
    fn sample(&self) -> Telemetry;
}
