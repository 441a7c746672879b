/// One astronomical unit, in meters.
pub const AU: f64 = 149.6e6 * 1000.0;

/// Newtonian gravitational constant, in m³ kg⁻¹ s⁻².
pub const G: f64 = 6.67428e-11;

/// One day, in seconds.
pub const DAY: f64 = 3600.0 * 24.0;
