//! Core units, constants, and shared primitives for the Asteroid Impact Simulator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Surface gravity used by the crater scaling law (m/s²).
    pub const SURFACE_GRAVITY_M_S2: f64 = 9.8;
    /// Joules released by one kiloton of TNT.
    pub const JOULES_PER_KILOTON_TNT: f64 = 4.184e12;
    /// Joules released by one megaton of TNT.
    pub const JOULES_PER_MEGATON_TNT: f64 = 4.184e15;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{JOULES_PER_KILOTON_TNT, JOULES_PER_MEGATON_TNT};

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(deg: f64) -> f64 {
        deg.to_radians()
    }

    /// Convert joules to kilotons of TNT.
    #[inline]
    pub fn joules_to_kt_tnt(joules: f64) -> f64 {
        joules / JOULES_PER_KILOTON_TNT
    }

    /// Convert joules to megatons of TNT.
    #[inline]
    pub fn joules_to_mt_tnt(joules: f64) -> f64 {
        joules / JOULES_PER_MEGATON_TNT
    }
}

/// Geometry helpers shared across crates.
pub mod geometry {
    use std::f64::consts::PI;

    /// Volume of a sphere of the given radius.
    #[inline]
    pub fn sphere_volume(radius: f64) -> f64 {
        (4.0 / 3.0) * PI * radius.powi(3)
    }
}
