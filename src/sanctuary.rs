use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::SANCTUARY_SITES;

/// How far the true position is displaced before anything sees it.
pub const FUZZ_RADIUS_M: f64 = 400.0;

/// Shown when the device cannot or will not give a position. Sedona,
/// self-declared vortex capital of the world.
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    lat: 34.8697,
    lon: -111.7610,
};

const POI_MIN: usize = 3;
const POI_MAX: usize = 6;
const POI_MIN_KM: f64 = 1.0;
const POI_MAX_KM: f64 = 6.0;

const METERS_PER_DEG_LAT: f64 = 111_320.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Displace by `distance_m` along `bearing` radians. Flat-earth
    /// math; fine at the few kilometers we ever move.
    pub fn offset(&self, distance_m: f64, bearing: f64) -> Coordinate {
        let dlat = distance_m * bearing.cos() / METERS_PER_DEG_LAT;
        let dlon =
            distance_m * bearing.sin() / (METERS_PER_DEG_LAT * self.lat.to_radians().cos());
        Coordinate {
            lat: self.lat + dlat,
            lon: self.lon + dlon,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission denied")]
    Denied,
    #[error("Location not supported on this device")]
    Unsupported,
}

/// Source of the device position. Swappable so tests never touch real
/// hardware and the CLI can take a coordinate from flags.
pub trait LocationProvider {
    fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// A fixed position, or a guaranteed failure.
pub struct StaticLocation(pub Result<Coordinate, LocationError>);

impl LocationProvider for StaticLocation {
    fn current_location(&self) -> Result<Coordinate, LocationError> {
        self.0.clone()
    }
}

#[derive(Debug, Clone)]
pub struct Poi {
    pub name: &'static str,
    pub coordinate: Coordinate,
    pub distance_km: f64,
}

/// What the sanctuary map shows. Either a fuzzed position with its
/// fabricated surroundings, or the fallback with a retryable error.
#[derive(Debug, Clone)]
pub enum SanctuaryView {
    Located {
        position: Coordinate,
        pois: Vec<Poi>,
    },
    Fallback {
        position: Coordinate,
        error: LocationError,
    },
}

/// Enter or refresh the sanctuary. A fresh random offset is applied on
/// every call, so refreshing re-rolls the displayed position.
pub fn enter<R: Rng, P: LocationProvider>(provider: &P, rng: &mut R) -> SanctuaryView {
    match provider.current_location() {
        Ok(truth) => {
            let position = fuzz(&truth, rng);
            let pois = fabricate_pois(&position, rng);
            SanctuaryView::Located { position, pois }
        }
        Err(error) => SanctuaryView::Fallback {
            position: FALLBACK_COORDINATE,
            error,
        },
    }
}

/// Fixed magnitude, uniformly random bearing.
pub fn fuzz<R: Rng>(truth: &Coordinate, rng: &mut R) -> Coordinate {
    let bearing = rng.gen::<f64>() * std::f64::consts::TAU;
    truth.offset(FUZZ_RADIUS_M, bearing)
}

fn fabricate_pois<R: Rng>(center: &Coordinate, rng: &mut R) -> Vec<Poi> {
    let count = rng.gen_range(POI_MIN..=POI_MAX);
    let mut names: Vec<&'static str> = SANCTUARY_SITES.to_vec();
    (0..count)
        .map(|_| {
            let name = names.remove(rng.gen_range(0..names.len()));
            let distance_km = rng.gen_range(POI_MIN_KM..POI_MAX_KM);
            let bearing = rng.gen::<f64>() * std::f64::consts::TAU;
            Poi {
                name,
                coordinate: center.offset(distance_km * 1000.0, bearing),
                distance_km,
            }
        })
        .collect()
}

/// Monotone token source for in-flight position requests. A completion
/// carrying a stale token is dropped instead of mutating state after
/// the user has navigated away.
#[derive(Debug, Default)]
pub struct RequestGuard {
    current: u64,
}

impl RequestGuard {
    pub fn issue(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.current
    }
}
