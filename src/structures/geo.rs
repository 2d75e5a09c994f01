use std::fmt::Display;

/// Mean Earth radius in metres, used for all great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

impl LatLng {
    /// Placeholder position for stops referenced by a route before their
    /// own definition arrives.
    pub const ZERO: LatLng = LatLng {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> LatLng {
        LatLng {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in metres (haversine).
    pub fn dist(&self, other: LatLng) -> f64 {
        let delta_latitude = (self.latitude - other.latitude).to_radians();
        let delta_longitude = (self.longitude - other.longitude).to_radians();

        let central_angle_inner = (delta_latitude / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (delta_longitude / 2.0).sin().powi(2);
        let central_angle = 2.0 * central_angle_inner.sqrt().asin();

        EARTH_RADIUS_M * central_angle
    }
}
