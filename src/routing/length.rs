use crate::structures::{Bus, DistanceError, DistanceTable, StopRegistry};

/// Total physical length of a route over its full traversal order.
pub trait RouteLength {
    fn calculate(&self, bus: &Bus) -> Result<f64, DistanceError>;
}

/// Straight-line length: great-circle distance between consecutive stops.
/// Serves as the curvature denominator.
pub struct GeodesicLength<'a> {
    pub stops: &'a StopRegistry,
}

impl RouteLength for GeodesicLength<'_> {
    fn calculate(&self, bus: &Bus) -> Result<f64, DistanceError> {
        let order = bus.traversal();
        Ok(order
            .windows(2)
            .map(|span| {
                self.stops
                    .get(span[0])
                    .position
                    .dist(self.stops.get(span[1]).position)
            })
            .sum())
    }
}

/// Road length: directed distance-table lookups between consecutive stops.
/// This is the length reported for a bus query.
pub struct GivenLength<'a> {
    pub distances: &'a DistanceTable,
}

impl RouteLength for GivenLength<'_> {
    fn calculate(&self, bus: &Bus) -> Result<f64, DistanceError> {
        let order = bus.traversal();
        let mut total = 0.0;
        for span in order.windows(2) {
            total += self.distances.get(span[0], span[1])?;
        }
        Ok(total)
    }
}

pub fn curvature(given: f64, geodesic: f64) -> f64 {
    given / geodesic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{Bus, LatLng, StopId, EARTH_RADIUS_M};
    use approx::assert_relative_eq;

    fn fixture() -> (StopRegistry, DistanceTable, Bus) {
        let mut stops = StopRegistry::new();
        let a = stops.add_or_get("A");
        let b = stops.add_or_get("B");
        stops.qualify(a, LatLng::new(0.0, 0.0));
        stops.qualify(b, LatLng::new(0.0, 1.0));

        let mut distances = DistanceTable::new();
        distances.add_distances(a, &[(b, 150_000.0)]).unwrap();
        distances.add_distances(b, &[(a, 100_000.0)]).unwrap();

        let bus = Bus {
            name: "1".to_string(),
            stops: vec![a, b],
            circular: false,
        };
        (stops, distances, bus)
    }

    #[test]
    fn given_length_respects_direction() {
        let (_, distances, bus) = fixture();

        let length = GivenLength {
            distances: &distances,
        }
        .calculate(&bus)
        .unwrap();

        assert_relative_eq!(length, 250_000.0, max_relative = 1e-12);
    }

    #[test]
    fn geodesic_length_doubles_back() {
        let (stops, _, bus) = fixture();

        let length = GeodesicLength { stops: &stops }.calculate(&bus).unwrap();

        let one_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert_relative_eq!(length, 2.0 * one_degree, max_relative = 1e-9);
    }

    #[test]
    fn given_length_fails_on_an_unpopulated_span() {
        let (_, distances, _) = fixture();
        let bus = Bus {
            name: "2".to_string(),
            stops: vec![StopId(0), StopId(7)],
            circular: false,
        };

        let result = GivenLength {
            distances: &distances,
        }
        .calculate(&bus);

        assert_eq!(
            result,
            Err(DistanceError::Missing {
                from: StopId(0),
                to: StopId(7),
            })
        );
    }

    #[test]
    fn curvature_is_the_length_ratio() {
        assert_relative_eq!(curvature(5950.0, 4371.017), 1.361239, max_relative = 1e-5);
    }
}
