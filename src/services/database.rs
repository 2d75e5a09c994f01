use thiserror::Error;
use tracing::{debug, info};

use crate::ingestion::{AddBus, AddStop, Command};
use crate::queries::{BusQuery, Query, Response, RouteQuery, StopQuery};
use crate::routing::{
    GeodesicLength, GivenLength, RouteLength, TransitGraph, TransitRouter, curvature,
};
use crate::structures::{
    Bus, BusRegistry, DistanceError, DistanceTable, HeapError, LatLng, RoutingSettings, StopId,
    StopRegistry,
};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("bus '{0}' must name at least two stops")]
    RouteTooShort(String),
    #[error(transparent)]
    Distance(#[from] DistanceError),
    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// Owns the registries, the distance table, and the derived transit
/// graph; executes ingestion commands and answers queries. Ingestion must
/// finish before queries run; the graph is rebuilt from scratch whenever
/// ingestion touched the network after the last build.
#[derive(Debug)]
pub struct Database {
    stops: StopRegistry,
    buses: BusRegistry,
    distances: DistanceTable,
    settings: RoutingSettings,
    map: Option<TransitGraph>,
}

impl Database {
    pub fn new(settings: RoutingSettings) -> Database {
        Database {
            stops: StopRegistry::new(),
            buses: BusRegistry::new(),
            distances: DistanceTable::new(),
            settings,
            map: None,
        }
    }

    pub fn execute_commands(&mut self, commands: &[Command]) -> Result<(), DatabaseError> {
        for command in commands {
            match command {
                Command::AddStop(command) => self.add_stop(command)?,
                Command::AddBus(command) => self.add_bus(command)?,
            }
        }
        debug!(
            stops = self.stops.len(),
            buses = self.buses.len(),
            distances = self.distances.len(),
            "commands ingested"
        );
        Ok(())
    }

    fn add_stop(&mut self, command: &AddStop) -> Result<(), DatabaseError> {
        let stop = self.stops.add_or_get(&command.name);
        self.stops
            .qualify(stop, LatLng::new(command.latitude, command.longitude));

        let pairs: Vec<(StopId, f64)> = command
            .road_distances
            .iter()
            .map(|road| (self.stops.add_or_get(&road.to), road.distance))
            .collect();
        self.distances.add_distances(stop, &pairs)?;

        self.map = None;
        Ok(())
    }

    fn add_bus(&mut self, command: &AddBus) -> Result<(), DatabaseError> {
        if command.stops.len() < 2 {
            return Err(DatabaseError::RouteTooShort(command.name.clone()));
        }

        let stop_ids: Vec<StopId> = command
            .stops
            .iter()
            .map(|name| self.stops.add_or_get(name))
            .collect();
        let bus = self.buses.add(Bus {
            name: command.name.clone(),
            stops: stop_ids.clone(),
            circular: command.circular,
        });
        for stop in stop_ids {
            self.stops.record_bus(stop, bus);
        }

        self.map = None;
        Ok(())
    }

    /// Builds the transit graph from the ingested network, replacing any
    /// previous build.
    pub fn build_map(&mut self) -> Result<(), DatabaseError> {
        self.map = None;
        self.ensure_map()?;
        Ok(())
    }

    fn ensure_map(&mut self) -> Result<&TransitGraph, DatabaseError> {
        let map = match self.map.take() {
            Some(map) => map,
            None => {
                let map = TransitGraph::build(
                    &self.stops,
                    &self.buses,
                    &self.distances,
                    &self.settings,
                )?;
                info!(
                    vertices = map.vertex_count(),
                    edges = map.edge_count(),
                    "transit graph built"
                );
                map
            }
        };
        Ok(self.map.insert(map))
    }

    pub fn execute_queries(&mut self, queries: &[Query]) -> Result<Vec<Response>, DatabaseError> {
        queries
            .iter()
            .map(|query| self.execute_query(query))
            .collect()
    }

    pub fn execute_query(&mut self, query: &Query) -> Result<Response, DatabaseError> {
        let response = match query {
            Query::Bus(query) => self.bus_response(query)?,
            Query::Stop(query) => self.stop_response(query),
            Query::Route(query) => self.route_response(query)?,
        };
        debug!(id = response.id(), "query answered");
        Ok(response)
    }

    fn bus_response(&self, query: &BusQuery) -> Result<Response, DatabaseError> {
        let Some(id) = self.buses.try_find(&query.name) else {
            return Ok(Response::NoBus {
                id: query.id,
                name: query.name.clone(),
            });
        };
        let bus = self.buses.get(id);

        let given = GivenLength {
            distances: &self.distances,
        }
        .calculate(bus)?;
        let geodesic = GeodesicLength { stops: &self.stops }.calculate(bus)?;

        Ok(Response::FoundBus {
            id: query.id,
            name: bus.name.clone(),
            stop_count: bus.stop_count(),
            unique_stop_count: bus.unique_stop_count(),
            length: given,
            curvature: curvature(given, geodesic),
        })
    }

    fn stop_response(&self, query: &StopQuery) -> Response {
        let Some(id) = self.stops.try_find(&query.name) else {
            return Response::NoStop {
                id: query.id,
                name: query.name.clone(),
            };
        };
        let stop = self.stops.get(id);

        let mut buses: Vec<String> = stop
            .buses
            .iter()
            .map(|&bus| self.buses.get(bus).name.clone())
            .collect();
        buses.sort();
        buses.dedup();

        Response::FoundStop {
            id: query.id,
            name: stop.name.clone(),
            buses,
        }
    }

    fn route_response(&mut self, query: &RouteQuery) -> Result<Response, DatabaseError> {
        let (Some(from), Some(to)) = (
            self.stops.try_find(&query.from),
            self.stops.try_find(&query.to),
        ) else {
            return Ok(Response::NoRoute { id: query.id });
        };

        let map = self.ensure_map()?;
        let found = TransitRouter::new(map).find_route(from, to)?.is_some();
        Ok(if found {
            Response::FoundRoute { id: query.id }
        } else {
            Response::NoRoute { id: query.id }
        })
    }

    pub fn stops(&self) -> &StopRegistry {
        &self.stops
    }

    pub fn buses(&self) -> &BusRegistry {
        &self.buses
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    pub fn transit_graph(&self) -> Option<&TransitGraph> {
        self.map.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::RoadDistance;
    use approx::assert_relative_eq;

    fn stop(name: &str, latitude: f64, longitude: f64, roads: &[(&str, f64)]) -> Command {
        Command::AddStop(AddStop {
            name: name.to_string(),
            latitude,
            longitude,
            road_distances: roads
                .iter()
                .map(|&(to, distance)| RoadDistance {
                    to: to.to_string(),
                    distance,
                })
                .collect(),
        })
    }

    fn bus(name: &str, circular: bool, stops: &[&str]) -> Command {
        Command::AddBus(AddBus {
            name: name.to_string(),
            circular,
            stops: stops.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn canonical_database() -> Database {
        let commands = vec![
            stop("Tolstopaltsevo", 55.611087, 37.20829, &[("Marushkino", 3900.0)]),
            stop("Marushkino", 55.595884, 37.209755, &[("Rasskazovka", 9900.0)]),
            bus(
                "256",
                true,
                &[
                    "Biryulyovo Zapadnoye",
                    "Biryusinka",
                    "Universam",
                    "Biryulyovo Tovarnaya",
                    "Biryulyovo Passazhirskaya",
                    "Biryulyovo Zapadnoye",
                ],
            ),
            bus("750", false, &["Tolstopaltsevo", "Marushkino", "Rasskazovka"]),
            stop("Rasskazovka", 55.632761, 37.333324, &[]),
            stop(
                "Biryulyovo Zapadnoye",
                55.574371,
                37.6517,
                &[
                    ("Rasskazovka", 7500.0),
                    ("Biryusinka", 1800.0),
                    ("Universam", 2400.0),
                ],
            ),
            stop("Biryusinka", 55.581065, 37.64839, &[("Universam", 750.0)]),
            stop(
                "Universam",
                55.587655,
                37.645687,
                &[("Rasskazovka", 5600.0), ("Biryulyovo Tovarnaya", 900.0)],
            ),
            stop(
                "Biryulyovo Tovarnaya",
                55.592028,
                37.653656,
                &[("Biryulyovo Passazhirskaya", 1300.0)],
            ),
            stop(
                "Biryulyovo Passazhirskaya",
                55.580999,
                37.659164,
                &[("Biryulyovo Zapadnoye", 1200.0)],
            ),
        ];

        let mut database = Database::new(RoutingSettings {
            bus_velocity: 40.0,
            bus_wait_time: 6.0,
        });
        database.execute_commands(&commands).unwrap();
        database
    }

    fn bus_query(id: u64, name: &str) -> Query {
        Query::Bus(BusQuery {
            id,
            name: name.to_string(),
        })
    }

    fn stop_query(id: u64, name: &str) -> Query {
        Query::Stop(StopQuery {
            id,
            name: name.to_string(),
        })
    }

    fn route_query(id: u64, from: &str, to: &str) -> Query {
        Query::Route(RouteQuery {
            id,
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    #[test]
    fn circular_bus_statistics() {
        let mut database = canonical_database();

        let response = database.execute_query(&bus_query(1, "256")).unwrap();
        match response {
            Response::FoundBus {
                id,
                name,
                stop_count,
                unique_stop_count,
                length,
                curvature,
            } => {
                assert_eq!(id, 1);
                assert_eq!(name, "256");
                assert_eq!(stop_count, 6);
                assert_eq!(unique_stop_count, 5);
                assert_relative_eq!(length, 5950.0, max_relative = 1e-9);
                assert_relative_eq!(curvature, 1.361239, max_relative = 1e-4);
            }
            other => panic!("expected found_bus, got {other:?}"),
        }
    }

    #[test]
    fn linear_bus_statistics() {
        let mut database = canonical_database();

        let response = database.execute_query(&bus_query(2, "750")).unwrap();
        match response {
            Response::FoundBus {
                stop_count,
                unique_stop_count,
                length,
                curvature,
                ..
            } => {
                assert_eq!(stop_count, 5);
                assert_eq!(unique_stop_count, 3);
                assert_relative_eq!(length, 27600.0, max_relative = 1e-9);
                assert_relative_eq!(curvature, 1.318084, max_relative = 1e-4);
            }
            other => panic!("expected found_bus, got {other:?}"),
        }
    }

    #[test]
    fn unknown_names_are_not_found() {
        let mut database = canonical_database();

        assert_eq!(
            database.execute_query(&bus_query(3, "751")).unwrap(),
            Response::NoBus {
                id: 3,
                name: "751".to_string(),
            }
        );
        assert_eq!(
            database.execute_query(&stop_query(4, "Samara")).unwrap(),
            Response::NoStop {
                id: 4,
                name: "Samara".to_string(),
            }
        );
    }

    #[test]
    fn stop_lookup_lists_serving_buses_sorted() {
        let mut database = canonical_database();

        assert_eq!(
            database.execute_query(&stop_query(5, "Universam")).unwrap(),
            Response::FoundStop {
                id: 5,
                name: "Universam".to_string(),
                buses: vec!["256".to_string()],
            }
        );
        assert_eq!(
            database.execute_query(&stop_query(6, "Marushkino")).unwrap(),
            Response::FoundStop {
                id: 6,
                name: "Marushkino".to_string(),
                buses: vec!["750".to_string()],
            }
        );
    }

    #[test]
    fn route_reachability() {
        let mut database = canonical_database();

        // Along bus 750, and lazily builds the map on first use.
        assert_eq!(
            database
                .execute_query(&route_query(7, "Tolstopaltsevo", "Rasskazovka"))
                .unwrap(),
            Response::FoundRoute { id: 7 }
        );

        // The two route clusters share no stop.
        assert_eq!(
            database
                .execute_query(&route_query(8, "Tolstopaltsevo", "Universam"))
                .unwrap(),
            Response::NoRoute { id: 8 }
        );

        // Unknown endpoint short-circuits to no_route.
        assert_eq!(
            database
                .execute_query(&route_query(9, "Tolstopaltsevo", "Samara"))
                .unwrap(),
            Response::NoRoute { id: 9 }
        );
    }

    #[test]
    fn rebuilding_the_map_is_idempotent() {
        let mut database = canonical_database();

        database.build_map().unwrap();
        let first = database.transit_graph().map(|g| (g.vertex_count(), g.edge_count()));

        database.build_map().unwrap();
        let second = database.transit_graph().map(|g| (g.vertex_count(), g.edge_count()));

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn short_routes_abort_ingestion() {
        let mut database = Database::new(RoutingSettings {
            bus_velocity: 40.0,
            bus_wait_time: 6.0,
        });

        let result = database.execute_commands(&[bus("13", false, &["Lonely"])]);
        assert!(matches!(result, Err(DatabaseError::RouteTooShort(name)) if name == "13"));
    }

    #[test]
    fn duplicate_explicit_distances_abort_ingestion() {
        let mut database = Database::new(RoutingSettings {
            bus_velocity: 40.0,
            bus_wait_time: 6.0,
        });

        let commands = vec![
            stop("A", 55.0, 37.0, &[("B", 3900.0)]),
            stop("A2", 55.1, 37.1, &[]),
        ];
        database.execute_commands(&commands).unwrap();

        let result = database.execute_commands(&[stop("A", 55.0, 37.0, &[("B", 100.0)])]);
        assert!(matches!(
            result,
            Err(DatabaseError::Distance(DistanceError::DuplicateExplicit { .. }))
        ));
    }
}
