//! Tests for applying and reverting route flow with claim counting

#[cfg(test)]
mod tests {
    use pathtile::PathError;
    use pathtile::routing::accumulator::FlowAccumulator;
    use pathtile::routing::generator::RouteGenerator;
    use pathtile::routing::route::{Route, RouteId};
    use pathtile::spatial::coordinate::Coordinate;
    use pathtile::spatial::grid::{FlowSignature, GridFlowMap, TileType};
    use proptest::prelude::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn route(id: u64, steps: &[(i32, i32)]) -> Route {
        Route::new(RouteId(id), steps.iter().map(|&s| s.into()).collect())
    }

    fn all_clear(map: &GridFlowMap) -> bool {
        (0..map.height() as i32).all(|y| {
            (0..map.width() as i32).all(|x| {
                map.flow_signature(c(x, y)).is_ok_and(|s| s.is_zero())
                    && map.tile_type(c(x, y)).is_ok_and(|t| t == TileType::Empty)
            })
        })
    }

    // Tests connect writes +1 incoming and -1 outgoing on interior cells only
    // Verified by decorating the endpoints as well
    #[test]
    fn test_connect_applies_leg_deltas() {
        let mut map = GridFlowMap::new(3, 3).unwrap();
        let mut accumulator = FlowAccumulator::new();
        let bent = route(1, &[(0, 0), (1, 0), (1, 1), (1, 2)]);

        accumulator.connect(&mut map, &bent).unwrap();

        // west in, south out
        assert_eq!(map.flow_signature(c(1, 0)).unwrap().slots(), [0, 0, -1, 1]);
        // north in, south out
        assert_eq!(map.flow_signature(c(1, 1)).unwrap().slots(), [1, 0, -1, 0]);
        assert!(map.flow_signature(c(0, 0)).unwrap().is_zero());
        assert!(map.flow_signature(c(1, 2)).unwrap().is_zero());

        assert_eq!(map.tile_type(c(1, 0)).unwrap(), TileType::Path);
        assert_eq!(map.tile_type(c(1, 1)).unwrap(), TileType::Path);
        assert_eq!(map.tile_type(c(0, 0)).unwrap(), TileType::Empty);
        assert_eq!(accumulator.claim_count(c(1, 1)), 1);
        assert!(accumulator.is_connected(RouteId(1)));
    }

    // Tests disconnect restores every touched cell
    // Verified by skipping the sign flip on the outgoing slot
    #[test]
    fn test_round_trip_restores_cells() {
        let mut map = GridFlowMap::new(3, 3).unwrap();
        let mut accumulator = FlowAccumulator::new();
        let bent = route(1, &[(0, 0), (1, 0), (1, 1), (1, 2)]);

        accumulator.connect(&mut map, &bent).unwrap();
        accumulator.disconnect(&mut map, RouteId(1)).unwrap();

        assert!(all_clear(&map));
        assert_eq!(accumulator.claim_count(c(1, 1)), 0);
        assert_eq!(accumulator.connected_count(), 0);
    }

    // Tests removing one of two overlapping routes leaves the other's contribution
    // Verified by clearing the cell when any route leaves
    #[test]
    fn test_overlap_keeps_remaining_contribution() {
        let first = route(1, &[(0, 0), (1, 0), (1, 1), (1, 2)]);
        let second = route(2, &[(0, 1), (1, 1), (2, 1)]);

        let mut alone = GridFlowMap::new(3, 3).unwrap();
        FlowAccumulator::new().connect(&mut alone, &second).unwrap();
        let expected = alone.flow_signature(c(1, 1)).unwrap();

        let mut map = GridFlowMap::new(3, 3).unwrap();
        let mut accumulator = FlowAccumulator::new();
        accumulator.connect(&mut map, &first).unwrap();
        accumulator.connect(&mut map, &second).unwrap();
        assert_eq!(accumulator.claim_count(c(1, 1)), 2);

        accumulator.disconnect(&mut map, RouteId(1)).unwrap();

        assert_eq!(map.tile_type(c(1, 1)).unwrap(), TileType::Path);
        assert_eq!(map.flow_signature(c(1, 1)).unwrap(), expected);
        assert_eq!(map.tile_type(c(1, 0)).unwrap(), TileType::Empty);
        assert_eq!(accumulator.claim_count(c(1, 1)), 1);
    }

    // Tests a second connect of the same route is rejected without double counting
    // Verified by removing the connected check
    #[test]
    fn test_already_connected() {
        let mut map = GridFlowMap::new(3, 3).unwrap();
        let mut accumulator = FlowAccumulator::new();
        let bent = route(1, &[(0, 0), (1, 0), (1, 1), (1, 2)]);

        accumulator.connect(&mut map, &bent).unwrap();
        let before = map.flow_signature(c(1, 1)).unwrap();

        let err = accumulator.connect(&mut map, &bent).unwrap_err();
        assert!(matches!(err, PathError::AlreadyConnected { route: RouteId(1) }));
        assert_eq!(map.flow_signature(c(1, 1)).unwrap(), before);
        assert_eq!(accumulator.claim_count(c(1, 1)), 1);
    }

    // Tests disconnecting an unknown or already removed route fails
    // Verified by ignoring missing routes
    #[test]
    fn test_route_not_connected() {
        let mut map = GridFlowMap::new(3, 3).unwrap();
        let mut accumulator = FlowAccumulator::new();
        assert!(matches!(
            accumulator.disconnect(&mut map, RouteId(4)),
            Err(PathError::RouteNotConnected { route: RouteId(4) })
        ));

        let straight = route(4, &[(0, 1), (1, 1), (2, 1)]);
        accumulator.connect(&mut map, &straight).unwrap();
        accumulator.disconnect(&mut map, RouteId(4)).unwrap();
        assert!(accumulator.disconnect(&mut map, RouteId(4)).is_err());
        assert!(all_clear(&map));
    }

    // Tests invalid routes leave the map untouched
    // Verified by applying legs before validating the last pair
    #[test]
    fn test_invalid_route_is_all_or_nothing() {
        let mut map = GridFlowMap::new(4, 4).unwrap();
        let mut accumulator = FlowAccumulator::new();

        let teleport = route(1, &[(0, 0), (1, 0), (2, 0), (2, 1), (3, 3)]);
        assert!(matches!(
            accumulator.connect(&mut map, &teleport),
            Err(PathError::InvalidRoute { .. })
        ));

        let leaves_grid = route(2, &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
        assert!(matches!(
            accumulator.connect(&mut map, &leaves_grid),
            Err(PathError::OutOfBounds { .. })
        ));

        assert!(all_clear(&map));
        assert_eq!(accumulator.connected_count(), 0);
        assert!(!accumulator.is_connected(RouteId(2)));
    }

    // Tests routes crossing a building keep the building tile
    // Verified by unconditionally setting Path on first claim
    #[test]
    fn test_building_cells_keep_type() {
        let mut map = GridFlowMap::new(3, 1).unwrap();
        map.set_tile_type(c(1, 0), TileType::Building).unwrap();
        let mut accumulator = FlowAccumulator::new();
        let through = route(1, &[(0, 0), (1, 0), (2, 0)]);

        accumulator.connect(&mut map, &through).unwrap();
        assert_eq!(map.tile_type(c(1, 0)).unwrap(), TileType::Building);

        accumulator.disconnect(&mut map, RouteId(1)).unwrap();
        assert_eq!(map.tile_type(c(1, 0)).unwrap(), TileType::Building);
        assert!(map.flow_signature(c(1, 0)).unwrap().is_zero());
    }

    // Tests a resize discards bookkeeping for routes connected before it
    // Verified by keeping stale routes across generations
    #[test]
    fn test_resize_discards_connections() {
        let mut map = GridFlowMap::new(3, 3).unwrap();
        let mut accumulator = FlowAccumulator::new();
        let bent = route(1, &[(0, 0), (1, 0), (1, 1), (1, 2)]);
        accumulator.connect(&mut map, &bent).unwrap();

        map.resize(3, 3).unwrap();

        assert!(matches!(
            accumulator.disconnect(&mut map, RouteId(1)),
            Err(PathError::RouteNotConnected { .. })
        ));
        assert_eq!(accumulator.claim_count(c(1, 1)), 0);

        accumulator.connect(&mut map, &bent).unwrap();
        assert_eq!(accumulator.claim_count(c(1, 1)), 1);
        assert_eq!(map.tile_type(c(1, 1)).unwrap(), TileType::Path);
    }

    // Tests a route visiting a cell twice is fully reverted
    // Verified by releasing the claim on the first visit
    #[test]
    fn test_self_crossing_route() {
        let mut map = GridFlowMap::new(3, 3).unwrap();
        let mut accumulator = FlowAccumulator::new();
        let looped = route(
            1,
            &[(1, 0), (1, 1), (2, 1), (2, 2), (1, 2), (1, 1), (0, 1)],
        );

        accumulator.connect(&mut map, &looped).unwrap();
        assert_eq!(accumulator.claim_count(c(1, 1)), 2);
        assert_eq!(
            map.flow_signature(c(1, 1)).unwrap(),
            FlowSignature::new([1, -1, 1, -1])
        );

        accumulator.disconnect(&mut map, RouteId(1)).unwrap();
        assert!(all_clear(&map));
    }

    proptest! {
        // Tests any set of generated routes returns the grid to zero when all are removed
        #[test]
        fn prop_connect_disconnect_net_zero(
            seed in any::<u64>(),
            count in 1usize..24,
            reverse in any::<bool>(),
        ) {
            let mut map = GridFlowMap::new(12, 9).unwrap();
            let mut accumulator = FlowAccumulator::new();
            let mut generator = RouteGenerator::new(seed, 12, 9).unwrap();
            let routes: Vec<Route> = (0..count).map(|_| generator.random_route()).collect();

            for route in &routes {
                accumulator.connect(&mut map, route).unwrap();
            }
            prop_assert_eq!(accumulator.connected_count(), count);

            let mut ids: Vec<RouteId> = routes.iter().map(Route::id).collect();
            if reverse {
                ids.reverse();
            }
            for id in ids {
                accumulator.disconnect(&mut map, id).unwrap();
            }

            prop_assert!(all_clear(&map));
        }
    }
}
