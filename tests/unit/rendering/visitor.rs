//! Tests for per-route draw intents and render layering

#[cfg(test)]
mod tests {
    use pathtile::rendering::decoder::TileKind;
    use pathtile::rendering::visitor::{DrawIntent, PathRenderVisitor, RenderPasses};
    use pathtile::routing::network::PathNetwork;
    use pathtile::routing::route::{Route, RouteId};
    use pathtile::spatial::coordinate::Coordinate;
    use pathtile::spatial::grid::{GridFlowMap, TileType};

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn route(id: u64, steps: &[(i32, i32)]) -> Route {
        Route::new(RouteId(id), steps.iter().map(|&s| s.into()).collect())
    }

    // Tests can_draw only accepts in-bounds path cells
    // Verified by accepting buildings
    #[test]
    fn test_can_draw() {
        let mut map = GridFlowMap::new(3, 3).unwrap();
        map.set_tile_type(c(0, 0), TileType::Path).unwrap();
        map.set_tile_type(c(1, 0), TileType::Building).unwrap();
        let visitor = PathRenderVisitor::new(&map);

        assert!(visitor.can_draw(c(0, 0)));
        assert!(!visitor.can_draw(c(1, 0)));
        assert!(!visitor.can_draw(c(2, 2)));
        assert!(!visitor.can_draw(c(-1, 0)));
        assert!(!visitor.can_draw(c(3, 3)));
    }

    // Tests the visitor emits interior cells in route order with world positions
    // Verified by emitting in row-major order
    #[test]
    fn test_visit_route_order() {
        let mut network = PathNetwork::new(4, 4).unwrap();
        let snake = route(1, &[(0, 3), (0, 2), (1, 2), (1, 1), (2, 1), (2, 0)]);
        network.connect(&snake).unwrap();

        let passes = network.visitor().visit(&snake, |cell| cell.x + cell.y * 4);
        let cells: Vec<Coordinate> = passes.iter().map(|intent| intent.cell).collect();
        assert_eq!(cells, vec![c(0, 2), c(1, 2), c(1, 1), c(2, 1)]);
        let positions: Vec<i32> = passes.iter().map(|intent| intent.position).collect();
        assert_eq!(positions, vec![8, 9, 5, 6]);
        assert!(passes.iter().all(|intent| intent.visual.kind == TileKind::Corner));
        assert!(passes.junctions.is_empty());
    }

    // Tests disconnected routes produce no intents
    // Verified by caching intents between frames
    #[test]
    fn test_visit_after_disconnect() {
        let mut network = PathNetwork::new(3, 3).unwrap();
        let straight = route(1, &[(0, 1), (1, 1), (2, 1)]);
        network.connect(&straight).unwrap();
        assert_eq!(network.render_route(&straight, |cell| cell).len(), 1);

        network.disconnect(RouteId(1)).unwrap();
        assert!(network.render_route(&straight, |cell| cell).is_empty());
    }

    // Tests junctions go to the overlay layer and are drawn last
    // Verified by pushing junctions into the base layer
    #[test]
    fn test_junctions_drawn_last() {
        let mut network = PathNetwork::new(3, 3).unwrap();
        let vertical = route(1, &[(1, 0), (1, 1), (1, 2)]);
        let horizontal = route(2, &[(0, 1), (1, 1), (2, 1), (2, 2)]);
        network.connect(&vertical).unwrap();
        network.connect(&horizontal).unwrap();

        let passes = network.visitor().visit(&horizontal, |cell| cell);
        assert_eq!(passes.base.len(), 1);
        assert_eq!(passes.junctions.len(), 1);

        let mut drawn = Vec::new();
        passes.submit(&mut |intent: &DrawIntent<Coordinate>| drawn.push(intent.cell));
        assert_eq!(drawn, vec![c(2, 1), c(1, 1)]);
    }

    // Tests cells whose flows cancel decode to nothing and are skipped
    // Verified by emitting invisible intents
    #[test]
    fn test_cancelled_flow_skipped() {
        let mut map = GridFlowMap::new(3, 3).unwrap();
        map.set_tile_type(c(1, 1), TileType::Path).unwrap();
        let visitor = PathRenderVisitor::new(&map);

        let passes = visitor.visit(&route(1, &[(1, 0), (1, 1), (1, 2)]), |cell| cell);
        assert!(passes.is_empty());
        assert!(visitor.visual_at(c(1, 1)).is_some_and(|visual| !visual.is_visible()));
    }

    // Tests visit_all covers every visible path cell in row-major order
    // Verified by visiting building cells
    #[test]
    fn test_visit_all() {
        let mut network = PathNetwork::new(3, 3).unwrap();
        network.connect(&route(1, &[(0, 0), (1, 0), (1, 1), (1, 2)])).unwrap();
        network.connect(&route(2, &[(2, 2), (2, 1), (2, 0)])).unwrap();

        let passes: RenderPasses<()> = network.visitor().visit_all(|_| ());
        let cells: Vec<Coordinate> = passes.iter().map(|intent| intent.cell).collect();
        assert_eq!(cells, vec![c(1, 0), c(1, 1), c(2, 1)]);
    }
}
