use tileregion::prelude::*;
use tileregion::region::validate_boundary;

/// Integration tests for drawing a download region the way a user does:
/// clicks on the map, drags of markers and the delete key.
#[cfg(test)]
mod region_editing {
    use super::*;

    fn click(lat: f64, lng: f64) -> InputEvent {
        InputEvent::MapClick {
            lat_lng: LatLng::new(lat, lng),
        }
    }

    fn delete_key() -> InputEvent {
        InputEvent::KeyPress {
            key: KeyCode::Backspace,
            modifiers: KeyModifiers::default(),
        }
    }

    /// A box drawn over the Pacific, clicking eastward across the antimeridian
    #[test]
    fn test_draw_across_antimeridian() {
        let _ = env_logger::builder().is_test(true).try_init();

        let handler = InputHandler::new();
        let mut region = RegionPolygon::new();
        for event in [
            click(10.0, 170.0),
            click(10.0, -170.0),
            click(-10.0, -170.0),
            click(-10.0, 170.0),
        ] {
            handler.apply(&mut region, event).unwrap();
        }

        let drawn: Vec<f64> = region.boundary().iter().map(|p| p.lng).collect();
        assert_eq!(drawn, vec![170.0, 190.0, 190.0, 170.0]);

        let exported = region.bounds_as_string(DEFAULT_PRECISION);
        assert_eq!(
            exported,
            "10.00000,170.00000 10.00000,-170.00000 -10.00000,-170.00000 -10.00000,170.00000"
        );
        assert!(validate_boundary(&region.bounds()).is_ok());

        assert!(region.contains(&LatLng::new(0.0, 180.0)));
        assert!(region.contains(&LatLng::new(0.0, -179.0)));
        assert!(!region.contains(&LatLng::new(0.0, 0.0)));
    }

    /// Insertion lands after the active vertex: selecting a marker and
    /// clicking splits the edge that leaves it.
    #[test]
    fn test_split_edge_after_selected_vertex() {
        let handler = InputHandler::new();
        let mut region = RegionPolygon::from_points([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)])
            .unwrap();
        let first = region.vertices()[0].id();
        let second = region.vertices()[1].id();

        handler
            .apply(&mut region, InputEvent::VertexClick { vertex: first })
            .unwrap();
        assert_eq!(region.role_of(second), Some(VertexRole::Next));

        handler.apply(&mut region, click(-1.0, 5.0)).unwrap();
        assert_eq!(region.bounds_as_string(0), "0,0 -1,5 0,10 10,10");
        assert_eq!(region.role_of(second), Some(VertexRole::Next));
    }

    /// Deleting repeatedly walks backwards around the ring until it is empty
    #[test]
    fn test_delete_until_empty() {
        let handler = InputHandler::new();
        let mut region = RegionPolygon::from_points([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)])
            .unwrap();
        let log = ChangeLog::new();
        region.subscribe(log.clone());

        let mut states = Vec::new();
        for _ in 0..4 {
            handler.apply(&mut region, delete_key()).unwrap();
            states.push(region.state());
        }
        assert_eq!(
            states,
            vec![
                RegionState::Populated,
                RegionState::Populated,
                RegionState::Empty,
                RegionState::Empty,
            ]
        );

        let removed = log
            .drain()
            .into_iter()
            .filter(|c| matches!(c, RegionChange::Removed { .. }))
            .count();
        assert_eq!(removed, 3);
        assert!(region.is_degenerate());
        assert!(validate_boundary(&region.bounds()).is_err());
    }

    /// Dragging a marker over the antimeridian keeps the ring contiguous
    #[test]
    fn test_drag_over_antimeridian() {
        let handler = InputHandler::new();
        let mut region = RegionPolygon::from_points([(0.0, 175.0), (5.0, 178.0), (-5.0, 178.0)])
            .unwrap();
        let second = region.vertices()[1].id();

        handler
            .apply(
                &mut region,
                InputEvent::VertexDrag {
                    vertex: second,
                    lat_lng: LatLng::new(5.0, -178.0),
                },
            )
            .unwrap();

        assert_eq!(region.vertex(second).map(|v| v.position().lng), Some(182.0));
        assert_eq!(region.bounds()[1], LatLng::new(5.0, -178.0));
    }

    /// A saved boundary string reloads into an equivalent region
    #[test]
    fn test_reload_exported_boundary() {
        let original =
            RegionPolygon::from_points([(60.0, -175.0), (60.0, 175.0), (50.0, 175.0)]).unwrap();
        let exported = original.bounds_as_string(DEFAULT_PRECISION);

        let reloaded = RegionPolygon::from_boundary_str(&exported).unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.bounds_as_string(DEFAULT_PRECISION), exported);
        assert_eq!(reloaded.boundary(), original.boundary());
    }

    /// A boundary with an out-of-range latitude is refused as a whole
    #[test]
    fn test_reject_boundary_with_invalid_point() {
        // shared logger setup; a second call must not panic
        #[cfg(feature = "debug")]
        {
            tileregion::init_logging("warn");
            tileregion::init_logging("debug");
        }

        let err = RegionPolygon::from_boundary_str("95,0 0,0 0,10 10,10").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MapError>(),
            Some(MapError::InvalidCoordinates(_))
        ));
        let points = [LatLng::new(0.0, 0.0), LatLng::new(90.1, 5.0)];
        assert!(RegionPolygon::from_points(points).is_err());
    }

    /// Abandoning the region releases every marker and rejects further edits
    #[test]
    fn test_abandon_region() {
        let mut region = RegionPolygon::from_points([(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let ids: Vec<VertexId> = region.vertices().iter().map(Vertex::id).collect();
        let log = ChangeLog::new();
        region.subscribe(log.clone());

        region.apply(RegionIntent::Destroy).unwrap();
        assert_eq!(log.drain(), vec![RegionChange::Destroyed { released: ids }]);
        assert!(region.apply(RegionIntent::InsertPoint(LatLng::new(0.0, 0.0))).is_err());
    }

    const DEFAULT_PRECISION: usize = tileregion::constants::DEFAULT_BOUNDS_PRECISION;
}
