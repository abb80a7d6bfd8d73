use super::polygon::{RegionPolygon, Vertex, VertexId};
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Edit requests coming from the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionIntent {
    InsertPoint(LatLng),
    DeletePoint(VertexId),
    DeleteActive,
    MoveVertex(VertexId, LatLng),
    SetActive(VertexId),
    Destroy,
}

/// What applying an intent did to the region.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    Inserted(VertexId),
    Removed(Vertex),
    Moved(LatLng),
    Activated,
    Destroyed,
    /// The intent named a vertex that is not in the ring.
    Ignored,
}

impl RegionPolygon {
    /// Apply one UI intent.
    ///
    /// Fails once the region is destroyed, or when a position has an invalid
    /// latitude. Intents naming vanished vertices are [`IntentOutcome::Ignored`].
    pub fn apply(&mut self, intent: RegionIntent) -> Result<IntentOutcome> {
        if self.is_destroyed() {
            return Err(MapError::Destroyed.into());
        }
        log::trace!("applying {:?}", intent);

        let outcome = match intent {
            RegionIntent::InsertPoint(point) => {
                check_position(&point)?;
                self.insert_point(point).map(IntentOutcome::Inserted)
            }
            RegionIntent::DeletePoint(id) => self.delete(id).map(IntentOutcome::Removed),
            RegionIntent::DeleteActive => self.delete_active().map(IntentOutcome::Removed),
            RegionIntent::MoveVertex(id, point) => {
                check_position(&point)?;
                self.move_vertex(id, point).map(IntentOutcome::Moved)
            }
            RegionIntent::SetActive(id) => self.set_active(id).then_some(IntentOutcome::Activated),
            RegionIntent::Destroy => {
                self.destroy();
                Some(IntentOutcome::Destroyed)
            }
        };
        Ok(outcome.unwrap_or(IntentOutcome::Ignored))
    }

    /// Apply intents in order, stopping at the first error.
    pub fn apply_all<I>(&mut self, intents: I) -> Result<Vec<IntentOutcome>>
    where
        I: IntoIterator<Item = RegionIntent>,
    {
        intents.into_iter().map(|intent| self.apply(intent)).collect()
    }
}

fn check_position(point: &LatLng) -> Result<()> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(MapError::InvalidCoordinates(format!("{},{}", point.lat, point.lng)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_builds_ring() {
        let mut region = RegionPolygon::new();
        let outcomes = region
            .apply_all([
                RegionIntent::InsertPoint(LatLng::new(0.0, 0.0)),
                RegionIntent::InsertPoint(LatLng::new(0.0, 10.0)),
                RegionIntent::InsertPoint(LatLng::new(10.0, 10.0)),
            ])
            .unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[2], IntentOutcome::Inserted(_)));
        assert_eq!(region.bounds_as_string(0), "0,0 0,10 10,10");
    }

    #[test]
    fn test_apply_delete_and_move() {
        let mut region = RegionPolygon::from_points([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)])
            .unwrap();
        let first = region.vertices()[0].id();

        let moved = region
            .apply(RegionIntent::MoveVertex(first, LatLng::new(1.0, 1.0)))
            .unwrap();
        assert_eq!(moved, IntentOutcome::Moved(LatLng::new(1.0, 1.0)));

        let removed = region.apply(RegionIntent::DeleteActive).unwrap();
        assert!(matches!(removed, IntentOutcome::Removed(v) if v.position() == LatLng::new(10.0, 10.0)));

        assert_eq!(region.apply(RegionIntent::SetActive(first)).unwrap(), IntentOutcome::Activated);
        region.apply(RegionIntent::DeletePoint(first)).unwrap();
        assert_eq!(
            region.apply(RegionIntent::DeletePoint(first)).unwrap(),
            IntentOutcome::Ignored
        );
    }

    #[test]
    fn test_apply_rejects_bad_latitude() {
        let mut region = RegionPolygon::new();
        assert!(region.apply(RegionIntent::InsertPoint(LatLng::new(-91.0, 0.0))).is_err());
        assert!(region.is_empty());
    }

    #[test]
    fn test_apply_after_destroy() {
        let mut region = RegionPolygon::from_points([(0.0, 0.0)]).unwrap();
        assert_eq!(region.apply(RegionIntent::Destroy).unwrap(), IntentOutcome::Destroyed);
        let err = region.apply(RegionIntent::DeleteActive).unwrap_err();
        assert!(matches!(err.downcast_ref::<MapError>(), Some(MapError::Destroyed)));
    }
}
