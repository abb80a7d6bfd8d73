//! Editable region boundary
//!
//! A [`RegionPolygon`] is a closed ring of vertices on the sphere. The ring
//! owns its vertices in a dense list whose order is the winding order; the
//! last vertex connects back to the first. Each vertex carries a
//! [`VertexId`] that display code uses to key its markers, so nothing
//! outside the ring holds a reference into it.
//!
//! Longitudes are stored *rectified*: each new or dragged vertex takes the
//! representation of its longitude that lies within 180° of a neighbour.
//! A ring drawn across the antimeridian therefore keeps values like 181°
//! internally and renders as one contiguous shape, while [`bounds`]
//! reports canonical `[-180, 180)` longitudes.
//!
//! [`bounds`]: RegionPolygon::bounds

use super::boundary::{format_boundary, parse_boundary};
use super::events::{RegionChange, RegionListener};
use crate::core::angle::rectify_lng;
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use geo::Contains;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a vertex, unique within its ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(u64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: VertexId,
    position: LatLng,
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Position in the rectified frame (longitude possibly outside ±180).
    pub fn position(&self) -> LatLng {
        self.position
    }
}

/// How a vertex should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRole {
    Active,
    /// Successor of the active vertex; the next insertion lands before it.
    Next,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Empty,
    /// One or two vertices.
    Populated,
    Valid,
    Destroyed,
}

pub struct RegionPolygon {
    vertices: Vec<Vertex>,
    active: Option<VertexId>,
    /// Ring as handed to the renderer, in the rectified frame.
    rendered: Vec<LatLng>,
    next_id: u64,
    destroyed: bool,
    listeners: Vec<Box<dyn RegionListener>>,
}

impl RegionPolygon {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            active: None,
            rendered: Vec::new(),
            next_id: 0,
            destroyed: false,
            listeners: Vec::new(),
        }
    }

    /// Build a ring by inserting `points` in order, each after the previous.
    /// Fails on the first point with an invalid latitude.
    pub fn from_points<I, P>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<LatLng>,
    {
        let mut region = Self::new();
        for p in points {
            let point = p.into();
            if region.insert_point(point).is_none() {
                let text = format!("{},{}", point.lat, point.lng);
                return Err(MapError::InvalidCoordinates(text).into());
            }
        }
        Ok(region)
    }

    /// Build a ring from the exported `lat,lon lat,lon ...` form.
    pub fn from_boundary_str(text: &str) -> Result<Self> {
        Self::from_points(parse_boundary(text)?)
    }

    pub fn subscribe(&mut self, listener: impl RegionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Pick the representation of `point`'s longitude within 180° of
    /// `reference`. Without a reference the point passes through unchanged.
    pub fn rectify_longitude(point: LatLng, reference: Option<LatLng>) -> LatLng {
        match reference {
            Some(reference) => point.with_lng(rectify_lng(point.lng, reference.lng)),
            None => point,
        }
    }

    /// Insert `point` right after the active vertex (or at the front of an
    /// empty ring) and make it active.
    ///
    /// Returns `None` if the ring is destroyed or the latitude is invalid.
    pub fn insert_point(&mut self, point: LatLng) -> Option<VertexId> {
        if self.destroyed {
            return None;
        }
        if !point.is_valid() {
            log::warn!("rejecting vertex at invalid position {:?}", point);
            return None;
        }

        let reference = self.active_vertex().map(Vertex::position);
        let position = Self::rectify_longitude(point, reference);
        let index = self
            .active
            .and_then(|id| self.index_of(id))
            .map_or(0, |i| i + 1);

        let id = VertexId(self.next_id);
        self.next_id += 1;
        self.vertices.insert(index, Vertex { id, position });

        let previous = self.active.replace(id);
        self.refresh_boundary();
        log::trace!("inserted {} at index {} ({:?})", id, index, position);

        self.emit(RegionChange::Inserted { id, index });
        self.emit(RegionChange::ActiveChanged {
            previous,
            current: Some(id),
        });
        Some(id)
    }

    /// Remove `id` from the ring. If it was active, its predecessor becomes
    /// active. Returns the removed vertex, or `None` if there was none.
    pub fn delete(&mut self, id: VertexId) -> Option<Vertex> {
        let index = self.index_of(id)?;

        let previous = self.active;
        let new_active = if previous == Some(id) {
            self.adjacent(id, false)
        } else {
            previous
        };

        let removed = self.vertices.remove(index);
        self.active = new_active;
        self.refresh_boundary();
        log::trace!("removed {} from index {}", id, index);

        self.emit(RegionChange::Removed { id, index });
        if new_active != previous {
            self.emit(RegionChange::ActiveChanged {
                previous,
                current: new_active,
            });
        }
        Some(removed)
    }

    pub fn delete_active(&mut self) -> Option<Vertex> {
        let id = self.active?;
        self.delete(id)
    }

    /// Make `id` the active vertex. Returns `false` if it is not in the ring.
    pub fn set_active(&mut self, id: VertexId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        let previous = self.active.replace(id);
        if previous != Some(id) {
            self.emit(RegionChange::ActiveChanged {
                previous,
                current: Some(id),
            });
        }
        true
    }

    /// Drag `id` to `point`, rectified against its predecessor in the ring
    /// (or the active vertex when it has none and is not `id` itself).
    /// Returns the stored position.
    pub fn move_vertex(&mut self, id: VertexId, point: LatLng) -> Option<LatLng> {
        let index = self.index_of(id)?;
        if !point.is_valid() {
            log::warn!("ignoring drag of {} to invalid position {:?}", id, point);
            return None;
        }

        // a lone vertex has nothing to rectify against
        let reference = self
            .adjacent(id, false)
            .or(self.active.filter(|active| *active != id))
            .and_then(|r| self.vertex(r))
            .map(Vertex::position);
        let position = Self::rectify_longitude(point, reference);

        self.vertices[index].position = position;
        self.refresh_boundary();
        self.emit(RegionChange::Moved { id });
        Some(position)
    }

    /// Neighbour of `id` in ring order: the successor if `next`, else the
    /// predecessor. `None` with fewer than two vertices.
    pub fn adjacent(&self, id: VertexId, next: bool) -> Option<VertexId> {
        let len = self.vertices.len();
        if len < 2 {
            return None;
        }
        let index = self.index_of(id)?;
        let neighbour = if next {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Some(self.vertices[neighbour].id)
    }

    /// The ring with canonical longitudes, in winding order.
    pub fn bounds(&self) -> Vec<LatLng> {
        self.vertices.iter().map(|v| v.position.normalized()).collect()
    }

    /// [`bounds`](Self::bounds) as space-separated `lat,lon` tokens.
    ///
    /// Degenerate rings are exported as-is; whoever consumes the string must
    /// reject fewer than three points.
    pub fn bounds_as_string(&self, precision: usize) -> String {
        format_boundary(&self.bounds(), precision)
    }

    /// The ring in the rectified frame, as drawn.
    pub fn boundary(&self) -> &[LatLng] {
        &self.rendered
    }

    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Release every vertex and stop accepting edits.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        let released: Vec<VertexId> = self.vertices.drain(..).map(|v| v.id).collect();
        self.active = None;
        self.destroyed = true;
        self.refresh_boundary();
        log::debug!("region destroyed, released {} vertices", released.len());

        self.emit(RegionChange::Destroyed { released });
        self.listeners.clear();
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn state(&self) -> RegionState {
        match self.vertices.len() {
            _ if self.destroyed => RegionState::Destroyed,
            0 => RegionState::Empty,
            1 | 2 => RegionState::Populated,
            _ => RegionState::Valid,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.vertices.iter().position(|v| v.id == id)
    }

    pub fn active(&self) -> Option<VertexId> {
        self.active
    }

    pub fn active_vertex(&self) -> Option<&Vertex> {
        self.active.and_then(|id| self.vertex(id))
    }

    pub fn role_of(&self, id: VertexId) -> Option<VertexRole> {
        self.index_of(id)?;
        let active = self.active;
        if active == Some(id) {
            Some(VertexRole::Active)
        } else if active.and_then(|a| self.adjacent(a, true)) == Some(id) {
            Some(VertexRole::Next)
        } else {
            Some(VertexRole::Plain)
        }
    }

    /// The ring as a `geo` polygon (x = longitude, rectified frame).
    pub fn to_polygon(&self) -> Option<geo_types::Polygon<f64>> {
        if self.is_degenerate() {
            return None;
        }
        let exterior: Vec<geo_types::Coord<f64>> =
            self.rendered.iter().map(|&p| p.into()).collect();
        Some(geo_types::Polygon::new(
            geo_types::LineString::from(exterior),
            vec![],
        ))
    }

    /// Whether `point` lies inside the region, wherever the ring sits
    /// relative to the antimeridian.
    pub fn contains(&self, point: &LatLng) -> bool {
        let Some(polygon) = self.to_polygon() else {
            return false;
        };
        let mean_lng =
            self.rendered.iter().map(|p| p.lng).sum::<f64>() / self.rendered.len() as f64;
        let probe = point.with_lng(rectify_lng(point.lng, mean_lng));
        polygon.contains(&geo_types::Point::new(probe.lng, probe.lat))
    }

    fn refresh_boundary(&mut self) {
        self.rendered.clear();
        self.rendered
            .extend(self.vertices.iter().map(|v| v.position));
    }

    fn emit(&mut self, change: RegionChange) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener.on_change(self, &change);
        }
        self.listeners = listeners;
    }
}

impl Default for RegionPolygon {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegionPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionPolygon")
            .field("vertices", &self.vertices)
            .field("active", &self.active)
            .field("destroyed", &self.destroyed)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
