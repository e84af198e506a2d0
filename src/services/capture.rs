// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geometry capture over a drawing surface.
//!
//! The surface (the map's drawing toolkit) reports gestures as
//! [`DrawEvent`]s. Capture keeps the editable-shapes collection in step with
//! the toolkit and hands finalized geometries to the controller by handle.

use crate::config::DrawToolsConfig;
use crate::error::CaptureError;
use crate::models::GeometryKind;
use std::fmt;

/// Identifies a shape in the editable collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle(u64);

impl fmt::Display for ShapeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Events emitted by the drawing toolkit.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// A draw gesture completed.
    ShapeFinalized(geojson::Geometry),
    /// A shape was reshaped during an edit session.
    ShapeEdited {
        handle: ShapeHandle,
        geometry: geojson::Geometry,
    },
    /// Shapes were removed during a delete session.
    ShapesDeleted(Vec<ShapeHandle>),
    EditSessionStart,
    EditSessionEnd,
    DeleteSessionStart,
    DeleteSessionEnd,
}

/// The toolkit side of the drawing surface.
pub trait DrawingSurface {
    /// Offer the given drawing tools.
    fn configure(&mut self, tools: &DrawToolsConfig);

    /// Remove every editable shape from the map.
    fn clear(&mut self);
}

/// The editable-shapes collection.
pub struct GeometryCapture {
    surface: Box<dyn DrawingSurface + Send>,
    shapes: Vec<(ShapeHandle, geojson::Geometry)>,
    next_handle: u64,
}

impl GeometryCapture {
    /// Wrap a surface and offer the configured tools on it.
    pub fn new(mut surface: Box<dyn DrawingSurface + Send>, tools: &DrawToolsConfig) -> Self {
        surface.configure(tools);
        Self {
            surface,
            shapes: Vec::new(),
            next_handle: 1,
        }
    }

    /// Add a completed shape to the collection.
    pub fn finalize_shape(
        &mut self,
        geometry: geojson::Geometry,
    ) -> Result<ShapeHandle, CaptureError> {
        let kind = GeometryKind::classify(&geometry)?;
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        self.shapes.push((handle, geometry));

        tracing::debug!(%handle, ?kind, total = self.shapes.len(), "Shape finalized");
        Ok(handle)
    }

    /// Replace a shape's geometry after a toolkit edit.
    pub fn edit_shape(
        &mut self,
        handle: ShapeHandle,
        geometry: geojson::Geometry,
    ) -> Result<(), CaptureError> {
        GeometryKind::classify(&geometry)?;
        let slot = self
            .shapes
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .ok_or(CaptureError::UnknownShape(handle))?;
        slot.1 = geometry;
        Ok(())
    }

    /// Drop shapes the toolkit deleted. Unknown handles are ignored.
    pub fn remove_shapes(&mut self, handles: &[ShapeHandle]) {
        self.shapes.retain(|(h, _)| !handles.contains(h));
    }

    /// Remove every shape from the collection and the surface.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.surface.clear();
    }

    /// Serialize a shape to GeoJSON.
    pub fn export(&self, handle: ShapeHandle) -> Option<geojson::Geometry> {
        self.shapes
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, g)| g.clone())
    }

    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.shapes.iter().any(|(h, _)| *h == handle)
    }

    /// Most recently drawn shape still in the collection.
    pub fn latest(&self) -> Option<ShapeHandle> {
        self.shapes.last().map(|(h, _)| *h)
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
