// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline orchestrator
//!
//! Coordinates extraction and the batched, isolated, transactional creation
//! loop. Extraction returns an explicit [`ColumnExtraction`] value that the
//! caller threads into [`ColumnFromCadOrchestrator::create_columns`]; an
//! extraction session spanning multiple layers or imports merges the
//! results with [`ColumnExtraction::merge`].

use crate::context::ColumnCreationContext;
use crate::error::{Error, Result};
use crate::strategy::ColumnCreationStrategy;
use crate::transaction::{TransactionGroupScope, TransactionScope};
use cadcol_geometry::{
    CircularColumnExtractor, ColumnModel, ImportGeometry, RectangularColumnExtractor,
};
use cadcol_model::{
    CompositeFailurePreprocessor, Document, ElementId, SuppressWarningsPreprocessor,
};
use serde::{Deserialize, Serialize};

/// Which drawing representation the footprints are read from
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// Boundary polylines and arcs drawn directly on the layer
    BoundaryLines,
    /// Planar faces of hatch fills on the layer
    HatchFaces,
}

/// Ordered extraction result: rectangular models first, then circular
///
/// Immutable after extraction; creation only iterates it. Replaces the
/// hidden cross-call accumulator of earlier designs with an explicit value.
#[derive(Clone, Default, Debug)]
pub struct ColumnExtraction {
    models: Vec<ColumnModel>,
}

impl ColumnExtraction {
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnModel> {
        self.models.iter()
    }

    pub fn models(&self) -> &[ColumnModel] {
        &self.models
    }

    pub fn rectangular_count(&self) -> usize {
        self.models
            .iter()
            .filter(|m| matches!(m, ColumnModel::Rectangular(_)))
            .count()
    }

    pub fn circular_count(&self) -> usize {
        self.models
            .iter()
            .filter(|m| matches!(m, ColumnModel::Circular(_)))
            .count()
    }

    /// Append another extraction's models, preserving both orders
    pub fn merge(&mut self, other: ColumnExtraction) {
        self.models.extend(other.models);
    }
}

/// Coordinates extraction and creation
#[derive(Clone, Copy, Default, Debug)]
pub struct ColumnFromCadOrchestrator {
    rectangular: RectangularColumnExtractor,
    circular: CircularColumnExtractor,
}

impl ColumnFromCadOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract column footprints from `layer` of the import
    ///
    /// Read-only with respect to any document; may run off the document
    /// thread. Fails before touching geometry when the layer name is empty
    /// or the import carries no entity on that layer.
    pub fn extract_column_data(
        &self,
        import: &ImportGeometry,
        layer: &str,
        mode: ExtractionMode,
    ) -> Result<ColumnExtraction> {
        if layer.is_empty() {
            return Err(Error::EmptyLayerName);
        }
        if !import.has_layer(layer) {
            return Err(Error::LayerNotFound(layer.to_string()));
        }

        let mut models = Vec::new();
        match mode {
            ExtractionMode::HatchFaces => {
                models.extend(
                    self.rectangular
                        .extract_from_planar_faces(import, layer)
                        .into_iter()
                        .map(ColumnModel::Rectangular),
                );
                models.extend(
                    self.circular
                        .extract_from_planar_faces(import, layer)
                        .into_iter()
                        .map(ColumnModel::Circular),
                );
            }
            ExtractionMode::BoundaryLines => {
                models.extend(
                    self.rectangular
                        .extract_from_boundary_lines(import, layer)
                        .into_iter()
                        .map(ColumnModel::Rectangular),
                );
                models.extend(
                    self.circular
                        .extract_from_boundary_lines(import, layer)
                        .into_iter()
                        .map(ColumnModel::Circular),
                );
            }
        }

        log::debug!(
            "extracted {} column footprints from layer '{layer}' ({mode:?})",
            models.len()
        );

        Ok(ColumnExtraction { models })
    }

    /// Create one column element per extracted model
    ///
    /// Fails with [`Error::NoExtractedColumns`] before opening any
    /// transaction when the extraction is empty. Otherwise every model gets
    /// its own committed transaction inside one assimilated group; a failing
    /// item is skipped and the batch continues. Returns the created ids in
    /// model order; an empty result is a valid outcome.
    pub fn create_columns(
        &self,
        extraction: &ColumnExtraction,
        doc: &mut dyn Document,
        ctx: &ColumnCreationContext,
    ) -> Result<Vec<ElementId>> {
        if extraction.is_empty() {
            return Err(Error::NoExtractedColumns);
        }

        let total = extraction.len();
        let mut created = Vec::new();

        let mut group = TransactionGroupScope::start(doc, "Create columns")?;

        for (index, model) in extraction.iter().enumerate() {
            let current = index + 1;
            if let Some(progress) = &ctx.progress {
                progress(current, total);
            }

            match Self::create_one(group.doc(), model, ctx) {
                Ok(Some(id)) => created.push(id),
                Ok(None) => log::debug!("column {current}/{total}: no type resolved, skipped"),
                Err(err) => log::debug!("column {current}/{total} failed, skipped: {err}"),
            }
        }

        group.assimilate()?;

        log::info!("created {} of {total} columns", created.len());
        Ok(created)
    }

    /// One isolated per-item transaction
    ///
    /// Committed immediately on success so the element becomes visible
    /// before the batch ends. Every failure path rolls the transaction back
    /// through the scope guard.
    fn create_one(
        doc: &mut dyn Document,
        model: &ColumnModel,
        ctx: &ColumnCreationContext,
    ) -> Result<Option<ElementId>> {
        let mut preprocessor = CompositeFailurePreprocessor::new();
        preprocessor.push(Box::new(SuppressWarningsPreprocessor));

        let mut tx = TransactionScope::start(doc, "Create column")?;

        let Some(strategy) = ColumnCreationStrategy::for_model(model) else {
            return Ok(None);
        };
        let Some(id) = strategy.execute(tx.doc(), ctx)? else {
            return Ok(None);
        };

        tx.commit(Some(&preprocessor))?;
        Ok(Some(id))
    }

    /// Check the creation inputs before any geometry or transaction work
    ///
    /// Hard-fails when a configured family has no types or lacks one of the
    /// configured numeric parameters on its types.
    pub fn validate_creation_inputs(
        &self,
        doc: &dyn Document,
        ctx: &ColumnCreationContext,
    ) -> Result<()> {
        let rectangular_params = [ctx.width_parameter.as_str(), ctx.height_parameter.as_str()];
        let circular_params = [ctx.diameter_parameter.as_str()];
        let checks: [(ElementId, &[&str]); 2] = [
            (ctx.rectangular_family, &rectangular_params),
            (ctx.circular_family, &circular_params),
        ];

        for (family, parameters) in checks {
            let symbols = doc.family_symbols(family);
            let Some(&first) = symbols.first() else {
                return Err(Error::FamilyHasNoTypes(family));
            };

            for &name in parameters {
                let numeric = doc
                    .parameter(first, name)
                    .and_then(|v| v.as_double())
                    .is_some();
                if !numeric {
                    return Err(Error::ParameterMissing {
                        family,
                        name: name.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadcol_geometry::{Arc, Curve, Line};
    use cadcol_memdoc::MemoryDocument;
    use cadcol_model::{from_millimeters, ParamValue};
    use nalgebra::Point3;

    const LAYER: &str = "S-COLS";

    fn square_loop(cx: f64, cy: f64, half: f64) -> Vec<Curve> {
        let p0 = Point3::new(cx - half, cy - half, 0.0);
        let p1 = Point3::new(cx + half, cy - half, 0.0);
        let p2 = Point3::new(cx + half, cy + half, 0.0);
        let p3 = Point3::new(cx - half, cy + half, 0.0);
        vec![
            Curve::Line(Line::new(p0, p1)),
            Curve::Line(Line::new(p1, p2)),
            Curve::Line(Line::new(p2, p3)),
            Curve::Line(Line::new(p3, p0)),
        ]
    }

    fn polygon_loop(cx: f64, cy: f64, radius: f64, sides: usize) -> Vec<Curve> {
        let vertex = |i: usize| {
            let t = i as f64 / sides as f64 * std::f64::consts::TAU;
            Point3::new(cx + radius * t.cos(), cy + radius * t.sin(), 0.0)
        };
        (0..sides)
            .map(|i| Curve::Line(Line::new(vertex(i), vertex((i + 1) % sides))))
            .collect()
    }

    #[test]
    fn test_empty_layer_name_rejected() {
        let orchestrator = ColumnFromCadOrchestrator::new();
        let import = ImportGeometry::new();
        let result = orchestrator.extract_column_data(&import, "", ExtractionMode::BoundaryLines);
        assert!(matches!(result, Err(Error::EmptyLayerName)));
    }

    #[test]
    fn test_unknown_layer_rejected() {
        let orchestrator = ColumnFromCadOrchestrator::new();
        let mut import = ImportGeometry::new();
        import.push_arc("S-WALL", Arc::new(Point3::origin(), 1.0));

        let result =
            orchestrator.extract_column_data(&import, LAYER, ExtractionMode::BoundaryLines);
        assert!(matches!(result, Err(Error::LayerNotFound(layer)) if layer == LAYER));
    }

    #[test]
    fn test_hatch_mode_reads_faces_only() {
        let orchestrator = ColumnFromCadOrchestrator::new();
        let mut import = ImportGeometry::new();
        import.push_face(LAYER, square_loop(0.0, 0.0, 0.5));
        import.push_face(LAYER, polygon_loop(10.0, 0.0, 0.7, 12));
        // Boundary entities are invisible to hatch mode
        import.push_arc(LAYER, Arc::new(Point3::new(20.0, 0.0, 0.0), 0.5));

        let extraction = orchestrator
            .extract_column_data(&import, LAYER, ExtractionMode::HatchFaces)
            .unwrap();
        assert_eq!(extraction.rectangular_count(), 1);
        assert_eq!(extraction.circular_count(), 1);
    }

    #[test]
    fn test_rectangular_models_precede_circular() {
        let orchestrator = ColumnFromCadOrchestrator::new();
        let mut import = ImportGeometry::new();
        // Circular face pushed first; extraction still orders rectangles first
        import.push_face(LAYER, polygon_loop(0.0, 0.0, 0.7, 12));
        import.push_face(LAYER, square_loop(10.0, 0.0, 0.5));

        let extraction = orchestrator
            .extract_column_data(&import, LAYER, ExtractionMode::HatchFaces)
            .unwrap();
        assert_eq!(extraction.len(), 2);
        assert!(matches!(
            extraction.models()[0],
            ColumnModel::Rectangular(_)
        ));
        assert!(matches!(extraction.models()[1], ColumnModel::Circular(_)));
    }

    #[test]
    fn test_merge_preserves_both_orders() {
        let orchestrator = ColumnFromCadOrchestrator::new();
        let mut first_import = ImportGeometry::new();
        first_import.push_face(LAYER, square_loop(0.0, 0.0, 0.5));
        let mut second_import = ImportGeometry::new();
        second_import.push_arc(LAYER, Arc::new(Point3::origin(), 0.5));

        let mut merged = orchestrator
            .extract_column_data(&first_import, LAYER, ExtractionMode::HatchFaces)
            .unwrap();
        merged.merge(
            orchestrator
                .extract_column_data(&second_import, LAYER, ExtractionMode::BoundaryLines)
                .unwrap(),
        );

        assert_eq!(merged.len(), 2);
        assert!(matches!(merged.models()[0], ColumnModel::Rectangular(_)));
        assert!(matches!(merged.models()[1], ColumnModel::Circular(_)));
    }

    fn creation_doc() -> (MemoryDocument, ColumnCreationContext) {
        let mut doc = MemoryDocument::new();
        let rectangular_family = doc.add_family("Concrete Column");
        doc.add_symbol(
            rectangular_family,
            "300x450",
            &[
                ("b", ParamValue::Double(from_millimeters(300.0))),
                ("h", ParamValue::Double(from_millimeters(450.0))),
            ],
        );
        let circular_family = doc.add_family("Round Column");
        doc.add_symbol(
            circular_family,
            "D300",
            &[("d", ParamValue::Double(from_millimeters(300.0)))],
        );
        let base_level = doc.add_level("L1", 0.0);
        let top_level = doc.add_level("L2", 13.0);

        let ctx = ColumnCreationContext {
            rectangular_family,
            circular_family,
            width_parameter: "b".into(),
            height_parameter: "h".into(),
            diameter_parameter: "d".into(),
            base_level,
            top_level,
            base_offset: 0.0,
            top_offset: 0.0,
            progress: None,
        };
        (doc, ctx)
    }

    #[test]
    fn test_validation_accepts_configured_families() {
        let (doc, ctx) = creation_doc();
        let orchestrator = ColumnFromCadOrchestrator::new();
        orchestrator.validate_creation_inputs(&doc, &ctx).unwrap();
    }

    #[test]
    fn test_validation_rejects_empty_family() {
        let (mut doc, mut ctx) = creation_doc();
        ctx.circular_family = doc.add_family("Empty Round");

        let orchestrator = ColumnFromCadOrchestrator::new();
        let result = orchestrator.validate_creation_inputs(&doc, &ctx);
        assert!(
            matches!(result, Err(Error::FamilyHasNoTypes(family)) if family == ctx.circular_family)
        );
    }

    #[test]
    fn test_validation_rejects_missing_parameter() {
        let (doc, mut ctx) = creation_doc();
        ctx.height_parameter = "h_total".into();

        let orchestrator = ColumnFromCadOrchestrator::new();
        let result = orchestrator.validate_creation_inputs(&doc, &ctx);
        assert!(matches!(result, Err(Error::ParameterMissing { name, .. }) if name == "h_total"));
    }

    #[test]
    fn test_progress_reports_one_based_over_total() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let (mut doc, mut ctx) = creation_doc();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&calls);
        ctx.progress = Some(Box::new(move |current, total| {
            seen.borrow_mut().push((current, total));
        }));

        let extraction = ColumnExtraction {
            models: vec![
                ColumnModel::Circular(cadcol_geometry::CircularColumnModel::from_arc(&Arc::new(
                    Point3::origin(),
                    from_millimeters(200.0),
                ))),
                ColumnModel::Circular(cadcol_geometry::CircularColumnModel::from_arc(&Arc::new(
                    Point3::new(5.0, 0.0, 0.0),
                    from_millimeters(300.0),
                ))),
            ],
        };

        let orchestrator = ColumnFromCadOrchestrator::new();
        let created = orchestrator
            .create_columns(&extraction, &mut doc, &ctx)
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(*calls.borrow(), vec![(1, 2), (2, 2)]);
    }
}
