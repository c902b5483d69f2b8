// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Column creation strategies
//!
//! One strategy per footprint shape, resolved from the model variant. A
//! strategy resolves or synthesizes a matching parametric type, places the
//! instance and applies shape-specific orientation. Type resolution is
//! reuse-first: an existing type whose parameters match within tolerance is
//! preferred over creating a new one.

use crate::context::ColumnCreationContext;
use crate::error::Result;
use cadcol_geometry::{CircularColumnModel, ColumnModel, RectangularColumnModel};
use cadcol_model::{
    to_millimeters, BuiltinParam, Document, ElementId, ParamValue, StructuralKind,
};
use nalgebra::{Point3, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Dimension match tolerance, internal units
const TOLERANCE: f64 = 1e-3;

/// Shape-specific creation behavior over a borrowed model
pub enum ColumnCreationStrategy<'m> {
    Rectangular(&'m RectangularColumnModel),
    Circular(&'m CircularColumnModel),
}

impl<'m> ColumnCreationStrategy<'m> {
    /// Resolve a strategy from the model variant
    ///
    /// Returns `None` for variants without creation behavior; the caller
    /// skips such models.
    pub fn for_model(model: &'m ColumnModel) -> Option<Self> {
        match model {
            ColumnModel::Rectangular(m) => Some(Self::Rectangular(m)),
            ColumnModel::Circular(m) => Some(Self::Circular(m)),
        }
    }

    /// Create one column element from the model
    ///
    /// Returns `Ok(None)` when no parametric type could be resolved; the
    /// model is dropped without error. Otherwise the instance is placed at
    /// the model center on the base level, bound to both levels with the
    /// configured offsets, and oriented per shape.
    pub fn execute(
        &self,
        doc: &mut dyn Document,
        ctx: &ColumnCreationContext,
    ) -> Result<Option<ElementId>> {
        let Some(symbol) = self.resolve_symbol(doc, ctx)? else {
            return Ok(None);
        };

        if !doc.is_symbol_active(symbol) {
            doc.activate_symbol(symbol)?;
        }

        let instance =
            doc.new_instance(self.center(), symbol, ctx.base_level, StructuralKind::Column)?;

        doc.set_builtin(
            instance,
            BuiltinParam::BaseLevel,
            ParamValue::Element(ctx.base_level),
        )?;
        doc.set_builtin(
            instance,
            BuiltinParam::TopLevel,
            ParamValue::Element(ctx.top_level),
        )?;
        doc.set_builtin(
            instance,
            BuiltinParam::BaseLevelOffset,
            ParamValue::Double(ctx.base_offset),
        )?;
        doc.set_builtin(
            instance,
            BuiltinParam::TopLevelOffset,
            ParamValue::Double(ctx.top_offset),
        )?;

        self.rotate(doc, instance)?;

        Ok(Some(instance))
    }

    fn center(&self) -> Point3<f64> {
        match self {
            Self::Rectangular(m) => m.center(),
            Self::Circular(m) => m.center(),
        }
    }

    fn resolve_symbol(
        &self,
        doc: &mut dyn Document,
        ctx: &ColumnCreationContext,
    ) -> Result<Option<ElementId>> {
        match self {
            Self::Rectangular(model) => {
                // Degenerate footprints resolve nothing
                if model.short_side().abs() < TOLERANCE || model.long_side().abs() < TOLERANCE {
                    return Ok(None);
                }
                get_or_create_rectangular_symbol(
                    doc,
                    ctx.rectangular_family,
                    model.short_side(),
                    model.long_side(),
                    &ctx.width_parameter,
                    &ctx.height_parameter,
                )
            }
            Self::Circular(model) => get_or_create_circular_symbol(
                doc,
                ctx.circular_family,
                model.diameter(),
                &ctx.diameter_parameter,
            ),
        }
    }

    /// Shape-specific orientation; circular columns are rotationally
    /// symmetric and stay as placed
    fn rotate(&self, doc: &mut dyn Document, element: ElementId) -> Result<()> {
        match self {
            Self::Circular(_) => Ok(()),
            Self::Rectangular(model) => {
                // The extractor constructs non-negative angles, so the else
                // branch is defensive only
                let angle = if model.rotation_angle() >= 0.0 {
                    model.rotation_angle()
                } else {
                    FRAC_PI_2 - model.rotation_angle()
                };
                doc.rotate_element(element, model.center(), Vector3::z(), angle)?;
                Ok(())
            }
        }
    }
}

/// Numeric parameter read treating integer and real storage uniformly
fn numeric_parameter(doc: &dyn Document, element: ElementId, name: &str) -> Option<f64> {
    doc.parameter(element, name).and_then(|v| v.as_double())
}

/// Find a type with matching width/height, or duplicate one
///
/// New types are named `"{width_mm}x{height_mm}"` from the whole-millimeter
/// rounding of the model sides, but keep the unrounded values in their
/// parameters so later extractions still match within tolerance.
fn get_or_create_rectangular_symbol(
    doc: &mut dyn Document,
    family: ElementId,
    width: f64,
    height: f64,
    width_parameter: &str,
    height_parameter: &str,
) -> Result<Option<ElementId>> {
    let symbols = doc.family_symbols(family);

    for &symbol in &symbols {
        let Some(width_value) = numeric_parameter(doc, symbol, width_parameter) else {
            continue;
        };
        let Some(height_value) = numeric_parameter(doc, symbol, height_parameter) else {
            continue;
        };

        if (width_value - width).abs() < TOLERANCE && (height_value - height).abs() < TOLERANCE {
            return Ok(Some(symbol));
        }
    }

    // Nothing to duplicate from
    let Some(&first) = symbols.first() else {
        return Ok(None);
    };

    let width_mm = to_millimeters(width).round();
    let height_mm = to_millimeters(height).round();
    if width_mm.abs() < TOLERANCE || height_mm.abs() < TOLERANCE {
        return Ok(None);
    }

    let name = format!("{width_mm:.0}x{height_mm:.0}");
    log::debug!("creating rectangular column type '{name}'");

    let symbol = doc.duplicate_symbol(first, &name)?;
    doc.set_parameter(symbol, width_parameter, ParamValue::Double(width))?;
    doc.set_parameter(symbol, height_parameter, ParamValue::Double(height))?;

    Ok(Some(symbol))
}

/// Find a type with matching diameter, or duplicate one
///
/// New types are named `"D{diameter_mm}"`. A type already carrying the
/// target name is reused even when its diameter parameter drifted.
fn get_or_create_circular_symbol(
    doc: &mut dyn Document,
    family: ElementId,
    diameter: f64,
    diameter_parameter: &str,
) -> Result<Option<ElementId>> {
    let symbols = doc.family_symbols(family);

    for &symbol in &symbols {
        let Some(value) = numeric_parameter(doc, symbol, diameter_parameter) else {
            continue;
        };
        if (value - diameter).abs() < TOLERANCE {
            return Ok(Some(symbol));
        }
    }

    let Some(&first) = symbols.first() else {
        return Ok(None);
    };

    let diameter_mm = to_millimeters(diameter).round();
    if diameter_mm < 1.0 {
        return Ok(None);
    }

    let name = format!("D{diameter_mm:.0}");

    for &symbol in &symbols {
        if doc.element_name(symbol)? == name {
            return Ok(Some(symbol));
        }
    }

    log::debug!("creating circular column type '{name}'");

    let symbol = doc.duplicate_symbol(first, &name)?;
    doc.set_parameter(symbol, diameter_parameter, ParamValue::Double(diameter))?;

    Ok(Some(symbol))
}
