// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mutable document seam
//!
//! [`Document`] abstracts the host's project state: transactional commit
//! semantics plus the element primitives the reconstruction pipeline needs.
//! The trait is object-safe so the pipeline can be handed `&mut dyn Document`
//! for the duration of a batch.
//!
//! Document mutation is single-threaded by contract: all operations must run
//! on the one logical thread that owns valid API context for the document.
//! The trait therefore requires neither `Send` nor `Sync`.

use crate::{
    BuiltinParam, ElementId, FailurePreprocessor, ParamValue, Result, StructuralKind,
    TransactionStatus,
};
use nalgebra::{Point3, Vector3};

/// Mutable access to a host document
///
/// # Transactions
///
/// Element mutation is only legal inside an open transaction. Transactions
/// nest inside at most one transaction group (nesting depth is fixed at two):
///
/// - `group_begin` / `group_assimilate` bracket a batch so it collapses into
///   a single user-undoable step even when built from many committed
///   sub-transactions
/// - `tx_begin` / `tx_commit` / `tx_rollback` bracket one atomic change
///
/// `tx_commit` reports [`TransactionStatus::RolledBack`] when the document
/// discarded the changes despite the attempted commit (e.g. unresolved
/// failures); callers treat that as a commit failure distinct from ordinary
/// errors.
pub trait Document {
    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Open a transaction with the given user-visible name
    fn tx_begin(&mut self, name: &str) -> Result<()>;

    /// Attempt to commit the open transaction
    ///
    /// `preprocessor`, when present, is invoked with the failures posted
    /// during the transaction before the commit is finalized.
    fn tx_commit(
        &mut self,
        preprocessor: Option<&dyn FailurePreprocessor>,
    ) -> Result<TransactionStatus>;

    /// Roll the open transaction back, discarding its changes
    fn tx_rollback(&mut self) -> Result<()>;

    /// Open a transaction group with the given user-visible undo label
    fn group_begin(&mut self, name: &str) -> Result<()>;

    /// Finalize the open group, merging its transactions into one undo step
    fn group_assimilate(&mut self) -> Result<()>;

    /// Roll the open group back, discarding every transaction inside it
    fn group_rollback(&mut self) -> Result<()>;

    // ------------------------------------------------------------------
    // Families and symbols
    // ------------------------------------------------------------------

    /// Symbols (types) of a family, in creation order
    fn family_symbols(&self, family: ElementId) -> Vec<ElementId>;

    /// User-visible name of an element
    fn element_name(&self, element: ElementId) -> Result<String>;

    /// Duplicate a symbol under a new type name
    ///
    /// Fails when a symbol with that name already exists in the family.
    fn duplicate_symbol(&mut self, symbol: ElementId, new_name: &str) -> Result<ElementId>;

    /// Whether the symbol is active (loaded for instantiation)
    fn is_symbol_active(&self, symbol: ElementId) -> bool;

    /// Activate a symbol so instances can be placed from it
    fn activate_symbol(&mut self, symbol: ElementId) -> Result<()>;

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    /// Look up a parameter by name; `None` when the element has no such parameter
    fn parameter(&self, element: ElementId, name: &str) -> Option<ParamValue>;

    /// Set an existing parameter by name
    fn set_parameter(&mut self, element: ElementId, name: &str, value: ParamValue) -> Result<()>;

    /// Set a built-in instance parameter
    fn set_builtin(
        &mut self,
        element: ElementId,
        param: BuiltinParam,
        value: ParamValue,
    ) -> Result<()>;

    // ------------------------------------------------------------------
    // Element creation
    // ------------------------------------------------------------------

    /// Place a new family instance at `location` on `base_level`
    fn new_instance(
        &mut self,
        location: Point3<f64>,
        symbol: ElementId,
        base_level: ElementId,
        kind: StructuralKind,
    ) -> Result<ElementId>;

    /// Rotate an element about the axis through `axis_origin` along `axis_dir`
    fn rotate_element(
        &mut self,
        element: ElementId,
        axis_origin: Point3<f64>,
        axis_dir: Vector3<f64>,
        angle: f64,
    ) -> Result<()>;
}
