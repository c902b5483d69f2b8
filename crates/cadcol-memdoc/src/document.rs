// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory document with snapshot-based transactions

use crate::element::{ColumnInstance, Element, ElementKind};
use cadcol_model::{
    BuiltinParam, Document, DocumentError, ElementId, FailureMessage, FailurePreprocessor,
    FailureResolution, FailureSeverity, FailuresAccessor, ParamValue, Result, StructuralKind,
    TransactionStatus,
};
use nalgebra::{Point3, Vector3};
use rustc_hash::{FxHashMap, FxHashSet};

/// Copy of the document state taken when a transaction or group starts
#[derive(Clone)]
struct Snapshot {
    elements: FxHashMap<ElementId, Element>,
    next_id: u32,
}

struct OpenTransaction {
    name: String,
    snapshot: Snapshot,
}

struct OpenGroup {
    name: String,
    snapshot: Snapshot,
    /// Undo entries recorded before the group started
    undo_mark: usize,
}

/// Failure list handed to preprocessors at commit time
struct PendingFailures<'a>(&'a mut Vec<FailureMessage>);

impl FailuresAccessor for PendingFailures<'_> {
    fn messages(&self) -> &[FailureMessage] {
        self.0
    }

    fn delete_warning(&mut self, index: usize) {
        if self
            .0
            .get(index)
            .is_some_and(|m| m.severity == FailureSeverity::Warning)
        {
            self.0.remove(index);
        }
    }
}

/// In-memory document
///
/// Mutating operations are only legal inside an open transaction, matching
/// the host contract. `add_family`/`add_symbol`/`add_level` are setup
/// builders outside that rule, meant for arranging the pre-existing state a
/// test or dry run starts from.
#[derive(Default)]
pub struct MemoryDocument {
    elements: FxHashMap<ElementId, Element>,
    next_id: u32,
    tx: Option<OpenTransaction>,
    group: Option<OpenGroup>,
    pending_failures: Vec<FailureMessage>,
    /// Type names whose duplication is forced to fail (test hook)
    failing_type_names: FxHashSet<String>,
    /// Type names whose instantiation posts an error failure (test hook)
    failing_instance_names: FxHashSet<String>,
    /// User-visible undo entries, oldest first
    undo: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Setup builders
    // ------------------------------------------------------------------

    /// Add a family to the pre-existing document state
    pub fn add_family(&mut self, name: &str) -> ElementId {
        self.insert(Element {
            name: name.to_string(),
            kind: ElementKind::Family,
            params: FxHashMap::default(),
        })
    }

    /// Add an inactive symbol (type) to a family
    pub fn add_symbol(
        &mut self,
        family: ElementId,
        name: &str,
        params: &[(&str, ParamValue)],
    ) -> ElementId {
        let params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.insert(Element {
            name: name.to_string(),
            kind: ElementKind::FamilySymbol {
                family,
                active: false,
            },
            params,
        })
    }

    /// Add a level at the given elevation
    pub fn add_level(&mut self, name: &str, elevation: f64) -> ElementId {
        self.insert(Element {
            name: name.to_string(),
            kind: ElementKind::Level { elevation },
            params: FxHashMap::default(),
        })
    }

    // ------------------------------------------------------------------
    // Failure hooks
    // ------------------------------------------------------------------

    /// Queue a failure message for the open transaction's commit
    pub fn post_failure(&mut self, message: FailureMessage) {
        self.pending_failures.push(message);
    }

    /// Force [`Document::duplicate_symbol`] to fail for this type name
    pub fn fail_duplicate_named(&mut self, name: &str) {
        self.failing_type_names.insert(name.to_string());
    }

    /// Post an error-severity failure whenever an instance of the named
    /// type is placed, so the surrounding commit rolls back
    pub fn fail_commit_for_instances_of(&mut self, name: &str) {
        self.failing_instance_names.insert(name.to_string());
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    pub fn in_group(&self) -> bool {
        self.group.is_some()
    }

    /// User-visible undo entries, oldest first
    pub fn undo_entries(&self) -> &[String] {
        &self.undo
    }

    /// Number of placed structural columns
    pub fn structural_column_count(&self) -> usize {
        self.elements
            .values()
            .filter(|e| matches!(e.kind, ElementKind::ColumnInstance(_)))
            .count()
    }

    /// Instance data of a placed column
    pub fn column(&self, id: ElementId) -> Option<&ColumnInstance> {
        match &self.elements.get(&id)?.kind {
            ElementKind::ColumnInstance(instance) => Some(instance),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn insert(&mut self, element: Element) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.elements.insert(id, element);
        id
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            next_id: self.next_id,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.elements = snapshot.elements;
        self.next_id = snapshot.next_id;
    }

    fn require_tx(&self) -> Result<()> {
        if self.tx.is_some() {
            Ok(())
        } else {
            Err(DocumentError::NoActiveTransaction)
        }
    }

    fn element(&self, id: ElementId) -> Result<&Element> {
        self.elements
            .get(&id)
            .ok_or(DocumentError::ElementNotFound(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(&id)
            .ok_or(DocumentError::ElementNotFound(id))
    }

    fn column_mut(&mut self, id: ElementId) -> Result<&mut ColumnInstance> {
        match &mut self.element_mut(id)?.kind {
            ElementKind::ColumnInstance(instance) => Ok(instance),
            _ => Err(DocumentError::WrongElementKind {
                element: id,
                expected: "column instance",
            }),
        }
    }
}

impl Document for MemoryDocument {
    fn tx_begin(&mut self, name: &str) -> Result<()> {
        if self.tx.is_some() {
            return Err(DocumentError::AlreadyStarted("transaction"));
        }
        self.tx = Some(OpenTransaction {
            name: name.to_string(),
            snapshot: self.snapshot(),
        });
        Ok(())
    }

    fn tx_commit(
        &mut self,
        preprocessor: Option<&dyn FailurePreprocessor>,
    ) -> Result<TransactionStatus> {
        let tx = self.tx.take().ok_or(DocumentError::NoActiveTransaction)?;

        let resolution = match preprocessor {
            Some(preprocessor) => {
                let mut accessor = PendingFailures(&mut self.pending_failures);
                preprocessor.preprocess(&mut accessor)
            }
            None => FailureResolution::Continue,
        };

        // Headless policy: unresolved failures roll the transaction back
        // instead of raising a dialog
        let commit = match resolution {
            FailureResolution::ProceedWithCommit => true,
            FailureResolution::WaitForUserInput => false,
            FailureResolution::Continue => self.pending_failures.is_empty(),
        };

        self.pending_failures.clear();

        if commit {
            self.undo.push(tx.name);
            Ok(TransactionStatus::Committed)
        } else {
            log::debug!("transaction '{}' rolled back at commit", tx.name);
            self.restore(tx.snapshot);
            Ok(TransactionStatus::RolledBack)
        }
    }

    fn tx_rollback(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or(DocumentError::NoActiveTransaction)?;
        self.pending_failures.clear();
        self.restore(tx.snapshot);
        Ok(())
    }

    fn group_begin(&mut self, name: &str) -> Result<()> {
        if self.group.is_some() {
            return Err(DocumentError::AlreadyStarted("transaction group"));
        }
        if self.tx.is_some() {
            return Err(DocumentError::invalid(
                "cannot start a group inside an open transaction",
            ));
        }
        self.group = Some(OpenGroup {
            name: name.to_string(),
            snapshot: self.snapshot(),
            undo_mark: self.undo.len(),
        });
        Ok(())
    }

    fn group_assimilate(&mut self) -> Result<()> {
        let group = self.group.take().ok_or(DocumentError::NoActiveTransaction)?;
        // Collapse the committed sub-transactions into one undo entry
        self.undo.truncate(group.undo_mark);
        self.undo.push(group.name);
        Ok(())
    }

    fn group_rollback(&mut self) -> Result<()> {
        let group = self.group.take().ok_or(DocumentError::NoActiveTransaction)?;
        if let Some(tx) = self.tx.take() {
            log::debug!("rolling back open transaction '{}' with its group", tx.name);
        }
        self.pending_failures.clear();
        self.undo.truncate(group.undo_mark);
        self.restore(group.snapshot);
        Ok(())
    }

    fn family_symbols(&self, family: ElementId) -> Vec<ElementId> {
        let mut symbols: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, e)| {
                matches!(e.kind, ElementKind::FamilySymbol { family: f, .. } if f == family)
            })
            .map(|(&id, _)| id)
            .collect();
        // Ids are allocated monotonically, so id order is creation order
        symbols.sort();
        symbols
    }

    fn element_name(&self, element: ElementId) -> Result<String> {
        Ok(self.element(element)?.name.clone())
    }

    fn duplicate_symbol(&mut self, symbol: ElementId, new_name: &str) -> Result<ElementId> {
        self.require_tx()?;

        if self.failing_type_names.contains(new_name) {
            return Err(DocumentError::invalid(format!(
                "type '{new_name}' cannot be created"
            )));
        }

        let source = self.element(symbol)?;
        let ElementKind::FamilySymbol { family, .. } = source.kind else {
            return Err(DocumentError::WrongElementKind {
                element: symbol,
                expected: "family symbol",
            });
        };
        let params = source.params.clone();

        let name_taken = self
            .family_symbols(family)
            .iter()
            .any(|&id| self.elements[&id].name == new_name);
        if name_taken {
            return Err(DocumentError::NameCollision(new_name.to_string()));
        }

        Ok(self.insert(Element {
            name: new_name.to_string(),
            kind: ElementKind::FamilySymbol {
                family,
                active: false,
            },
            params,
        }))
    }

    fn is_symbol_active(&self, symbol: ElementId) -> bool {
        matches!(
            self.elements.get(&symbol).map(|e| &e.kind),
            Some(ElementKind::FamilySymbol { active: true, .. })
        )
    }

    fn activate_symbol(&mut self, symbol: ElementId) -> Result<()> {
        self.require_tx()?;
        match &mut self.element_mut(symbol)?.kind {
            ElementKind::FamilySymbol { active, .. } => {
                *active = true;
                Ok(())
            }
            _ => Err(DocumentError::WrongElementKind {
                element: symbol,
                expected: "family symbol",
            }),
        }
    }

    fn parameter(&self, element: ElementId, name: &str) -> Option<ParamValue> {
        self.elements.get(&element)?.params.get(name).cloned()
    }

    fn set_parameter(&mut self, element: ElementId, name: &str, value: ParamValue) -> Result<()> {
        self.require_tx()?;
        let record = self.element_mut(element)?;
        match record.params.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DocumentError::parameter_not_found(element, name)),
        }
    }

    fn set_builtin(
        &mut self,
        element: ElementId,
        param: BuiltinParam,
        value: ParamValue,
    ) -> Result<()> {
        self.require_tx()?;
        let instance = self.column_mut(element)?;
        match (param, value) {
            (BuiltinParam::BaseLevel, ParamValue::Element(level)) => instance.base_level = level,
            (BuiltinParam::TopLevel, ParamValue::Element(level)) => instance.top_level = level,
            (BuiltinParam::BaseLevelOffset, ParamValue::Double(offset)) => {
                instance.base_offset = offset
            }
            (BuiltinParam::TopLevelOffset, ParamValue::Double(offset)) => {
                instance.top_offset = offset
            }
            (param, value) => {
                return Err(DocumentError::invalid(format!(
                    "{param:?} cannot be set to {value:?}"
                )))
            }
        }
        Ok(())
    }

    fn new_instance(
        &mut self,
        location: Point3<f64>,
        symbol: ElementId,
        base_level: ElementId,
        kind: StructuralKind,
    ) -> Result<ElementId> {
        self.require_tx()?;
        debug_assert_eq!(kind, StructuralKind::Column);

        if !self.is_symbol_active(symbol) {
            return Err(DocumentError::invalid(format!(
                "symbol {symbol} is not active"
            )));
        }
        let symbol_name = self.element(symbol)?.name.clone();
        if self.failing_instance_names.contains(&symbol_name) {
            self.pending_failures.push(FailureMessage::error(format!(
                "instance of '{symbol_name}' violates a constraint"
            )));
        }

        match self.element(base_level)?.kind {
            ElementKind::Level { .. } => {}
            _ => {
                return Err(DocumentError::WrongElementKind {
                    element: base_level,
                    expected: "level",
                })
            }
        }

        Ok(self.insert(Element {
            name: symbol_name,
            kind: ElementKind::ColumnInstance(ColumnInstance {
                symbol,
                location,
                base_level,
                top_level: base_level,
                base_offset: 0.0,
                top_offset: 0.0,
                rotation: 0.0,
            }),
            params: FxHashMap::default(),
        }))
    }

    fn rotate_element(
        &mut self,
        element: ElementId,
        _axis_origin: Point3<f64>,
        _axis_dir: Vector3<f64>,
        angle: f64,
    ) -> Result<()> {
        self.require_tx()?;
        let instance = self.column_mut(element)?;
        instance.rotation += angle;
        Ok(())
    }
}
