// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RAII transaction scopes
//!
//! Both scopes guarantee rollback on every exit path that did not reach the
//! success call (`commit` / `assimilate`). This is a guaranteed-cleanup
//! contract: a panic or early return inside the scope leaves the document
//! as it was when the scope started.

use cadcol_model::{
    Document, DocumentError, FailurePreprocessor, Result, TransactionStatus,
};

/// One atomic document change; rolls back when dropped uncommitted
pub struct TransactionScope<'a> {
    doc: &'a mut dyn Document,
    finished: bool,
}

impl<'a> TransactionScope<'a> {
    /// Open a transaction on `doc`
    pub fn start(doc: &'a mut dyn Document, name: &str) -> Result<Self> {
        doc.tx_begin(name)?;
        Ok(Self {
            doc,
            finished: false,
        })
    }

    /// The document, for operations inside the transaction
    pub fn doc(&mut self) -> &mut dyn Document {
        self.doc
    }

    /// Commit the transaction
    ///
    /// A host-side rollback despite the attempted commit surfaces as
    /// [`DocumentError::TransactionCommitFailed`].
    pub fn commit(mut self, preprocessor: Option<&dyn FailurePreprocessor>) -> Result<()> {
        self.finished = true;
        match self.doc.tx_commit(preprocessor)? {
            TransactionStatus::Committed => Ok(()),
            TransactionStatus::RolledBack => Err(DocumentError::TransactionCommitFailed),
        }
    }

    /// Roll the transaction back explicitly
    pub fn roll_back(mut self) -> Result<()> {
        self.finished = true;
        self.doc.tx_rollback()
    }
}

impl Drop for TransactionScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            // Nothing useful to do with a rollback error during unwinding
            let _ = self.doc.tx_rollback();
        }
    }
}

/// Batch bracket merging many transactions into one undo step
///
/// State machine: Created → Started → Assimilated. Dropping the scope before
/// assimilation rolls back everything started but not assimilated.
pub struct TransactionGroupScope<'a> {
    doc: &'a mut dyn Document,
    finished: bool,
}

impl<'a> TransactionGroupScope<'a> {
    /// Open a transaction group on `doc`
    pub fn start(doc: &'a mut dyn Document, name: &str) -> Result<Self> {
        doc.group_begin(name)?;
        Ok(Self {
            doc,
            finished: false,
        })
    }

    /// The document, for transactions inside the group
    pub fn doc(&mut self) -> &mut dyn Document {
        self.doc
    }

    /// Finalize the group so the batch reads as one undoable operation
    pub fn assimilate(mut self) -> Result<()> {
        self.finished = true;
        self.doc.group_assimilate()
    }
}

impl Drop for TransactionGroupScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.doc.group_rollback();
        }
    }
}
