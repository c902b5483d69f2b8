// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Failure preprocessing for transaction commits
//!
//! While a transaction is open the document accumulates failure messages
//! (warnings and errors posted by element operations). Before the commit is
//! finalized the attached [`FailurePreprocessor`] gets a chance to inspect
//! and resolve them, e.g. by deleting warnings so the commit proceeds
//! without user interaction.

/// Severity of a posted failure message
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FailureSeverity {
    Warning,
    Error,
}

/// A failure message posted during a transaction
#[derive(Clone, Debug)]
pub struct FailureMessage {
    pub severity: FailureSeverity,
    pub text: String,
}

impl FailureMessage {
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: FailureSeverity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: FailureSeverity::Error,
            text: text.into(),
        }
    }
}

/// Outcome of a preprocessing pass
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FailureResolution {
    /// Hand the remaining failures to the next preprocessor
    Continue,
    /// Commit despite remaining failures
    ProceedWithCommit,
    /// Escalate to the user; headless documents roll back instead
    WaitForUserInput,
}

/// Access to the failure list of the committing transaction
pub trait FailuresAccessor {
    /// Failure messages currently posted, in posting order
    fn messages(&self) -> &[FailureMessage];

    /// Delete the warning at `index`; errors cannot be deleted this way
    fn delete_warning(&mut self, index: usize);
}

/// Hook invoked with the posted failures before a commit is finalized
pub trait FailurePreprocessor {
    fn preprocess(&self, accessor: &mut dyn FailuresAccessor) -> FailureResolution;
}

/// Deletes every warning-severity message and continues
///
/// Attached to the per-column transactions so routine host warnings do not
/// interrupt the batch.
#[derive(Default)]
pub struct SuppressWarningsPreprocessor;

impl FailurePreprocessor for SuppressWarningsPreprocessor {
    fn preprocess(&self, accessor: &mut dyn FailuresAccessor) -> FailureResolution {
        // Collect indices first, delete in descending order so they stay valid
        let warnings: Vec<usize> = accessor
            .messages()
            .iter()
            .enumerate()
            .filter(|(_, m)| m.severity == FailureSeverity::Warning)
            .map(|(i, _)| i)
            .rev()
            .collect();

        for index in warnings {
            accessor.delete_warning(index);
        }

        FailureResolution::Continue
    }
}

/// Ordered list of preprocessors, folded left-to-right
///
/// The first preprocessor returning a non-[`FailureResolution::Continue`]
/// result short-circuits the chain.
#[derive(Default)]
pub struct CompositeFailurePreprocessor {
    preprocessors: Vec<Box<dyn FailurePreprocessor>>,
}

impl CompositeFailurePreprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, preprocessor: Box<dyn FailurePreprocessor>) {
        self.preprocessors.push(preprocessor);
    }
}

impl FailurePreprocessor for CompositeFailurePreprocessor {
    fn preprocess(&self, accessor: &mut dyn FailuresAccessor) -> FailureResolution {
        for preprocessor in &self.preprocessors {
            let result = preprocessor.preprocess(accessor);
            if result != FailureResolution::Continue {
                return result;
            }
        }

        FailureResolution::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct VecAccessor(Vec<FailureMessage>);

    impl FailuresAccessor for VecAccessor {
        fn messages(&self) -> &[FailureMessage] {
            &self.0
        }

        fn delete_warning(&mut self, index: usize) {
            if self.0[index].severity == FailureSeverity::Warning {
                self.0.remove(index);
            }
        }
    }

    struct FixedResolution(FailureResolution);

    impl FailurePreprocessor for FixedResolution {
        fn preprocess(&self, _: &mut dyn FailuresAccessor) -> FailureResolution {
            self.0
        }
    }

    #[test]
    fn test_suppress_warnings_deletes_only_warnings() {
        let mut accessor = VecAccessor(vec![
            FailureMessage::warning("duplicate mark"),
            FailureMessage::error("constraint broken"),
            FailureMessage::warning("overlap"),
        ]);

        let result = SuppressWarningsPreprocessor.preprocess(&mut accessor);

        assert_eq!(result, FailureResolution::Continue);
        assert_eq!(accessor.0.len(), 1);
        assert_eq!(accessor.0[0].severity, FailureSeverity::Error);
    }

    #[test]
    fn test_composite_short_circuits_on_non_continue() {
        let mut composite = CompositeFailurePreprocessor::new();
        composite.push(Box::new(FixedResolution(FailureResolution::Continue)));
        composite.push(Box::new(FixedResolution(FailureResolution::ProceedWithCommit)));
        composite.push(Box::new(FixedResolution(FailureResolution::WaitForUserInput)));

        let mut accessor = VecAccessor(Vec::new());
        assert_eq!(
            composite.preprocess(&mut accessor),
            FailureResolution::ProceedWithCommit
        );
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeFailurePreprocessor::new();
        let mut accessor = VecAccessor(Vec::new());
        assert_eq!(
            composite.preprocess(&mut accessor),
            FailureResolution::Continue
        );
    }
}
