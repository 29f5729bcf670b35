// src/output/types.rs
//! Plans and reports for export delivery.
//!
//! A plan is built without touching the filesystem; [`super::deliver`] then
//! carries it out and reports per-target success or failure.

use crate::error::AppError;
use std::path::PathBuf;

/// Everything an export should produce.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// One place an export goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Write content to a file, creating parent directories
    WriteFile { path: PathBuf, content: String },
    /// Print to stdout
    PrintToStdout { content: String },
    /// Write content to `path`, then hand the file to the system viewer
    OpenInViewer { path: PathBuf, content: String },
}

impl DeliveryTarget {
    pub fn describe(&self) -> String {
        match self {
            Self::WriteFile { path, .. } => format!("file {}", path.display()),
            Self::PrintToStdout { .. } => "stdout".to_string(),
            Self::OpenInViewer { path, .. } => format!("viewer for {}", path.display()),
        }
    }
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<CompletedOperation>,
    pub failed: Vec<FailedOperation>,
    pub stats: ExecutionStats,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.completed.push(operation);
        self
    }

    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Turns any failed target into [`AppError::DeliveryFailed`].
    pub fn into_result(self) -> Result<Self, AppError> {
        if self.is_success() {
            return Ok(self);
        }
        let failures = self
            .failed
            .iter()
            .map(|failed| format!("{}: {}", failed.operation.describe(), failed.error))
            .collect();
        Err(AppError::DeliveryFailed { failures })
    }
}

#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub operation: DeliveryTarget,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_targets_become_delivery_error() {
        let report = OutputReport::new().with_failed(FailedOperation {
            operation: DeliveryTarget::WriteFile {
                path: PathBuf::from("/nope/austin.txt"),
                content: String::new(),
            },
            error: "permission denied".into(),
        });

        let err = report.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Output delivery failed: file /nope/austin.txt: permission denied"
        );
    }

    #[test]
    fn successful_report_passes_through() {
        let report = OutputReport::new().with_completed(CompletedOperation {
            operation: DeliveryTarget::PrintToStdout {
                content: "hi".into(),
            },
            bytes_written: 2,
            duration_ms: 0,
        });
        let report = report.into_result().unwrap();
        assert_eq!(report.stats.bytes_written, 2);
    }
}
