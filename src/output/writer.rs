// src/output/writer.rs
//! Executes output plans. The only place exports touch the filesystem.

use super::types::*;
use super::viewer::open_in_viewer;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Delivers every target in the plan. A failing target does not stop the
/// others; check [`OutputReport::is_success`] or call [`OutputReport::into_result`].
pub fn deliver(plan: OutputPlan) -> OutputReport {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::debug!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                let duration_ms = op_start.elapsed().as_millis() as u64;
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms,
                });
            }
            Err(e) => {
                log::error!("Delivery to {} failed: {}", operation.describe(), e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::debug!(
        "Output plan complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    report
}

fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(content)?;
            Ok(content.len())
        }
        DeliveryTarget::OpenInViewer { path, content } => {
            let written = write_file(path, content)?;
            open_in_viewer(path)?;
            Ok(written)
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_files_and_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exports").join("austin-texas-plumbing.txt");

        let report = deliver(OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "# plumbing".into(),
        }));

        assert!(report.is_success());
        assert_eq!(report.stats.bytes_written, 10);
        assert_eq!(fs::read_to_string(path).unwrap(), "# plumbing");
    }

    #[test]
    fn one_failure_does_not_stop_the_rest() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not dir").unwrap();
        let good = dir.path().join("good.txt");

        let report = deliver(
            OutputPlan::new()
                .with_operation(DeliveryTarget::WriteFile {
                    path: blocker.join("bad.txt"),
                    content: "x".into(),
                })
                .with_operation(DeliveryTarget::WriteFile {
                    path: good.clone(),
                    content: "y".into(),
                }),
        );

        assert_eq!(report.stats.operations_failed, 1);
        assert_eq!(report.stats.operations_completed, 1);
        assert!(good.exists());
        assert!(matches!(
            report.into_result(),
            Err(AppError::DeliveryFailed { .. })
        ));
    }
}
