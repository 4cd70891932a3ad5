//! GitHub Actions workflow commands
//!
//! Emits the `::command::message` lines the Actions runner understands
//! (groups, annotations, step outputs).

use anyhow::Context;
use std::fmt;
use std::io::Write;
use std::path::Path;

/// A workflow command understood by the Actions runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowCommand {
    /// Start of a collapsible group: ::group::{title}
    GroupStart { title: String },
    /// End of the current group: ::endgroup::
    GroupEnd,
    /// Error annotation: ::error::{message}
    Error { message: String },
    /// Warning annotation: ::warning::{message}
    Warning { message: String },
    /// Debug message, only shown with step debug logging: ::debug::{message}
    Debug { message: String },
    /// Legacy step output: ::set-output name={name}::{value}
    SetOutput { name: String, value: String },
}

impl fmt::Display for WorkflowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowCommand::GroupStart { title } => write!(f, "::group::{}", escape_data(title)),
            WorkflowCommand::GroupEnd => f.write_str("::endgroup::"),
            WorkflowCommand::Error { message } => write!(f, "::error::{}", escape_data(message)),
            WorkflowCommand::Warning { message } => {
                write!(f, "::warning::{}", escape_data(message))
            }
            WorkflowCommand::Debug { message } => write!(f, "::debug::{}", escape_data(message)),
            WorkflowCommand::SetOutput { name, value } => {
                write!(f, "::set-output name={}::{}", name, escape_data(value))
            }
        }
    }
}

/// Escape a command message so it stays on one line
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Collapsible log group, closed when dropped
#[must_use = "the group ends as soon as the guard is dropped"]
pub struct Group(());

impl Group {
    pub fn start(title: impl Into<String>) -> Self {
        println!("{}", WorkflowCommand::GroupStart { title: title.into() });
        Group(())
    }
}

impl Drop for Group {
    fn drop(&mut self) {
        println!("{}", WorkflowCommand::GroupEnd);
    }
}

/// Publish a step output
///
/// Appends `name=value` to the runner's output file when there is one, and
/// falls back to the legacy `::set-output` command otherwise.
pub fn set_output(name: &str, value: &str, output_path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = output_path else {
        println!(
            "{}",
            WorkflowCommand::SetOutput {
                name: name.to_string(),
                value: value.to_string(),
            }
        );
        return Ok(());
    };

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;
    file.write_all(format_output_entry(name, value).as_bytes())
        .with_context(|| format!("Failed to write output '{}' to {}", name, path.display()))?;
    Ok(())
}

const OUTPUT_DELIMITER: &str = "AUTOBUMP_EOF";

/// One entry of the runner's output file
fn format_output_entry(name: &str, value: &str) -> String {
    if value.contains('\n') {
        format!("{name}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}\n")
    } else {
        format!("{name}={value}\n")
    }
}
