use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{CommandTemplate, ExecError, OutputEncoding};

/// Stock Windows PowerShell location.
pub const DEFAULT_INTERPRETER: &str = r"C:\WINDOWS\system32\WindowsPowerShell\v1.0\powershell.exe";

/// Status query; `ConvertTo-Json` keeps long paths from wrapping the table output.
pub const DEFAULT_QUERY_TEMPLATE: &str = "Get-AIPFileStatus -path '{path}' | ConvertTo-Json";

/// Label application; prints a single status word such as `Success`.
pub const DEFAULT_APPLY_TEMPLATE: &str =
    "(Set-AIPFileLabel -path '{path}' -LabelId '{label_id}').Status.ToString()";

/// How the labeling tool is invoked.
///
/// The child is started as `<interpreter> <interpreter_args...> <rendered template>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Interpreter executable.
    pub interpreter: PathBuf,
    /// Arguments placed before the command string (e.g. `-NoProfile`).
    pub interpreter_args: Vec<String>,
    /// Encoding of the interpreter's stdout.
    pub encoding: OutputEncoding,
    /// Status query command, `{path}` substituted.
    pub query_template: CommandTemplate,
    /// Label apply command, `{path}` and `{label_id}` substituted.
    pub apply_template: CommandTemplate,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
            interpreter_args: Vec::new(),
            encoding: OutputEncoding::default(),
            query_template: CommandTemplate::new(DEFAULT_QUERY_TEMPLATE),
            apply_template: CommandTemplate::new(DEFAULT_APPLY_TEMPLATE),
        }
    }
}

impl ShellConfig {
    /// Validate the configuration before any process is spawned.
    ///
    /// Rules:
    /// - `interpreter` is not empty;
    /// - neither template is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.interpreter.as_os_str().is_empty() {
            return Err(ExecError::InvalidConfig("interpreter is empty".into()));
        }
        if self.query_template.is_blank() {
            return Err(ExecError::InvalidConfig("query_template is empty".into()));
        }
        if self.apply_template.is_blank() {
            return Err(ExecError::InvalidConfig("apply_template is empty".into()));
        }
        Ok(())
    }

    /// Emit a trace-level log with the resolved configuration.
    pub fn trace_state(&self) {
        trace!(
            interpreter = %self.interpreter.display(),
            interpreter_args = ?self.interpreter_args,
            encoding = %self.encoding,
            query_template = %self.query_template,
            apply_template = %self.apply_template,
            "shell config resolved"
        );
    }
}

impl fmt::Display for ShellConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShellConfig(interpreter='{}', args={}, encoding={})",
            self.interpreter.display(),
            self.interpreter_args.len(),
            self.encoding,
        )
    }
}
