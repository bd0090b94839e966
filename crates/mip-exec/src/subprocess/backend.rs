use std::{
    path::Path,
    process::Stdio,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, trace};

use mip_core::{LabelBackend, LabelError, LabelResult};
use mip_model::{LabelId, LabelStatus};

use crate::{
    ExecError, LABEL_ID_VAR, PATH_VAR,
    subprocess::{ShellConfig, output},
};

/// Status line printed by `Set-AIPFileLabel` when the label was applied.
pub const SUCCESS_STATUS: &str = "Success";

/// Backend that shells out to the AIP cmdlets.
///
/// Each call spawns one interpreter process. There is no timeout: a hung tool
/// hangs the call.
#[derive(Debug, Clone)]
pub struct SubprocessBackend {
    config: ShellConfig,
}

impl SubprocessBackend {
    /// Create a backend after validating `config`.
    pub fn new(config: ShellConfig) -> Result<Self, ExecError> {
        config.validate()?;
        config.trace_state();
        Ok(Self { config })
    }

    fn spawn(&self, script: &str) -> LabelResult<(Child, ChildStdout)> {
        trace!(
            interpreter = %self.config.interpreter.display(),
            args = ?self.config.interpreter_args,
            script,
            "spawning labeling tool",
        );

        let mut cmd = Command::new(&self.config.interpreter);
        cmd.args(&self.config.interpreter_args);
        cmd.arg(script);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit());

        let mut child = cmd.spawn().map_err(|source| LabelError::Spawn {
            program: self.config.interpreter.display().to_string(),
            source,
        })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| LabelError::Io(std::io::Error::other("child stdout was not captured")))?;
        Ok((child, stdout))
    }
}

#[async_trait]
impl LabelBackend for SubprocessBackend {
    fn name(&self) -> &'static str {
        "subprocess"
    }

    async fn query_status(&self, path: &Path) -> LabelResult<LabelStatus> {
        let script = self
            .config
            .query_template
            .render(&[(PATH_VAR, utf8_path(path)?)]);

        let (mut child, stdout) = self.spawn(&script)?;
        let text = output::read_all_lines(stdout, self.config.encoding).await?;

        match child.wait().await {
            Ok(status) => debug!(%status, bytes = text.len(), "status query finished"),
            Err(e) => debug!("failed to reap status query process: {e}"),
        }

        Ok(LabelStatus::from_json(&text)?)
    }

    async fn apply_label(&self, path: &Path, label_id: &LabelId) -> LabelResult<Duration> {
        let script = self
            .config
            .apply_template
            .render(&[(PATH_VAR, utf8_path(path)?), (LABEL_ID_VAR, label_id.as_str())]);

        let start = Instant::now();
        // The child is not awaited past its status line; tokio reaps it once dropped.
        let (_child, stdout) = self.spawn(&script)?;
        let line = output::read_first_line(stdout, self.config.encoding).await?;
        let elapsed = start.elapsed();

        if line == SUCCESS_STATUS {
            debug!(elapsed_ms = elapsed.as_millis() as u64, "labeling tool reported success");
            Ok(elapsed)
        } else {
            Err(LabelError::ApplyFailed { message: line })
        }
    }
}

/// The path is substituted into a command string, so it must be passed through unaltered.
fn utf8_path(path: &Path) -> LabelResult<&str> {
    path.to_str().ok_or_else(|| LabelError::NonUtf8Path {
        path: path.to_path_buf(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use mip_model::ModelError;

    use super::*;
    use crate::{CommandTemplate, OutputEncoding};

    fn sh(query: &str, apply: &str) -> SubprocessBackend {
        let cfg = ShellConfig {
            interpreter: PathBuf::from("/bin/sh"),
            interpreter_args: vec!["-c".into()],
            encoding: OutputEncoding::default(),
            query_template: CommandTemplate::new(query),
            apply_template: CommandTemplate::new(apply),
        };
        SubprocessBackend::new(cfg).unwrap()
    }

    fn with_encoding(mut backend: SubprocessBackend, label: &str) -> SubprocessBackend {
        backend.config.encoding = label.parse().unwrap();
        backend
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = ShellConfig {
            query_template: CommandTemplate::new(""),
            ..Default::default()
        };
        assert!(SubprocessBackend::new(cfg).is_err());
    }

    #[tokio::test]
    async fn query_parses_json_and_substitutes_path() {
        let backend = sh(
            r#"printf '{"FileName":"{path}","MainLabelId":"A1","SubLabelId":"B2"}\n'"#,
            "true",
        );
        let status = backend
            .query_status(Path::new("/tmp/report.xlsx"))
            .await
            .unwrap();

        assert_eq!(status.file_name(), Some("/tmp/report.xlsx"));
        assert_eq!(status.resolve(), Some(LabelId::new("B2")));
    }

    #[tokio::test]
    async fn query_handles_multiline_crlf_output() {
        let backend = sh(
            r#"printf '{\r\n  "MainLabelId": "A1",\r\n  "SubLabelId": ""\r\n}\r\n'"#,
            "true",
        );
        let status = backend.query_status(Path::new("a.xlsx")).await.unwrap();
        assert_eq!(status.resolve(), Some(LabelId::new("A1")));
    }

    #[tokio::test]
    async fn query_with_no_output_is_a_parse_error() {
        let backend = sh("true", "true");
        let err = backend.query_status(Path::new("a.xlsx")).await.unwrap_err();
        assert!(matches!(err, LabelError::Parse(ModelError::Parse(_))));
    }

    #[tokio::test]
    async fn query_with_text_output_is_a_parse_error() {
        let backend = sh("echo 'Get-AIPFileStatus : not recognized'", "true");
        let err = backend.query_status(Path::new("a.xlsx")).await.unwrap_err();
        assert!(matches!(err, LabelError::Parse(_)));
    }

    #[tokio::test]
    async fn query_with_undecodable_output_is_a_decode_error() {
        let backend = with_encoding(sh(r"printf '\377\n'", "true"), "utf-8");
        let err = backend.query_status(Path::new("a.xlsx")).await.unwrap_err();
        assert!(matches!(err, LabelError::Decode { encoding: "UTF-8" }));
    }

    #[tokio::test]
    async fn apply_success_returns_elapsed() {
        let backend = sh("true", "sleep 0.2; echo Success");
        let elapsed = backend
            .apply_label(Path::new("a.xlsx"), &LabelId::new("B2"))
            .await
            .unwrap();
        assert!(elapsed >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn apply_strips_crlf_from_status_line() {
        let backend = sh("true", r"printf 'Success\r\n'");
        let res = backend
            .apply_label(Path::new("a.xlsx"), &LabelId::new("B2"))
            .await;
        assert!(res.is_ok(), "unexpected: {res:?}");
    }

    #[tokio::test]
    async fn apply_passes_path_and_label_id() {
        let backend = sh(
            "true",
            "[ '{path}' = /tmp/a.xlsx ] && [ '{label_id}' = B2 ] && echo Success || echo Mismatch",
        );
        let ok = backend
            .apply_label(Path::new("/tmp/a.xlsx"), &LabelId::new("B2"))
            .await;
        assert!(ok.is_ok(), "unexpected: {ok:?}");

        let err = backend
            .apply_label(Path::new("/tmp/a.xlsx"), &LabelId::new("A1"))
            .await
            .unwrap_err();
        assert_eq!(err.raw_message(), Some("Mismatch"));
    }

    #[tokio::test]
    async fn apply_failure_carries_literal_status() {
        for status in ["Failed", "AccessDenied", "success", "Success "] {
            let backend = sh("true", &format!("printf '%s\\n' '{status}'"));
            let err = backend
                .apply_label(Path::new("a.xlsx"), &LabelId::new("B2"))
                .await
                .unwrap_err();
            match err {
                LabelError::ApplyFailed { message } => assert_eq!(message, status),
                other => panic!("unexpected error for {status:?}: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn apply_with_no_output_fails_with_empty_message() {
        let backend = sh("true", "true");
        let err = backend
            .apply_label(Path::new("a.xlsx"), &LabelId::new("B2"))
            .await
            .unwrap_err();
        assert_eq!(err.raw_message(), Some(""));
    }

    #[tokio::test]
    async fn non_utf8_path_is_rejected_before_spawn() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        // Interpreter would fail to spawn, so reaching it would yield a different error.
        let cfg = ShellConfig {
            interpreter: PathBuf::from("/nonexistent/powershell.exe"),
            ..Default::default()
        };
        let backend = SubprocessBackend::new(cfg).unwrap();
        let path = Path::new(OsStr::from_bytes(b"/tmp/report\xff.xlsx"));

        let err = backend.query_status(path).await.unwrap_err();
        assert!(matches!(&err, LabelError::NonUtf8Path { path: p } if p == path));

        let err = backend
            .apply_label(path, &LabelId::new("B2"))
            .await
            .unwrap_err();
        assert!(matches!(err, LabelError::NonUtf8Path { .. }));
    }

    #[tokio::test]
    async fn missing_interpreter_is_a_spawn_error() {
        let cfg = ShellConfig {
            interpreter: PathBuf::from("/nonexistent/powershell.exe"),
            ..Default::default()
        };
        let backend = SubprocessBackend::new(cfg).unwrap();
        let err = backend.query_status(Path::new("a.xlsx")).await.unwrap_err();
        assert!(matches!(err, LabelError::Spawn { .. }));
    }
}
