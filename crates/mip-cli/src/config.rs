use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use mip_exec::subprocess::ShellConfig;
use mip_observe::LoggerConfig;

use crate::cli::Cli;

/// Everything `mip-label` can be configured with.
///
/// Resolution order: command-line flag, then config file, then built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logger: LoggerConfig,
    pub shell: ShellConfig,
}

impl AppConfig {
    /// Load the config file named on the command line (if any) and apply flag overrides.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        cfg.apply_overrides(cli);
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config file '{}'", path.display()))
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(interpreter) = &cli.interpreter {
            self.shell.interpreter = interpreter.clone();
        }
        if !cli.interpreter_args.is_empty() {
            self.shell.interpreter_args = cli.interpreter_args.clone();
        }
        if let Some(encoding) = cli.encoding {
            self.shell.encoding = encoding;
        }
        if let Some(level) = &cli.log_level {
            self.logger.level = level.clone();
        }
        if let Some(format) = cli.log_format {
            self.logger.format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mip-label").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let cfg = AppConfig::resolve(&parse(&["config"])).unwrap();
        assert_eq!(cfg.shell, ShellConfig::default());
        assert_eq!(cfg.logger.level.as_str(), "warn");
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("mip.json");
        fs::write(
            &file,
            r#"{"shell": {"interpreter": "pwsh", "interpreter_args": ["-NoProfile"], "encoding": "utf-8"},
                "logger": {"level": "info"}}"#,
        )
        .unwrap();
        let file = file.to_string_lossy().into_owned();

        let cfg = AppConfig::resolve(&parse(&[
            "--config",
            &file,
            "--interpreter",
            "/usr/bin/pwsh",
            "--log-level",
            "debug",
            "config",
        ]))
        .unwrap();

        assert_eq!(cfg.shell.interpreter, PathBuf::from("/usr/bin/pwsh"));
        assert_eq!(cfg.shell.interpreter_args, vec!["-NoProfile".to_string()]);
        assert_eq!(cfg.shell.encoding.name(), "UTF-8");
        assert_eq!(cfg.logger.level.as_str(), "debug");
    }

    #[test]
    fn repeated_interpreter_args_replace_file_args() {
        let cfg = AppConfig::resolve(&parse(&[
            "--interpreter-arg",
            "-NoProfile",
            "--interpreter-arg",
            "-NonInteractive",
            "config",
        ]))
        .unwrap();
        assert_eq!(cfg.shell.interpreter_args, vec!["-NoProfile", "-NonInteractive"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let res = AppConfig::resolve(&parse(&["--config", "/nonexistent/mip.json", "config"]));
        assert!(res.is_err());
    }

    #[test]
    fn bad_encoding_flag_is_rejected_by_parser() {
        let res = Cli::try_parse_from(["mip-label", "--encoding", "klingon", "config"]);
        assert!(res.is_err());
    }
}
