//! Command-line interface: arguments, confirmation prompt and the top-level run.

use std::io::{
    self,
    BufRead,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use clap::{
    ArgAction,
    Parser,
};
use thiserror::Error;

use crate::config::{
    ConfigError,
    ConfigManager,
    SyncSettings,
};
use crate::sync::{
    SyncError,
    SyncMode,
    Synchronizer,
};

/// Asked before anything is written unless `--force` is given.
pub const CONFIRMATION_PROMPT: &str = "This action could overwrite files. Consider backing up all \
                                       language files or using version control. Continue? [y/n]";

/// Add missing translation keys to target languages and remove keys the source no longer has.
///
/// Missing keys are filled with `__MISSING_TRANSLATION__`.
#[derive(Debug, Parser)]
#[command(name = "language-sync", version, about)]
pub struct Args {
    /// Language whose keys are authoritative, e.g. "en"
    pub source: String,

    /// Languages to align with the source
    #[arg(required = true, num_args = 1..)]
    pub targets: Vec<String>,

    /// Write without asking for confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Report what would change without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Directory containing the language files (overrides `langPath`)
    #[arg(long, value_name = "DIR")]
    pub lang_path: Option<PathBuf>,

    /// Settings file to use instead of `./.language-sync.json`
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug); `RUST_LOG` takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    #[must_use]
    pub const fn mode(&self) -> SyncMode {
        if self.dry_run { SyncMode::DryRun } else { SyncMode::Write }
    }

    /// Log filter used when `RUST_LOG` is not set.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Ask [`CONFIRMATION_PROMPT`] and read one line. Only `y` or `yes` confirms.
pub fn confirm(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{CONFIRMATION_PROMPT} ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Load settings, confirm, sync and print the report.
///
/// # Errors
/// Configuration problems and failed preconditions. Failures of single
/// resources are part of the report instead.
pub fn run(
    args: &Args,
    working_dir: &Path,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(), CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(working_dir, args.config.as_deref())?;
    match config_manager.config_path() {
        Some(path) => tracing::info!(path = %path.display(), "Using settings file"),
        None => tracing::info!("No settings file found, using defaults"),
    }

    if let Some(lang_path) = &args.lang_path {
        let settings = config_manager.get_settings().clone();
        config_manager.update_settings(SyncSettings { lang_path: lang_path.clone(), ..settings })?;
    }

    let mut settings = config_manager.get_settings().clone();
    settings.lang_path = working_dir.join(&settings.lang_path);
    tracing::debug!(lang_path = %settings.lang_path.display(), "Resolved languages root");

    let synchronizer = Synchronizer::new(&settings)?;
    synchronizer.check_languages(&args.source, &args.targets)?;

    let mode = args.mode();
    if mode == SyncMode::Write && !args.force && !confirm(input, output)? {
        writeln!(output, "Aborted, no files were changed.")?;
        return Ok(());
    }

    let report = synchronizer.sync(&args.source, &args.targets, mode)?;
    write!(output, "{report}")?;
    if report.has_failures() {
        tracing::warn!(failed = report.failures().count(), "Some resources could not be synced");
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::LangDir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("language-sync").chain(args.iter().copied())).unwrap()
    }

    #[rstest]
    #[case("y\n", true)]
    #[case("yes\n", true)]
    #[case("Y\n", true)]
    #[case(" yes \n", true)]
    #[case("n\n", false)]
    #[case("no\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    fn test_confirm(#[case] answer: &str, #[case] expected: bool) {
        let mut output = Vec::new();

        let confirmed = confirm(&mut Cursor::new(answer), &mut output).unwrap();

        assert_that!(confirmed, eq(expected));
        assert_that!(String::from_utf8(output).unwrap(), starts_with(CONFIRMATION_PROMPT));
    }

    #[googletest::test]
    fn test_parse_args() {
        let args = parse(&["en", "nl", "de", "--force", "-vv", "--lang-path", "resources/lang"]);

        expect_that!(args.source, eq("en"));
        expect_that!(args.targets, elements_are![eq("nl"), eq("de")]);
        expect_that!(args.force, eq(true));
        expect_that!(args.log_level(), eq("debug"));
        expect_that!(args.lang_path, some(eq(&PathBuf::from("resources/lang"))));
        expect_that!(args.mode(), eq(SyncMode::Write));
    }

    #[googletest::test]
    fn test_parse_requires_a_target() {
        let result = Args::try_parse_from(["language-sync", "en"]);

        expect_that!(result.is_err(), eq(true));
    }

    #[rstest]
    #[case(&[], "warn")]
    #[case(&["-v"], "info")]
    #[case(&["-vvv"], "debug")]
    fn test_log_level(#[case] flags: &[&str], #[case] expected: &str) {
        let mut argv = vec!["en", "nl"];
        argv.extend_from_slice(flags);

        assert_that!(parse(&argv).log_level(), eq(expected));
    }

    #[googletest::test]
    fn test_run_aborts_without_confirmation() {
        let project = LangDir::new();
        project.write("lang/en.json", r#"{"a": "A"}"#);
        let mut output = Vec::new();

        run(&parse(&["en", "nl"]), project.path(), &mut Cursor::new("n\n"), &mut output).unwrap();

        expect_that!(project.exists("lang/nl.json"), eq(false));
        expect_that!(String::from_utf8(output).unwrap(), contains_substring("Aborted"));
    }

    #[googletest::test]
    fn test_run_with_force_and_lang_path_override() {
        let project = LangDir::new();
        project.write("resources/lang/en.json", r#"{"a": "A"}"#);
        let mut output = Vec::new();

        run(
            &parse(&["en", "nl", "--force", "--lang-path", "resources/lang"]),
            project.path(),
            &mut Cursor::new(""),
            &mut output,
        )
        .unwrap();

        expect_that!(project.exists("resources/lang/nl.json"), eq(true));
        let rendered = String::from_utf8(output).unwrap();
        expect_that!(rendered, not(contains_substring(CONFIRMATION_PROMPT)));
        expect_that!(rendered, contains_substring("nl.json: created"));
    }

    #[googletest::test]
    fn test_run_checks_source_before_prompting() {
        let project = LangDir::new();
        let mut output = Vec::new();

        let result =
            run(&parse(&["it", "nl"]), project.path(), &mut Cursor::new("y\n"), &mut output);

        assert_that!(
            result,
            err(displays_as(eq("The given source language (it) does not exist.")))
        );
        expect_that!(output, is_empty());
    }

    #[googletest::test]
    fn test_run_reports_failed_resource_without_error() {
        let project = LangDir::new();
        project.write("lang/en.json", r#"{"a": "A"}"#);
        project.write("lang/en/auth.php", "<?php return ['failed' => 'Failed'];");
        project.write("lang/nl.json", "not json");
        let mut output = Vec::new();

        let result =
            run(&parse(&["en", "nl", "--force"]), project.path(), &mut Cursor::new(""), &mut output);

        assert_that!(result, ok(anything()));
        let rendered = String::from_utf8(output).unwrap();
        expect_that!(rendered, contains_substring("nl.json: failed"));
        expect_that!(rendered, contains_substring("1 failed"));
        expect_that!(project.read("lang/nl.json"), eq("not json"));
    }

    #[googletest::test]
    fn test_run_uses_config_file() {
        let project = LangDir::new();
        project.write(".language-sync.json", r#"{"langPath": "i18n"}"#);
        project.write("i18n/en/auth.php", "<?php return ['failed' => 'Failed'];");
        let mut output = Vec::new();

        run(&parse(&["en", "nl", "--force"]), project.path(), &mut Cursor::new(""), &mut output)
            .unwrap();

        expect_that!(
            project.read("i18n/nl/auth.php"),
            eq("<?php\n\nreturn [\n    'failed' => '__MISSING_TRANSLATION__',\n];\n")
        );
    }
}
