//! CLI argument parsing with clap.

use clap::{CommandFactory, Parser};
use std::ffi::OsString;

/// List and select cameras
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "cam", long_about = None)]
#[command(disable_help_flag = true, args_override_self = true)]
pub struct Options {
    /// Specify which camera to operate on
    #[arg(short, long, value_name = "camera")]
    pub camera: Option<String>,

    /// Display this help message
    #[arg(short, long)]
    pub help: bool,

    /// List all cameras
    #[arg(short, long)]
    pub list: bool,
}

/// Result of parsing the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Options parsed, proceed with the program.
    Run(Options),
    /// Usage was requested (or nothing was given). Holds the rendered help.
    Usage(String),
    /// The command line was malformed. Holds the rendered error.
    Invalid(String),
}

/// Parse `argv` (including the program name) into a [`ParseOutcome`].
///
/// Help is handled here rather than by clap so that it can be reported with
/// a failing exit status, the same as an empty command line.
pub fn parse_options<I, T>(argv: I) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

    let options = match Options::try_parse_from(&argv) {
        Ok(options) => options,
        Err(e) => return ParseOutcome::Invalid(e.render().to_string()),
    };

    if argv.len() <= 1 || options.help {
        return ParseOutcome::Usage(usage());
    }

    ParseOutcome::Run(options)
}

/// Render the usage message.
pub fn usage() -> String {
    Options::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(argv: &[&str]) -> Options {
        match parse_options(argv) {
            ParseOutcome::Run(options) => options,
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_no_arguments_is_usage() {
        assert!(matches!(parse_options(["cam"]), ParseOutcome::Usage(_)));
    }

    #[test]
    fn test_help_flag_is_usage() {
        assert!(matches!(parse_options(["cam", "--help"]), ParseOutcome::Usage(_)));
        assert!(matches!(parse_options(["cam", "-h"]), ParseOutcome::Usage(_)));
    }

    #[test]
    fn test_help_wins_over_other_flags() {
        let outcome = parse_options(["cam", "--list", "-c", "front", "-h"]);
        assert!(matches!(outcome, ParseOutcome::Usage(_)));
    }

    #[test]
    fn test_usage_lists_every_option() {
        let text = usage();
        assert!(text.contains("-c, --camera <camera>"));
        assert!(text.contains("Specify which camera to operate on"));
        assert!(text.contains("-h, --help"));
        assert!(text.contains("Display this help message"));
        assert!(text.contains("-l, --list"));
        assert!(text.contains("List all cameras"));
    }

    #[test]
    fn test_list_flag() {
        let options = run(&["cam", "--list"]);
        assert!(options.list);
        assert!(options.camera.is_none());

        let options = run(&["cam", "-l"]);
        assert!(options.list);
    }

    #[test]
    fn test_camera_option() {
        let options = run(&["cam", "--camera", "Integrated Camera"]);
        assert_eq!(options.camera.as_deref(), Some("Integrated Camera"));
        assert!(!options.list);

        let options = run(&["cam", "-c", "USB Webcam"]);
        assert_eq!(options.camera.as_deref(), Some("USB Webcam"));
    }

    #[test]
    fn test_combined_flags() {
        let options = run(&["cam", "-l", "-c", "front"]);
        assert_eq!(
            options,
            Options {
                camera: Some("front".to_string()),
                help: false,
                list: true,
            }
        );
    }

    #[test]
    fn test_repeated_list_flag() {
        let options = run(&["cam", "-l", "-l"]);
        assert!(options.list);

        let options = run(&["cam", "--list", "-l"]);
        assert!(options.list);
    }

    #[test]
    fn test_last_camera_wins() {
        let options = run(&["cam", "-c", "a", "-c", "b"]);
        assert_eq!(options.camera.as_deref(), Some("b"));

        let options = run(&["cam", "--camera", "front", "-l", "-c", "rear"]);
        assert_eq!(options.camera.as_deref(), Some("rear"));
        assert!(options.list);
    }

    #[test]
    fn test_usage_has_about_text() {
        assert!(usage().contains("List and select cameras"));
    }

    #[test]
    fn test_camera_requires_value() {
        assert!(matches!(
            parse_options(["cam", "--camera"]),
            ParseOutcome::Invalid(_)
        ));
    }

    #[test]
    fn test_unknown_option_is_invalid() {
        match parse_options(["cam", "--bogus"]) {
            ParseOutcome::Invalid(message) => assert!(message.contains("--bogus")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_positional_argument_is_invalid() {
        assert!(matches!(
            parse_options(["cam", "front"]),
            ParseOutcome::Invalid(_)
        ));
    }

    #[test]
    fn test_version_flag_is_not_accepted() {
        assert!(matches!(
            parse_options(["cam", "--version"]),
            ParseOutcome::Invalid(_)
        ));
    }
}
