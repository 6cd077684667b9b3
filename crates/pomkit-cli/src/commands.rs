//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pomkit: validate and query page-object definition sources
#[derive(Parser, Debug)]
#[command(name = "pomkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load config, locators and locale strings and report what was found
    Check(CheckArgs),

    /// Resolve one page element to its selector
    Locator(LocatorArgs),

    /// Print the locale strings of one page
    Strings(StringsArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Runtime configuration file
    #[arg(short, long, default_value = "custom.config.json")]
    pub config: PathBuf,

    /// Directory of locator definition files
    #[arg(long, default_value = "locators")]
    pub locators: PathBuf,

    /// Directory of locale string files
    #[arg(long, default_value = "locale-strings")]
    pub strings: PathBuf,

    /// Override the configured platform
    #[arg(long)]
    pub platform: Option<PlatformArg>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormatArg,
}

/// Arguments for the locator command
#[derive(Parser, Debug)]
pub struct LocatorArgs {
    /// Page name (e.g. homePage)
    pub page: String,

    /// Element name (e.g. heroBanner)
    pub element: String,

    /// Directory of locator definition files
    #[arg(long, default_value = "locators")]
    pub locators: PathBuf,

    /// Platform whose selector to resolve
    #[arg(long, default_value = "web")]
    pub platform: PlatformArg,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormatArg,
}

/// Arguments for the strings command
#[derive(Parser, Debug)]
pub struct StringsArgs {
    /// Locale tag (e.g. en-US)
    pub locale: String,

    /// Page name
    pub page: String,

    /// Directory of locale string files
    #[arg(long, default_value = "locale-strings")]
    pub strings: PathBuf,

    /// Print only this key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormatArg,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Detect from terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// Platform argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlatformArg {
    /// Web browser
    #[default]
    Web,
    /// Android app
    Android,
    /// iOS app
    Ios,
}

impl From<PlatformArg> for pomkit::Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Web => Self::Web,
            PlatformArg::Android => Self::Android,
            PlatformArg::Ios => Self::Ios,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_check_defaults() {
            let cli = Cli::try_parse_from(["pomkit", "check"]).unwrap();
            let Commands::Check(args) = cli.command else {
                panic!("expected check");
            };
            assert_eq!(args.config, PathBuf::from("custom.config.json"));
            assert_eq!(args.locators, PathBuf::from("locators"));
            assert_eq!(args.strings, PathBuf::from("locale-strings"));
            assert!(args.platform.is_none());
            assert_eq!(args.format, OutputFormatArg::Text);
        }

        #[test]
        fn test_locator_positionals() {
            let cli = Cli::try_parse_from([
                "pomkit",
                "locator",
                "homePage",
                "heroBanner",
                "--platform",
                "android",
            ])
            .unwrap();
            let Commands::Locator(args) = cli.command else {
                panic!("expected locator");
            };
            assert_eq!(args.page, "homePage");
            assert_eq!(args.element, "heroBanner");
            assert_eq!(pomkit::Platform::from(args.platform), pomkit::Platform::Android);
        }

        #[test]
        fn test_strings_key_and_format() {
            let cli = Cli::try_parse_from([
                "pomkit", "strings", "en-US", "homePage", "-k", "pageTitle", "--format", "json",
            ])
            .unwrap();
            let Commands::Strings(args) = cli.command else {
                panic!("expected strings");
            };
            assert_eq!(args.key.as_deref(), Some("pageTitle"));
            assert_eq!(args.format, OutputFormatArg::Json);
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::try_parse_from(["pomkit", "-vv", "--color", "never", "check"]).unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.color, ColorArg::Never);
            assert!(!cli.quiet);
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["pomkit"]).is_err());
        }
    }
}
