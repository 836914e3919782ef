use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::{info, warn};

use crate::drill_engine::{Base, ConfigError, OperandConfig, Operator};
use crate::menu::{split_args, Menu, MenuError, DEFAULT_MENU_FILE};
use crate::presentation::{DisplayOptions, SubscriptMode};
use crate::session::Session;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn parse_base(s: &str) -> Result<Base, ConfigError> {
    let radix: u32 = s.parse().map_err(|_| ConfigError::InvalidBase(s.to_string()))?;
    Base::try_from(radix)
}

fn parse_operator(s: &str) -> Result<Operator, ConfigError> {
    s.parse()
}

/// Arithmetic drill - prints random operands and checks your answer
#[derive(Parser, Debug, Clone)]
#[command(name = "arith_drill")]
#[command(
    about = "Prints random operands (in base 10 by default, or hex, binary, base 4, or octal) \
             to be added, subtracted, multiplied, or divided, then awaits your answer. \
             Just hit Enter to see the answer. Append a comma to type digits in reverse order; \
             everything before the last period is ignored."
)]
#[command(version)]
pub struct DrillArgs {
    /// Use an options package from the menu file and IGNORE ALL OTHER options
    #[arg(short = 't', long)]
    pub menu_item: Option<String>,

    /// Number base: 2, 4, 8, 10 or 16
    #[arg(short, long, default_value = "10", value_parser = parse_base)]
    pub base: Base,

    /// Same as -b 16 (overrides -b)
    #[arg(short = 'x', long)]
    pub hex: bool,

    /// Operation: * x . for multiplication, + for addition, - for subtraction,
    /// / for division; ++ (+++ ...) for addition with 3 (4 ...) addends
    #[arg(short, long, allow_hyphen_values = true, value_parser = parse_operator)]
    pub op: Option<Operator>,

    /// Length in digits of each operand (values below 1 count as 1)
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub length: i64,

    /// Digits that must appear at least once in some operand (overrides -d)
    #[arg(short, long, default_value = "")]
    pub required_digits: String,

    /// Digits allowed in operands (default: all, minus 0 and 1 where trivial)
    #[arg(short, long, default_value = "")]
    pub allowed_digits: String,

    /// Digits that cannot occur in operands (overrides -a)
    #[arg(short, long, default_value = "")]
    pub disallowed_digits: String,

    /// Digit pairing rules, e.g. 357:6ae,6ae:357
    #[arg(short = 'm', long = "match")]
    pub pattern: Option<String>,

    /// Treat 0 and 1 like any other digit
    #[arg(short = 'k', long)]
    pub allow_trivial: bool,

    /// Show rejected operands (-vv for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log level (default: warn)
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Show partial products for a missed multiplication
    #[arg(long)]
    pub show_work_multiplication: bool,

    /// Which base subscripts to show after numbers
    #[arg(long, value_enum, default_value = "some")]
    pub show_subscripts: SubscriptMode,

    /// Seed for reproducible problems
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also print every round as a line of JSON after it is answered
    #[arg(long)]
    pub json: bool,

    /// Menu file with named option packages
    #[arg(long, default_value = DEFAULT_MENU_FILE)]
    pub menu_file: PathBuf,
}

impl DrillArgs {
    /// Parse a full option list given as words, e.g. from a menu item or `>`.
    ///
    /// # Errors
    ///
    /// Returns the `clap` error for unknown or malformed options.
    pub fn try_parse_words<S: AsRef<str>>(words: &[S]) -> Result<Self, clap::Error> {
        let argv = std::iter::once("arith_drill").chain(words.iter().map(|w| w.as_ref()));
        DrillArgs::try_parse_from(argv)
    }

    pub fn effective_log_level(&self) -> log::LevelFilter {
        let requested = self.log_level.to_log_level_filter();
        let from_verbose = match self.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        requested.max(from_verbose)
    }
}

/// Everything a session needs, resolved from one set of options.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: OperandConfig,
    pub display: DisplayOptions,
    pub seed: Option<u64>,
    pub json: bool,
    pub log_level: log::LevelFilter,
    pub menu_file: PathBuf,
}

impl Settings {
    /// # Errors
    ///
    /// Any [`ConfigError`] from building the operand configuration.
    pub fn from_args(args: &DrillArgs) -> Result<Self, ConfigError> {
        let base = if args.hex { Base::Hex } else { args.base };
        let config = OperandConfig::builder(base, args.op.unwrap_or_default())
            .length(usize::try_from(args.length).unwrap_or(1))
            .required_digits(args.required_digits.as_str())
            .allowed_digits(args.allowed_digits.as_str())
            .disallowed_digits(args.disallowed_digits.as_str())
            .pattern(args.pattern.as_deref())
            .allow_trivial(args.allow_trivial)
            .build()?;

        Ok(Settings {
            config,
            display: DisplayOptions {
                subscripts: args.show_subscripts,
                show_work: args.show_work_multiplication,
            },
            seed: args.seed,
            json: args.json,
            log_level: args.effective_log_level(),
            menu_file: args.menu_file.clone(),
        })
    }
}

/// Options of the menu item `name`.
///
/// A `-t` inside the item itself is ignored.
///
/// # Errors
///
/// [`MenuError::NotFound`] without a menu, [`MenuError::NoSuchItem`] for an
/// unknown name, [`MenuError::BadArgs`] if the item's args do not parse.
pub fn menu_item_args(
    menu: Option<&Menu>,
    name: &str,
    menu_file: &Path,
) -> Result<DrillArgs, MenuError> {
    let menu = menu.ok_or_else(|| MenuError::NotFound(menu_file.to_path_buf()))?;
    let item = menu.item(name)?;
    let mut args = DrillArgs::try_parse_words(&split_args(&item.args)).map_err(|err| {
        MenuError::BadArgs {
            item: name.to_string(),
            message: err.to_string(),
        }
    })?;
    if args.menu_item.take().is_some() {
        warn!("Ignoring nested menu item in '{}'", name);
    }
    info!("Using menu item '{}': {}", name, item.title);
    Ok(args)
}

/// Initialize logging based on the provided log level
///
/// The logger itself lets everything through; the `log` max level does the
/// filtering so it can be changed when the session is reconfigured.
pub fn init_logging(level: log::LevelFilter) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .format_timestamp(None)
        .try_init()
        .context("Failed to initialise logging")?;
    log::set_max_level(level);
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let mut args = DrillArgs::parse();
    init_logging(args.effective_log_level())?;

    let menu = Menu::load_optional(&args.menu_file, args.menu_item.is_some())
        .context("Cannot load menu")?;

    if let Some(name) = args.menu_item.clone() {
        match menu_item_args(menu.as_ref(), &name, &args.menu_file) {
            Ok(item_args) => args = item_args,
            Err(err @ MenuError::NoSuchItem { .. }) => println!("\nError: {err}"),
            Err(err) => return Err(err).context("Invalid menu item"),
        }
        log::set_max_level(args.effective_log_level());
    }

    let settings = Settings::from_args(&args).context("Invalid configuration")?;
    info!(
        "Drilling {} in base {}, length {}",
        settings.config.operator(),
        settings.config.base(),
        settings.config.length()
    );

    let mut session = Session::new(settings, menu);
    session.run(io::stdin().lock(), io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_single_digit_decimal_multiplication() {
        let args = DrillArgs::try_parse_words::<&str>(&[]).unwrap();
        let settings = Settings::from_args(&args).unwrap();
        assert_eq!(settings.config.base(), Base::Decimal);
        assert_eq!(settings.config.operator(), Operator::Multiply);
        assert_eq!(settings.config.length(), 1);
        assert_eq!(settings.config.allowed_digits().to_string(), "23456789");
        assert_eq!(settings.display.subscripts, SubscriptMode::Some);
        assert_eq!(settings.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn hex_flag_overrides_base() {
        let args = DrillArgs::try_parse_words(&["-b", "8", "-x"]).unwrap();
        let settings = Settings::from_args(&args).unwrap();
        assert_eq!(settings.config.base(), Base::Hex);
    }

    #[test]
    fn operators_parse_including_hyphen_and_pluses() {
        let op = |s: &str| DrillArgs::try_parse_words(&["-o", s]).unwrap().op;
        assert_eq!(op("-"), Some(Operator::Subtract));
        assert_eq!(op("x"), Some(Operator::Multiply));
        assert_eq!(op("÷"), Some(Operator::Divide));
        assert_eq!(op("+"), Some(Operator::Add(2)));
        assert_eq!(op("+++"), Some(Operator::Add(4)));
        let pluses = "+".repeat(53);
        assert!(DrillArgs::try_parse_words(&["-o", pluses.as_str()]).is_err());
        assert!(DrillArgs::try_parse_words(&["-o", "%"]).is_err());
    }

    #[test]
    fn unsupported_base_is_rejected() {
        assert!(DrillArgs::try_parse_words(&["-b", "3"]).is_err());
    }

    #[test]
    fn non_numeric_base_is_reported_as_typed() {
        assert_eq!(parse_base("ten"), Err(ConfigError::InvalidBase("ten".to_string())));
        let err = DrillArgs::try_parse_words(&["-b", "ten"]).unwrap_err();
        assert!(err.to_string().contains("invalid base 'ten'"), "{err}");
    }

    #[test]
    fn lengths_below_one_are_clamped() {
        for length in ["0", "-2"] {
            let args = DrillArgs::try_parse_words(&["-l", length]).unwrap();
            let settings = Settings::from_args(&args).unwrap();
            assert_eq!(settings.config.length(), 1, "-l {length}");
        }
    }

    #[test]
    fn digit_options_are_validated_against_the_base() {
        let args = DrillArgs::try_parse_words(&["-b", "8", "-r", "9"]).unwrap();
        assert_eq!(
            Settings::from_args(&args).unwrap_err(),
            ConfigError::InvalidDigits { base: 8, digits: "9".to_string() }
        );
    }

    #[test]
    fn verbose_raises_log_level() {
        let args = DrillArgs::try_parse_words(&["-v"]).unwrap();
        assert_eq!(args.effective_log_level(), log::LevelFilter::Debug);
        let args = DrillArgs::try_parse_words(&["-vv"]).unwrap();
        assert_eq!(args.effective_log_level(), log::LevelFilter::Trace);
        let args = DrillArgs::try_parse_words(&["--log-level", "info"]).unwrap();
        assert_eq!(args.effective_log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn menu_item_args_replace_everything() {
        let menu = Menu::from_json(
            r#"{ "hex2": { "title": "Hex", "args": "-x -l 2 -t other" } }"#,
            Path::new("drill_menu.json"),
        )
        .unwrap();
        let path = Path::new("drill_menu.json");
        let args = menu_item_args(Some(&menu), "hex2", path).unwrap();
        assert!(args.hex);
        assert_eq!(args.length, 2);
        assert_eq!(args.menu_item, None);

        assert!(matches!(
            menu_item_args(Some(&menu), "nope", path),
            Err(MenuError::NoSuchItem { .. })
        ));
        assert!(matches!(menu_item_args(None, "hex2", path), Err(MenuError::NotFound(_))));
    }
}
