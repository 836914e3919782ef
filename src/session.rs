//! The interactive drill loop.
//!
//! One iteration generates a round, prints it, waits for a line of input and
//! reacts to it. End of input ends the session. Reconfiguring (`:item` or
//! `>args`) replaces the [`Settings`] value wholesale; a configuration error
//! is printed and the previous settings stay in effect.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::cli::{menu_item_args, DrillArgs, Settings};
use crate::drill_engine::{generate_round_with, Round};
use crate::input::{parse_line, Command};
use crate::menu::{split_args, Menu};
use crate::presentation::{answer_lines, problem_lines, round_json};

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

pub struct Session {
    settings: Settings,
    menu: Option<Menu>,
    rng: StdRng,
}

impl Session {
    pub fn new(settings: Settings, menu: Option<Menu>) -> Self {
        let rng = seeded_rng(settings.seed);
        Session { settings, menu, rng }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Generate the next round with the session's RNG.
    pub fn next_round(&mut self) -> Round {
        generate_round_with(&mut self.rng, &self.settings.config)
    }

    /// Drive the drill until `input` runs out.
    ///
    /// # Errors
    ///
    /// Only I/O errors on `input` or `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        let mut lines = input.lines();
        loop {
            let round = self.next_round();
            if let Some(failure) = &round.failure {
                writeln!(output, "\nError: {failure}")?;
            }
            for line in problem_lines(&round, &self.settings.display) {
                writeln!(output, "{line}")?;
            }
            output.flush()?;

            let Some(line) = lines.next() else {
                debug!("End of input");
                return Ok(());
            };
            let line = line.context("Failed to read answer")?;

            match parse_line(&line) {
                Command::Reveal => self.finish_round(&round, None, &mut output)?,
                Command::Guess(guess) => {
                    self.finish_round(&round, Some(guess.as_str()), &mut output)?
                }
                Command::ListMenu => self.list_menu(&mut output)?,
                Command::MenuItem(name) => self.switch_to_item(&name, &mut output)?,
                Command::Reconfigure(args) => self.reconfigure(&args, &mut output)?,
            }
        }
    }

    /// Show the answer unless `guess` is right, then the JSON dump if enabled.
    fn finish_round<W: Write>(
        &self,
        round: &Round,
        guess: Option<&str>,
        output: &mut W,
    ) -> Result<()> {
        match guess {
            Some(guess) if round.is_correct(guess) => info!("Correct: {}", guess),
            _ => {
                if let Some(guess) = guess {
                    info!("Wrong: {} (expected {})", guess, round.result_digits);
                }
                for line in answer_lines(round, &self.settings.display) {
                    writeln!(output, "{line}")?;
                }
            }
        }
        if self.settings.json {
            writeln!(output, "{}", round_json(round)?)?;
        }
        Ok(())
    }

    fn list_menu<W: Write>(&self, output: &mut W) -> Result<()> {
        match &self.menu {
            Some(menu) if !menu.is_empty() => {
                for line in menu.listing() {
                    writeln!(output, "{line}")?;
                }
            }
            _ => writeln!(output, "\nThere are no menu items")?,
        }
        Ok(())
    }

    fn switch_to_item<W: Write>(&mut self, name: &str, output: &mut W) -> Result<()> {
        match menu_item_args(self.menu.as_ref(), name, &self.settings.menu_file) {
            Ok(args) => {
                writeln!(output, "{:?}", self.item_words(name))?;
                self.apply(&args, output)
            }
            Err(err) => {
                writeln!(output, "\nError: {err}")?;
                Ok(())
            }
        }
    }

    fn item_words(&self, name: &str) -> Vec<String> {
        self.menu
            .as_ref()
            .and_then(|menu| menu.item(name).ok())
            .map(|item| split_args(&item.args))
            .unwrap_or_default()
    }

    fn reconfigure<W: Write>(&mut self, line: &str, output: &mut W) -> Result<()> {
        let mut args = match DrillArgs::try_parse_words(&split_args(line)) {
            Ok(args) => args,
            Err(err) => {
                writeln!(output, "\nError: {err}")?;
                return Ok(());
            }
        };

        if args.menu_file != self.settings.menu_file || self.menu.is_none() {
            match Menu::load_optional(&args.menu_file, args.menu_item.is_some()) {
                Ok(menu) => self.menu = menu,
                Err(err) => {
                    writeln!(output, "\nError: {err}")?;
                    return Ok(());
                }
            }
        }

        if let Some(name) = args.menu_item.clone() {
            match menu_item_args(self.menu.as_ref(), &name, &args.menu_file) {
                Ok(item_args) => args = item_args,
                Err(err) => writeln!(output, "\nError: {err}")?,
            }
        }
        self.apply(&args, output)
    }

    /// Swap in settings built from `args`, keeping the old ones on error.
    fn apply<W: Write>(&mut self, args: &DrillArgs, output: &mut W) -> Result<()> {
        match Settings::from_args(args) {
            Ok(settings) => {
                if settings.seed.is_some() {
                    self.rng = seeded_rng(settings.seed);
                }
                log::set_max_level(settings.log_level);
                info!(
                    "Reconfigured: {} in base {}, length {}",
                    settings.config.operator(),
                    settings.config.base(),
                    settings.config.length()
                );
                self.settings = settings;
            }
            Err(err) => {
                warn!("Keeping previous settings: {}", err);
                writeln!(output, "\nError: {err}")?;
            }
        }
        Ok(())
    }
}
