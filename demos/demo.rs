//! Tour of the drill engine across operators and bases.
//!
//! Run with: `cargo run --example demo`
//!
//! Every round uses a fixed seed, so the output is reproducible.
//!
//! ## Key concepts demonstrated
//!
//! - `OperandConfig::builder(base, op)` plus the digit options (`required_digits`,
//!   `allowed_digits`, `disallowed_digits`) and a pairing `pattern`.
//! - `rng_seed: Some(u64)` makes a round fully deterministic.
//! - Rounds are rendered with the same layout the interactive binary uses.
//! - An impossible configuration still yields a round, with `failure` set.

use arith_drill_gen::presentation::{answer_lines, problem_lines, DisplayOptions, SubscriptMode};
use arith_drill_gen::{generate_round, Base, OperandConfig, Operator, RoundRequest};

/// Generate one round and print the problem followed by its answer.
fn print_round(title: &str, config: &OperandConfig, seed: u64, display: &DisplayOptions) {
    let round = generate_round(RoundRequest { config, rng_seed: Some(seed) });

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {title}  ID: {}", round.round_id);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if let Some(failure) = &round.failure {
        println!("  Error: {failure}");
    }
    for line in problem_lines(&round, display) {
        println!("  {line}");
    }
    for line in answer_lines(&round, display) {
        println!("  {line}");
    }
}

fn main() -> Result<(), arith_drill_gen::ConfigError> {
    let display = DisplayOptions::default();

    // ── One round per operator ───────────────────────────────────────────────
    println!();
    println!("══ Operators (base 10, length 2) ══");
    println!();

    for (op, seed) in [
        (Operator::Add(2),  101u64),
        (Operator::Add(4),  102),
        (Operator::Subtract, 103),
        (Operator::Multiply, 104),
        (Operator::Divide,   105),
    ] {
        let config = OperandConfig::builder(Base::Decimal, op).length(2).build()?;
        print_round(&format!("{op:?}"), &config, seed, &display);
    }

    // ── One round per base ───────────────────────────────────────────────────
    println!();
    println!("══ Bases (multiplication, length 3, all subscripts) ══");
    println!();

    let all_subscripts = DisplayOptions { subscripts: SubscriptMode::All, show_work: false };
    for (base, seed) in Base::ALL.into_iter().zip(200u64..) {
        let config = OperandConfig::builder(base, Operator::Multiply).length(3).build()?;
        print_round(&format!("base {base}"), &config, seed, &all_subscripts);
    }

    // ── Digit constraints ────────────────────────────────────────────────────
    println!();
    println!("══ Digit constraints ══");
    println!();

    let config = OperandConfig::builder(Base::Hex, Operator::Multiply)
        .length(2)
        .required_digits("b")
        .disallowed_digits("f")
        .pattern(Some("b:37,37:b"))
        .build()?;
    print_round("hex, b required, b pairs only with 3 and 7", &config, 301, &display);

    let config = OperandConfig::builder(Base::Decimal, Operator::Multiply)
        .length(3)
        .allowed_digits("789")
        .build()?;
    let work = DisplayOptions { subscripts: SubscriptMode::Some, show_work: true };
    print_round("decimal, digits 7-9, partial products shown", &config, 302, &work);

    // ── Infeasible ───────────────────────────────────────────────────────────
    println!();
    println!("══ Infeasible: three required digits, two one-digit operands ══");
    println!();

    let config = OperandConfig::builder(Base::Hex, Operator::Multiply)
        .required_digits("abc")
        .build()?;
    print_round("hex, abc required", &config, 401, &display);

    Ok(())
}
