use std::io::{self, BufRead};
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;
use serde::Serialize;

use purify_core::{
    Bounds, Grammar, Grammars, Purified, Purifier, RawValue, SyntaxValidator, UnknownPurifier,
};

/// purify — total input purifiers for untrusted parameters
///
/// Canonicalize domains and email addresses, and validate scalar and text
/// values. Every rejected value falls back to the default.
#[derive(Parser)]
#[command(name = "purify", version, about, long_about = None)]
struct Cli {
    /// Suppress all output except errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a purifier over one or more values
    Check {
        /// Purifier name (kebab-case, or the camelCase API names)
        #[arg(value_parser = parse_purifier)]
        purifier: Purifier,
        /// Values to purify
        values: Vec<String>,
        /// Printed in place of each rejected value
        #[arg(long)]
        default: Option<String>,
        /// Parse each value as a JSON literal first (numbers, booleans, null)
        #[arg(long)]
        raw_json: bool,
        /// Lower bound for integer-in-range
        #[arg(long, allow_hyphen_values = true)]
        min: Option<i64>,
        /// Upper bound for integer-in-range
        #[arg(long, allow_hyphen_values = true)]
        max: Option<i64>,
        /// Also read values from stdin, one per line
        #[arg(long)]
        stdin: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Test values against a named grammar
    Grammar {
        /// Grammar name, e.g. email-ascii-strict
        grammar: Grammar,
        /// Candidates to test
        values: Vec<String>,
        /// Also read values from stdin, one per line
        #[arg(long)]
        stdin: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available purifiers and grammars
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

// ── Purifier names ─────────────────────────────────────────

/// Names whose camelCase spelling is not a plain rename of the canonical one
const ALIASES: [(&str, Purifier); 8] = [
    ("email", Purifier::EmailToAce),
    ("emailAddress", Purifier::EmailToAce),
    ("emailIdn", Purifier::EmailToUnicode),
    ("emailAddressIdn", Purifier::EmailToUnicode),
    ("domain", Purifier::DomainToAce),
    ("domainName", Purifier::DomainToAce),
    ("domainIdn", Purifier::DomainToUnicode),
    ("domainNameIdn", Purifier::DomainToUnicode),
];

fn parse_purifier(name: &str) -> Result<Purifier, UnknownPurifier> {
    if let Some((_, purifier)) = ALIASES.iter().find(|(alias, _)| *alias == name) {
        return Ok(*purifier);
    }
    name.parse::<Purifier>()
        .or_else(|_| kebab_case(name).parse::<Purifier>())
        .map_err(|_| UnknownPurifier(name.to_string()))
}

/// `nonEmptyAlphaNumeric` → `non-empty-alpha-numeric`
fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn aliases_of(purifier: Purifier) -> Vec<&'static str> {
    ALIASES
        .iter()
        .filter(|(_, p)| *p == purifier)
        .map(|(alias, _)| *alias)
        .collect()
}

// ── Output records ─────────────────────────────────────────

#[derive(Serialize)]
struct CheckReport {
    purifier: Purifier,
    accepted: usize,
    rejected: usize,
    results: Vec<CheckResult>,
}

#[derive(Serialize)]
struct CheckResult {
    input: String,
    accepted: bool,
    value: serde_json::Value,
}

#[derive(Serialize)]
struct GrammarReport {
    grammar: Grammar,
    matched: usize,
    unmatched: usize,
    results: Vec<GrammarResult>,
}

#[derive(Serialize)]
struct GrammarResult {
    input: String,
    matches: bool,
}

#[derive(Serialize)]
struct Listing {
    purifiers: Vec<PurifierEntry>,
    grammars: Vec<Grammar>,
}

#[derive(Serialize)]
struct PurifierEntry {
    name: Purifier,
    aliases: Vec<&'static str>,
    summary: &'static str,
}

// ── Commands ───────────────────────────────────────────────

struct CheckOptions {
    default: Option<String>,
    raw_json: bool,
    bounds: Bounds,
    json: bool,
    quiet: bool,
}

fn cmd_check(purifier: Purifier, values: &[String], options: &CheckOptions) -> i32 {
    let mut results = Vec::with_capacity(values.len());

    for input in values {
        let parsed;
        let raw = if options.raw_json {
            parsed = match serde_json::from_str::<serde_json::Value>(input) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("{} '{}' is not a JSON literal: {}", "error:".red(), input, e);
                    return 2;
                }
            };
            RawValue::from_json(&parsed)
        } else {
            RawValue::Text(input)
        };

        let outcome = purifier.apply_within(raw, options.bounds);
        debug!("{} {} -> {:?}", purifier, raw, outcome);
        results.push((input.clone(), outcome));
    }

    let rejected = results.iter().filter(|(_, o)| o.is_none()).count();

    if options.json {
        let report = CheckReport {
            purifier,
            accepted: results.len() - rejected,
            rejected,
            results: results
                .iter()
                .map(|(input, outcome)| CheckResult {
                    input: input.clone(),
                    accepted: outcome.is_some(),
                    value: match outcome {
                        Some(value) => value.to_json(),
                        None => options
                            .default
                            .clone()
                            .map(serde_json::Value::String)
                            .unwrap_or(serde_json::Value::Null),
                    },
                })
                .collect(),
        };
        print_json(&report);
    } else if !options.quiet {
        for (input, outcome) in &results {
            print_outcome(input, outcome.as_ref(), options.default.as_deref());
        }
    }

    if rejected == 0 {
        0
    } else {
        1
    }
}

fn print_outcome(input: &str, outcome: Option<&Purified>, default: Option<&str>) {
    match (outcome, default) {
        (Some(value), _) => println!("{}", value),
        (None, Some(default)) => {
            println!("{}", default);
            eprintln!("{} {}", "rejected:".yellow(), input);
        }
        (None, None) => eprintln!("{} {}", "rejected:".yellow(), input),
    }
}

fn cmd_grammar(grammar: Grammar, values: &[String], json: bool, quiet: bool) -> i32 {
    let grammars = Grammars::shared();
    let results: Vec<GrammarResult> = values
        .iter()
        .map(|input| GrammarResult {
            input: input.clone(),
            matches: grammars.matches(grammar, input),
        })
        .collect();
    let matched = results.iter().filter(|r| r.matches).count();
    let unmatched = results.len() - matched;

    if json {
        print_json(&GrammarReport {
            grammar,
            matched,
            unmatched,
            results,
        });
    } else if !quiet {
        for result in &results {
            if result.matches {
                println!("{} {}", "✓".green(), result.input);
            } else {
                println!("{} {}", "✗".red(), result.input);
            }
        }
    }

    if unmatched == 0 {
        0
    } else {
        1
    }
}

fn cmd_list(json: bool) -> i32 {
    if json {
        print_json(&Listing {
            purifiers: Purifier::ALL
                .into_iter()
                .map(|purifier| PurifierEntry {
                    name: purifier,
                    aliases: aliases_of(purifier),
                    summary: purifier.summary(),
                })
                .collect(),
            grammars: Grammar::ALL.to_vec(),
        });
        return 0;
    }

    println!("{}", "Purifiers:".bold());
    for purifier in Purifier::ALL {
        let aliases = aliases_of(purifier);
        if aliases.is_empty() {
            println!("  {:<34} {}", purifier.name(), purifier.summary());
        } else {
            println!(
                "  {:<34} {} (aliases: {})",
                purifier.name(),
                purifier.summary(),
                aliases.join(", ")
            );
        }
    }
    println!();
    println!("{}", "Grammars:".bold());
    for grammar in Grammar::ALL {
        println!("  {}", grammar);
    }
    0
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("{} failed to serialize output: {}", "error:".red(), e),
    }
}

/// Command-line values followed by stdin lines when requested
fn collect_values(mut values: Vec<String>, stdin: bool) -> io::Result<Vec<String>> {
    if stdin {
        for line in io::stdin().lock().lines() {
            values.push(line?);
        }
    }
    Ok(values)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let exit_code = match cli.command {
        Commands::Check {
            purifier,
            values,
            default,
            raw_json,
            min,
            max,
            stdin,
            json,
        } => match collect_values(values, stdin) {
            Ok(values) => cmd_check(
                purifier,
                &values,
                &CheckOptions {
                    default,
                    raw_json,
                    bounds: Bounds {
                        lower: min,
                        upper: max,
                    },
                    json,
                    quiet,
                },
            ),
            Err(e) => {
                eprintln!("{} cannot read stdin: {}", "error:".red(), e);
                2
            }
        },
        Commands::Grammar {
            grammar,
            values,
            stdin,
            json,
        } => match collect_values(values, stdin) {
            Ok(values) => cmd_grammar(grammar, &values, json, quiet),
            Err(e) => {
                eprintln!("{} cannot read stdin: {}", "error:".red(), e);
                2
            }
        },
        Commands::List { json } => cmd_list(json),
        Commands::Version => {
            println!(
                "purify {} (purify-core {})",
                env!("CARGO_PKG_VERSION"),
                purify_core::VERSION
            );
            0
        }
    };

    process::exit(exit_code);
}
