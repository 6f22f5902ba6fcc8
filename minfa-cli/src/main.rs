use clap::{Parser, Subcommand};
use minfa::dfa::{Dfa, DfaBuildError};
use minfa::rfa::Rfa;
use std::process::ExitCode;
use thiserror::Error;

/// Command-line front-end for the minfa toolkit: compile a regular
/// expression to its minimal DFA, or derive a regular expression for the
/// complement language.
#[derive(Debug, Parser)]
#[command(name = "minfa", version, about)]
struct MinfaArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a regular expression into the minimal equivalent DFA and
    /// print its textual description
    #[command(name = "reg_to_mindfa")]
    RegToMinDfa {
        /// The regular expression to compile
        regex: String,
    },
    /// Print a regular expression for the complement of the given one,
    /// relative to its own alphabet
    #[command(name = "reg_to_complement")]
    RegToComplement {
        /// The regular expression to complement
        regex: String,
    },
}

#[derive(Debug, Error)]
enum Error<'a> {
    #[error("malformed regex: {0}")]
    MalformedRegex(nom::error::Error<&'a str>),
    #[error(transparent)]
    UnsupportedSize(#[from] DfaBuildError),
}

/// Shared front half of both pipelines: parse, lower, determinize, minimize.
fn minimal_dfa(regex: &str) -> Result<Dfa, Error> {
    let parsed = minfa::parser::regex(regex).map_err(Error::MalformedRegex)?;
    let mut dfa = Dfa::try_from(parsed.to_nfa())?;
    dfa.minimize();
    Ok(dfa)
}

fn run(command: &Command) -> Result<String, Error> {
    match command {
        Command::RegToMinDfa { regex } => Ok(minimal_dfa(regex)?.dump()),
        Command::RegToComplement { regex } => {
            let mut dfa = minimal_dfa(regex)?;
            dfa.complement();
            Ok(Rfa::from(dfa.to_nfa()).into_regex())
        }
    }
}

fn main() -> ExitCode {
    // Exit code 1 on usage errors (clap's own default would be 2);
    // --help and --version still exit 0.
    let args = match MinfaArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
