use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

use marquee::formatting::{self, Identity, Terminal};
use marquee::language::Config;
use marquee::parsing;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("marquee")
        .version(VERSION)
        .propagate_version(true)
        .about("Control directives and interpolations in line-oriented templates.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("control")
                .long("control")
                .global(true)
                .value_name("CHAR")
                .help("The character which begins a directive, as in ${if x}. Defaults to '$'."),
        )
        .arg(
            Arg::new("variable")
                .long("variable")
                .global(true)
                .value_name("CHAR")
                .help("The character which begins an interpolation, as in #{name}. Defaults to '#'."),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging to standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Syntax-check the given template")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the template you want to check. Use '-' to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Code format the given template")
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the template you want to format. Use '-' to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the tokens the given template parses into")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the tokens as JSON rather than one per line."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the template you want to tokenize. Use '-' to read from standard input."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match configure(&matches) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            std::process::exit(1);
        }
    };

    debug!(?config);

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = filename_from(submatches);
            info!("Checking {}", filename.display());

            let content = load_or_exit(filename);
            if let Err(error) = parsing::parse_line(&config, &content) {
                eprintln!("{}", error.full_details(filename));
                std::process::exit(1);
            }
        }
        Some(("format", submatches)) => {
            let filename = filename_from(submatches);
            info!("Formatting {}", filename.display());

            let raw_output = submatches.get_flag("raw-control-chars");

            let content = load_or_exit(filename);
            let tokens = match parsing::parse_line(&config, &content) {
                Ok(tokens) => tokens,
                Err(error) => {
                    eprintln!("{}", error.full_details(filename));
                    std::process::exit(1);
                }
            };

            let result = if raw_output || std::io::stdout().is_terminal() {
                formatting::render(&Terminal, &config, &tokens)
            } else {
                formatting::render(&Identity, &config, &tokens)
            };

            print!("{}", result);
        }
        Some(("tokens", submatches)) => {
            let filename = filename_from(submatches);
            info!("Tokenizing {}", filename.display());

            let content = load_or_exit(filename);
            let tokens = match parsing::parse_line(&config, &content) {
                Ok(tokens) => tokens,
                Err(error) => {
                    eprintln!("{}", error.full_details(filename));
                    std::process::exit(1);
                }
            };

            if submatches.get_flag("json") {
                match serde_json::to_string_pretty(&tokens) {
                    Ok(json) => println!("{}", json),
                    Err(error) => {
                        eprintln!("error: {}", error);
                        std::process::exit(1);
                    }
                }
            } else {
                for token in &tokens {
                    println!("{:?}", token);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: marquee [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

/// Build the parser configuration from the global options, each of which
/// must be exactly one character.
fn configure(matches: &ArgMatches) -> Result<Config, String> {
    let defaults = Config::default();

    let control = match matches.get_one::<String>("control") {
        Some(value) => single_char("control", value)?,
        None => defaults.control,
    };
    let variable = match matches.get_one::<String>("variable") {
        Some(value) => single_char("variable", value)?,
        None => defaults.variable,
    };

    if control == variable {
        return Err(format!(
            "the control and variable triggers must differ, both are '{}'",
            control
        ));
    }

    Ok(Config::new(control, variable))
}

fn single_char(option: &str, value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!(
            "--{} must be a single character, not '{}'",
            option, value
        )),
    }
}

fn filename_from(submatches: &ArgMatches) -> &Path {
    match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => Path::new("-"),
    }
}

fn load_or_exit(filename: &Path) -> String {
    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    }
}
