use ampcss_bin::css3::tokenizer::TokenType;
use ampcss_bin::css3::walker::Walker;
use ampcss_bin::css3::{tokenize, Css3};
use ampcss_bin::shared::char_stream::Location;
use ampcss_bin::validator::css_spec::CssSpec;
use ampcss_bin::validator::format::{render_error_message, render_validation_result};
use ampcss_bin::validator::result::ValidationError;
use ampcss_bin::validator::CssValidator;
use anyhow::{anyhow, Result};
use simple_logger::SimpleLogger;
use std::fs;
use std::io::Read;
use std::process::exit;

fn main() -> Result<()> {
    let matches = clap::Command::new("AMP CSS validator")
        .version("0.1.0")
        .arg(
            clap::Arg::new("file")
                .help("The stylesheet to validate, or - to read from stdin")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("profile")
                .help("The css spec profile to validate against")
                .short('p')
                .long("profile")
                .default_value("AMP"),
        )
        .arg(
            clap::Arg::new("spec")
                .help("Json file with css spec profiles to use instead of the built-in ones")
                .long("spec"),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("tokens")
                .help("Just print the tokens")
                .long("tokens")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("ast")
                .help("Print the parsed stylesheet before validating")
                .long("ast")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("json")
                .help("Print the validation result as json")
                .long("json")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("debug") {
        SimpleLogger::new().init()?;
    }

    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("no file given"))?
        .to_string();
    let profile = matches
        .get_one::<String>("profile")
        .map(String::as_str)
        .unwrap_or("AMP");

    let css = if file == "-" {
        let mut css = String::new();
        std::io::stdin().read_to_string(&mut css)?;
        css
    } else {
        fs::read_to_string(&file)?
    };

    if matches.get_flag("tokens") {
        print_tokens(&css);
        return Ok(());
    }

    let spec = match matches.get_one::<String>("spec") {
        Some(path) => CssSpec::from_file(profile, path)?,
        None => CssSpec::builtin(profile)?,
    };
    log::info!("validating {} against profile {}", file, spec.name);

    if matches.get_flag("ast") {
        let parsed = Css3::parse_str(&css, &spec.parser_config(Location::default()));
        Walker::new(&parsed.stylesheet).walk_stdout();
    }

    let result = CssValidator::new(spec).validate(&css);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in render_validation_result(&result, &file) {
            println!("{line}");
        }
        if let Some(error) = result.errors.first() {
            display_snippet(&css, error);
        }
    }

    if !result.is_pass() {
        exit(1);
    }

    Ok(())
}

/// Prints the lines around the error with a marker below the column
fn display_snippet(css: &str, error: &ValidationError) {
    let lines: Vec<&str> = css.lines().collect();
    let line_nr = error.line.saturating_sub(1);
    if line_nr >= lines.len() {
        return;
    }

    if error.col > 1000 {
        println!("Error is too far to the right to display.");
        return;
    }

    println!();
    let first = line_nr.saturating_sub(3);
    for (n, line) in lines.iter().enumerate().take(line_nr + 1).skip(first) {
        println!("{:<5}|{}", n + 1, line);
    }
    println!("     |{}^ {}", " ".repeat(error.col), render_error_message(error));

    for (n, line) in lines.iter().enumerate().skip(line_nr + 1).take(3) {
        println!("{:<5}|{}", n + 1, line);
    }
    println!();
}

fn print_tokens(css: &str) {
    for token in tokenize(css) {
        println!("{} {:?}", token.location, token.token_type);

        if token.token_type == TokenType::Eof {
            break;
        }
    }
}
