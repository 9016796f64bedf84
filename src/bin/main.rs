use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use term_gate::{GateConfig, TermExtractor, TermMatch};

const USAGE: &str = "usage: term_gate <vocabulary.json> [config.json]";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(vocab_path) = args.next().map(PathBuf::from) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let config = match args.next() {
        Some(path) => match GateConfig::from_file(&PathBuf::from(path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GateConfig::default(),
    };

    let extractor = match TermExtractor::from_vocabulary_file(&config, &vocab_path) {
        Ok(extractor) => extractor,
        Err(e) => {
            log::error!("could not build index: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serve(&extractor) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("i/o failure: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// One command per line on stdin, one reply per line on stdout:
///   LOOKUP <text>  -> MATCH true|false
///   TERMS <text>   -> TERMS <json of [token, [{term, distance}]] pairs>
///   EXIT
fn serve(extractor: &TermExtractor) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        log::debug!("<- {:?}", input);
        let (command, text) = input
            .split_once(' ')
            .unwrap_or((input.as_str(), ""));

        match command {
            "LOOKUP" => {
                writeln!(stdout, "MATCH {}", extractor.lookup(text))?;
            }
            "TERMS" => {
                writeln!(stdout, "{}", terms_reply(&extractor.matched_terms(text)))?;
            }
            "EXIT" => break,
            "" => continue,
            other => {
                log::warn!("unknown command {:?}", other);
                writeln!(stdout, "ERROR unknown command")?;
            }
        }
        stdout.flush()?;
    }
    log::info!("shutting down");
    Ok(())
}

fn terms_reply(matched: &[(String, Vec<TermMatch>)]) -> String {
    match serde_json::to_string(matched) {
        Ok(json) => format!("TERMS {}", json),
        Err(e) => {
            log::error!("could not encode matched terms: {}", e);
            "ERROR encoding failed".to_string()
        }
    }
}
