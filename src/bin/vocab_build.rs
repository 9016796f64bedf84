// Offline vocabulary build: merge harvested concept names into a vocabulary file.
// Run with: cargo run --bin vocab_build -- <names.txt|-> <out.json> [--merge existing.json] [--dedup N]
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use term_gate::persistence::{load_vocabulary, save_vocabulary};
use term_gate::vocabulary::dedup_near;
use term_gate::{GateConfig, GateError, GateResult, VocabularyBuilder};

struct Args {
    names: String,
    output: PathBuf,
    merge: Option<PathBuf>,
    dedup: Option<usize>,
}

fn parse_args() -> Option<Args> {
    let mut raw = std::env::args().skip(1);
    let names = raw.next()?;
    let output = PathBuf::from(raw.next()?);
    let mut args = Args { names, output, merge: None, dedup: None };
    while let Some(flag) = raw.next() {
        match flag.as_str() {
            "--merge" => args.merge = Some(PathBuf::from(raw.next()?)),
            "--dedup" => args.dedup = Some(raw.next()?.parse().ok()?),
            _ => return None,
        }
    }
    Some(args)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args() else {
        eprintln!("usage: vocab_build <names.txt|-> <out.json> [--merge existing.json] [--dedup N]");
        return ExitCode::from(2);
    };
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> GateResult<()> {
    let config = GateConfig::default();
    let mut builder = VocabularyBuilder::new(config.max_term_length);

    let reader: Box<dyn BufRead> = if args.names == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.names)?))
    };
    for line in reader.lines() {
        builder.add_name(&line?);
    }
    log::info!("harvested {} terms", builder.len());

    let mut vocabulary = builder.build();
    if let Some(existing) = &args.merge {
        vocabulary = vocabulary.merged(load_vocabulary(existing)?);
    }
    if let Some(max_distance) = args.dedup {
        term_gate::config::check_distance(max_distance)
            .map_err(|e| GateError::Config(format!("--dedup: {e}")))?;
        vocabulary = dedup_near(&vocabulary, max_distance)?;
    }

    save_vocabulary(&vocabulary, &args.output)
}
