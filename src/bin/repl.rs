use crossterm::style::Stylize;
use crossterm::{cursor, execute, terminal};
use std::io::{stdin, stdout, Write};
use std::path::Path;
use term_gate::persistence::load_vocabulary;
use term_gate::{GateConfig, GateResult, IndexKind, TermExtractor, Vocabulary};

const DEFAULT_VOCABULARY: &str = "vocabulary.json";

fn main() -> GateResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_VOCABULARY.to_string());
    let vocabulary = load_vocabulary(Path::new(&path))?;
    let mut config = GateConfig::default();
    let mut extractor = TermExtractor::from_config(&config, vocabulary.clone())?;
    let mut last: Option<String> = None;

    loop {
        print_ui(&config, &vocabulary, &extractor, last.as_deref())?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            ":trie" | ":dict" => {
                config.index = if cmd == ":trie" {
                    IndexKind::Trie
                } else {
                    IndexKind::DeletionDictionary
                };
                extractor = rebuild(&config, &vocabulary, extractor);
            }
            s if s.starts_with(":d ") => {
                if let Ok(n) = s[3..].trim().parse::<usize>() {
                    let previous = config.max_distance;
                    config.max_distance = n;
                    if config.validate().is_err() {
                        config.max_distance = previous;
                    } else {
                        extractor = rebuild(&config, &vocabulary, extractor);
                    }
                }
            }
            "" => {}
            s => last = Some(s.to_string()),
        }
    }
    Ok(())
}

fn rebuild(config: &GateConfig, vocabulary: &Vocabulary, current: TermExtractor) -> TermExtractor {
    match TermExtractor::from_config(config, vocabulary.clone()) {
        Ok(extractor) => extractor,
        Err(e) => {
            log::error!("rebuild failed: {}", e);
            current
        }
    }
}

fn print_ui(
    config: &GateConfig,
    vocabulary: &Vocabulary,
    extractor: &TermExtractor,
    text: Option<&str>,
) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    println!("{}", "Term Gate".bold());
    println!("---------------------------------------------------------------");
    println!(
        "{} terms | index: {:?} | max distance: {}",
        vocabulary.len(),
        config.index,
        config.max_distance
    );
    println!("Type text and press [Enter]. ':trie', ':dict', ':d N' to reconfigure, 'exit' to quit.\n");

    if let Some(text) = text {
        println!("Input:  {}", text);
        println!("Tokens: {:?}", extractor.tokens(text));
        let matched = extractor.matched_terms(text);
        if matched.is_empty() {
            println!("\n{}", "Gate closed: no vocabulary term nearby.".red());
        } else {
            println!("\n{}", "Gate open:".green());
            for (token, matches) in &matched {
                let shown: Vec<String> = matches
                    .iter()
                    .map(|m| format!("{} ({})", m.term, m.distance))
                    .collect();
                println!("  {} -> {}", token.as_str().yellow(), shown.join(", "));
            }
        }
    }
    print!("\n> ");
    out.flush()
}
