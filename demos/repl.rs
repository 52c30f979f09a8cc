use std::{
    env,
    io::{self, Write},
    path::Path,
};

use symcorrect::{SpellChecker, SpellCheckerConfig, Verbosity};

const MAX_EDIT_DISTANCE: usize = 2;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let dict_path = env::args().nth(1).unwrap_or_else(|| "words_100k.txt".into());

    if !Path::new(&dict_path).exists() {
        eprintln!("Dictionary file not found: {}", dict_path);
        std::process::exit(1);
    }

    let config = SpellCheckerConfig::default().with_max_dictionary_edit_distance(MAX_EDIT_DISTANCE);
    let checker = SpellChecker::from_word_list_file(&dict_path, config)?;

    println!(
        "symcorrect REPL - dictionary: {}\ntype a phrase, :compound <phrase>, :segment <text>, :q to quit",
        dict_path
    );
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let line = input.trim();
        if line == ":q" {
            break;
        }

        if let Some(phrase) = line.strip_prefix(":compound ") {
            match checker.lookup_compound(phrase, MAX_EDIT_DISTANCE) {
                Ok(suggestions) => {
                    if let Some(best) = suggestions.first() {
                        println!("  {}  ->  {} (distance {})", phrase, best.term, best.distance);
                    }
                }
                Err(err) => eprintln!("error: {err}"),
            }
            continue;
        }

        if let Some(text) = line.strip_prefix(":segment ") {
            match checker.word_segmentation(text, None, None) {
                Ok(composition) => println!("  {}  ->  {}", text, composition.corrected_string),
                Err(err) => eprintln!("error: {err}"),
            }
            continue;
        }

        for token in line.split_whitespace() {
            let word = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if word.is_empty() {
                continue;
            }

            match checker.lookup(&word, Verbosity::Closest, Some(MAX_EDIT_DISTANCE), false, None, false) {
                Ok(suggestions) => {
                    if !suggestions.is_empty() {
                        let terms: Vec<_> = suggestions.into_iter().map(|s| s.term).collect();
                        println!("  {}  ->  {}", word, terms.join(", "));
                    }
                }
                Err(err) => eprintln!("error: {err}"),
            }
        }
    }
    Ok(())
}
