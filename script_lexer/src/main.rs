use script_lexer::config::runtime::LexicalPreferences;
use script_lexer::config::RuntimeConfig;
use script_lexer::file_processor::{FileProcessingResult, FileProcessor};
use script_lexer::lexical::{LexicalAnalyzer, LexicalOutput};
use script_lexer::logging;
use script_lexer::utils::SourceMap;
use std::env;

/// Command-line options after the input path
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    json: bool,
    strict: bool,
    config_path: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input|-> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[2..]);

    let runtime_config = match &options.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };

    logging::config::init_runtime_preferences(runtime_config.logging.clone())?;
    logging::init_global_logging()?;

    let processor = FileProcessor::from_preferences(&runtime_config.file_processor);
    let loaded = if args[1] == "-" {
        processor.process_reader("<stdin>", std::io::stdin().lock())
    } else {
        processor.process_file(&args[1])
    };

    let file_result = match loaded {
        Ok(result) => result,
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(1);
        }
    };

    let (output, failed) = run_analysis(
        runtime_config.lexical.clone(),
        &file_result,
        options.strict,
    );

    print_tokens(&output, options.json)?;
    print_diagnostics(&file_result, &output);

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("Script Lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("DFA tokenizer for the scripting language");
    println!();
    println!("USAGE:");
    println!("    {} <input> [options]", program_name);
    println!("    {} - [options]          # Read from stdin", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --json              Print tokens as a JSON array");
    println!("    --strict            Exit with status 1 on any unrecognized character");
    println!("    --config FILE       Load runtime preferences from a TOML file");
    println!();
    println!("OUTPUT:");
    println!("    One token per line as KIND<tab>TEXT on stdout");
    println!("    Diagnostics with source context on stderr");
    println!();
    println!(
        "BUILD CONFIGURATION: {}",
        script_lexer::config::build_info::source_info()
    );
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => options.json = true,
            "--strict" => options.strict = true,
            "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Warning: --config requires a file path");
                }
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    options
}

/// Tokenize the loaded source. In strict mode unrecognized characters are
/// always reported and any of them fails the run.
fn run_analysis(
    mut preferences: LexicalPreferences,
    file_result: &FileProcessingResult,
    strict: bool,
) -> (LexicalOutput, bool) {
    if strict {
        preferences.report_unrecognized_characters = true;
    }

    let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
    let output = analyzer.tokenize_file_result(file_result);
    let failed = strict && output.has_diagnostics();
    (output, failed)
}

fn print_tokens(output: &LexicalOutput, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(&output.tokens)?);
    } else {
        for token in &output.tokens {
            println!("{}", token);
        }
    }
    Ok(())
}

fn print_diagnostics(file_result: &FileProcessingResult, output: &LexicalOutput) {
    if !output.has_diagnostics() {
        return;
    }

    let source_map = SourceMap::new(file_result.source.clone());
    for diagnostic in &output.diagnostics {
        eprint!(
            "{}",
            source_map.format_error(&diagnostic.span(), &diagnostic.to_string())
        );
    }

    if output.suppressed_diagnostics > 0 {
        eprintln!(
            "... {} more diagnostics suppressed",
            output.suppressed_diagnostics
        );
    }
    eprintln!(
        "{}: {} unrecognized character(s)",
        file_result.metadata.path.display(),
        output.diagnostics.len() + output.suppressed_diagnostics
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use script_lexer::file_processor::FileMetadata;
    use std::path::PathBuf;
    use std::time::Duration;

    fn loaded(source: &str) -> FileProcessingResult {
        FileProcessingResult {
            source: source.to_string(),
            metadata: FileMetadata {
                path: PathBuf::from("input.script"),
                size: source.len() as u64,
                line_count: source.lines().count(),
                modified: None,
            },
            processing_duration: Duration::ZERO,
        }
    }

    fn silent() -> LexicalPreferences {
        LexicalPreferences {
            report_unrecognized_characters: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_strict_fails_even_when_reporting_disabled() {
        let (output, failed) = run_analysis(silent(), &loaded("int a = 1;\n"), true);

        assert!(failed);
        assert_eq!(output.tokens.len(), 4);
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn test_non_strict_respects_reporting_preference() {
        let (output, failed) = run_analysis(silent(), &loaded("int a = 1;\n"), false);

        assert!(!failed);
        assert!(!output.has_diagnostics());
    }

    #[test]
    fn test_strict_passes_clean_input() {
        let (output, failed) = run_analysis(silent(), &loaded("a >= 1\n"), true);

        assert!(!failed);
        assert_eq!(output.tokens.len(), 3);
    }

    #[test]
    fn test_parse_options() {
        let args = vec![
            "--json".to_string(),
            "--strict".to_string(),
            "--config".to_string(),
            "lexer.toml".to_string(),
        ];

        let options = parse_options(&args);
        assert!(options.json);
        assert!(options.strict);
        assert_eq!(options.config_path.as_deref(), Some("lexer.toml"));
    }

    #[test]
    fn test_parse_options_ignores_unknown() {
        let options = parse_options(&["--verbose".to_string(), "--config".to_string()]);
        assert_eq!(options, CliOptions::default());
    }
}
