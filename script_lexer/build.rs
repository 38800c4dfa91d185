// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_diagnostics: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SCRIPT_LEXER_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SCRIPT_LEXER_CONFIG_DIR");

    let profile =
        env::var("SCRIPT_LEXER_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SCRIPT_LEXER_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of script_lexer directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}",
            config_path.display(),
            workspace_root.display(),
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("max_file_size exceeds absolute maximum");
    }

    if config.file_processing.large_file_threshold > config.file_processing.max_file_size {
        panic!("large_file_threshold must not exceed max_file_size");
    }

    if config.lexical.max_diagnostics == 0 {
        panic!("max_diagnostics must be at least 1");
    }

    if config.logging.log_buffer_size < 100 || config.logging.log_buffer_size > 100_000 {
        panic!("log_buffer_size must be within 100..=100000");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
    }}

    pub mod lexical {{
        pub const MAX_DIAGNOSTICS: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.lexical.max_diagnostics,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
