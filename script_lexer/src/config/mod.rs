//! Configuration module for the script lexer
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{ConfigError, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SCRIPT_LEXER_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SCRIPT_LEXER_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_generated_constants_are_sane() {
        assert!(compile_time::file_processing::MAX_FILE_SIZE > 0);
        assert!(
            compile_time::file_processing::LARGE_FILE_THRESHOLD
                <= compile_time::file_processing::MAX_FILE_SIZE
        );
        assert!(compile_time::lexical::MAX_DIAGNOSTICS > 0);
        assert!(compile_time::logging::LOG_BUFFER_SIZE >= 100);
    }

    #[test]
    fn test_source_info() {
        assert!(super::build_info::source_info().ends_with(".toml"));
    }
}
