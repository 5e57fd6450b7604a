//! Configuration loading helpers for the querylink CLI.
//!
//! Leading configuration flags are split off for `ortho-config` so the loader
//! only receives flags it understands, while clap parses the remaining output
//! option and query words.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use querylink_config::Config;

use crate::errors::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags (listed in `CONFIG_CLI_FLAGS`) must appear before
    /// the output option and the query. Later occurrences are left for clap,
    /// which rejects them as unknown options or treats them as query words.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        let Some(flag) = argument_text
            .strip_prefix("--")
            .and_then(|_| argument_text.split('=').next())
        else {
            return FlagAction::Skip;
        };
        let has_inline_value = argument_text.contains('=');

        if super::CONFIG_CLI_FLAGS.contains(&flag) {
            FlagAction::Include {
                needs_value: !has_inline_value,
            }
        } else {
            FlagAction::Skip
        }
    }
}

/// Program name plus configuration flags, and where the remaining arguments
/// begin.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some(program) = args.first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut filtered: Vec<OsString> = vec![program.clone()];
    let mut command_start = 1usize;
    let mut pending_value = false;

    for argument in args.iter().skip(1) {
        if pending_value {
            filtered.push(argument.clone());
            pending_value = false;
            command_start += 1;
            continue;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                filtered.push(argument.clone());
                command_start += 1;
                pending_value = needs_value;
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}

/// Rebuilds the argument list handed to clap: the program name followed by
/// everything after the configuration flags.
pub(crate) fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.iter().skip(split.command_start))
        .cloned()
        .collect()
}
