//! Logging infrastructure using `log` + `log4rs`.

mod consts;

pub use consts::*;

use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            policy::compound::{roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy},
            RollingFileAppender,
        },
    },
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use std::io::IsTerminal;
use std::path::PathBuf;

const CONSOLE_APPENDER: &str = "stderr";
const LOG_FILE_APPENDER: &str = "log_file";

/// Parsed filter expression, e.g. `"info,cipherpoll_core=debug,root=warn"`.
struct FilterSpec {
    app_level: LevelFilter,
    root_level: LevelFilter,
    module_levels: Vec<(String, LevelFilter)>,
}

/// Initialize the logger with optional file output.
///
/// The root level defaults to OFF: third-party crates stay silent unless
/// opted in with `<crate>=<level>` or a blanket `root=<level>`. Whitelisted
/// cipherpoll crates log at the requested app level (default INFO).
///
/// The logger is global; repeated calls are ignored. Console output goes to
/// stderr.
pub fn init_logger(log_dir: Option<&str>, filters: &str) {
    let spec = parse_filters(filters);

    let use_ansi = std::io::stderr().is_terminal();
    let console_pattern = if use_ansi { LOG_LINE_PATTERN_COLORED } else { LOG_LINE_PATTERN };

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(console_pattern)))
        .build();

    let mut config_builder = Config::builder().appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));
    let mut root_appenders: Vec<&str> = vec![CONSOLE_APPENDER];

    if let Some(dir) = log_dir.map(str::trim).filter(|s| !s.is_empty()) {
        let log_path = PathBuf::from(dir).join(LOG_FILE_NAME);
        let archive_pattern = PathBuf::from(dir).join(format!("{LOG_FILE_NAME}.{{}}.gz"));

        let roller = FixedWindowRoller::builder()
            .base(1)
            .build(archive_pattern.to_str().unwrap_or("cipherpoll.log.{}.gz"), LOG_FILE_MAX_ROLLS)
            .unwrap();
        let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(LOG_FILE_MAX_SIZE)), Box::new(roller));

        let file_appender = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN)))
            .build(log_path, Box::new(policy))
            .unwrap();

        config_builder = config_builder.appender(Appender::builder().build(LOG_FILE_APPENDER, Box::new(file_appender)));
        root_appenders.push(LOG_FILE_APPENDER);
    }

    let appender_names: Vec<String> = root_appenders.iter().map(|name| (*name).to_string()).collect();

    // Whitelist our crates at the app level unless the user set them explicitly.
    for crate_name in WHITELISTED_CRATES {
        if !spec.module_levels.iter().any(|(m, _)| m == *crate_name) {
            config_builder = config_builder
                .logger(Logger::builder().appenders(appender_names.clone()).additive(false).build(*crate_name, spec.app_level));
        }
    }

    for (module, level) in &spec.module_levels {
        config_builder =
            config_builder.logger(Logger::builder().appenders(appender_names.clone()).additive(false).build(module, *level));
    }

    let config = config_builder.build(Root::builder().appenders(root_appenders).build(spec.root_level)).unwrap();
    let _ = log4rs::init_config(config);
}

fn parse_filters(filters: &str) -> FilterSpec {
    let mut app_level = LevelFilter::Info;
    let mut root_level = LevelFilter::Off;
    let mut module_levels = Vec::new();

    for part in filters.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('=') {
            None => {
                if let Ok(level) = part.parse() {
                    app_level = level;
                }
            }
            Some((module, level_str)) => {
                let module = module.trim();
                let Ok(level) = level_str.trim().parse() else { continue };
                if module == "root" {
                    root_level = level;
                } else if !module.is_empty() {
                    module_levels.push((module.to_string(), level));
                }
            }
        }
    }

    FilterSpec { app_level, root_level, module_levels }
}
