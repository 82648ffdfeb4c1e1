use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable that overrides the CLI-selected log level.
const LOG_ENV_VAR: &str = "BURROWSTAT_LOG";

/// Initialize logging for the whole process.
///
/// `verbosity_level` is the difference between `-v` and `-q` occurrences
/// on the command line:
///
/// * `<= -2` = `OFF`
/// * `-1`    = `ERROR`
/// * `0`     = `WARN`
/// * `1`     = `INFO`
/// * `2`     = `DEBUG`
/// * `>= 3`  = `TRACE`
///
/// The `BURROWSTAT_LOG` environment variable, when set, wins over it.
pub fn init(verbosity_level: i8) {
    let default_level = match verbosity_level {
        i8::MIN..=-2 => LevelFilter::Off,
        -1 => LevelFilter::Error,
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        3..=i8::MAX => LevelFilter::Trace,
    };

    Builder::from_env(Env::default().filter_or(LOG_ENV_VAR, default_level.to_string()))
        .format_timestamp_millis()
        .init();
}
