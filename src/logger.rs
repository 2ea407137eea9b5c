/// Initializes the logging system from the default file `log4rs.yaml` in the
/// working directory. Prefer `configure_logging` for programmatic control.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let _ = log4rs::init_file("log4rs.yaml", log4rs::config::Deserializers::default());
    Ok(())
}

/// Configure logging globally for the process. If log4rs is already
/// initialized, this will replace the config.
/// - dir: base directory for logs; if None, current directory.
/// - level: error|warn|info|debug|trace
/// - retention: number of rolled files to keep (default 7)
pub fn configure_logging(
    dir: Option<&std::path::Path>,
    level: Option<&str>,
    retention: Option<usize>,
) {
    use log::LevelFilter;
    use log4rs::append::rolling_file::RollingFileAppender;
    use log4rs::append::rolling_file::policy::compound::{
        CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
    };
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;
    use std::path::PathBuf;
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let keep = retention.unwrap_or(7) as u32;
    let lvl = match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    let enc_pattern = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join("bridge.{}.log").display()), keep)
        .unwrap();
    let policy =
        CompoundPolicy::new(Box::new(SizeTrigger::new(10 * 1024 * 1024)), Box::new(roller));
    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(enc_pattern)))
        .build(base.join("bridge.log"), Box::new(policy))
        .unwrap();
    let config = Config::builder()
        .appender(Appender::builder().build("bridge", Box::new(appender)))
        .build(Root::builder().appender("bridge").build(lvl))
        .unwrap();
    let _ = log4rs::init_config(config);
}

/// Configure logging from environment variables if present:
/// - COREBRIDGE_LOG_DIR
/// - COREBRIDGE_LOG_LEVEL
/// - COREBRIDGE_LOG_RETENTION
pub fn configure_from_env() {
    let dir = std::env::var("COREBRIDGE_LOG_DIR").ok().map(std::path::PathBuf::from);
    let level = std::env::var("COREBRIDGE_LOG_LEVEL").ok();
    let retention =
        std::env::var("COREBRIDGE_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    configure_logging(dir.as_deref(), level.as_deref(), retention);
}
