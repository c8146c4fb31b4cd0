use log::LevelFilter;
use log4rs::{
    Config,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const LOG_SIZE_LIMIT: u64 = 10 * 1024 * 1024; // 10 MB

const LOG_FILE_COUNT: u32 = 3;

const DEFAULT_LOG_FILE_PATH: &str = "logs/mission-board.log";
const DEFAULT_LOG_ARCHIVE_PATTERN: &str = "logs/mission-board.{}.log.gz";

/// Info and above goes to stderr, debug and above to a size-rolled file.
pub fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    let file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string());
    let archive_pattern = std::env::var("LOG_ARCHIVE_PATTERN")
        .unwrap_or_else(|_| DEFAULT_LOG_ARCHIVE_PATTERN.to_string());

    let stderr_level = LevelFilter::Info;
    let file_level = LevelFilter::Debug;

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();

    let trigger = SizeTrigger::new(LOG_SIZE_LIMIT);
    let roller = FixedWindowRoller::builder().build(&archive_pattern, LOG_FILE_COUNT)?;
    let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

    let logfile = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")))
        .build(file_path, Box::new(policy))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(file_level)))
                .build("logfile", Box::new(logfile)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(stderr_level)))
                .build("stderr", Box::new(stderr)),
        )
        .build(
            Root::builder()
                .appender("logfile")
                .appender("stderr")
                .build(LevelFilter::Trace),
        )?;

    log4rs::init_config(config)?;
    Ok(())
}
