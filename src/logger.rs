use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{runtime::ConfigErrors, Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_APPENDER: &str = "stderr";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S%.3f)} {l} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    // no config file next to the process, e.g. library users and test runs
    if let Ok(config) = fallback_config() {
        let _ = log4rs::init_config(config);
    }
}

fn fallback_config() -> Result<Config, ConfigErrors> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build(FALLBACK_APPENDER, Box::new(stderr)))
        .build(
            Root::builder()
                .appender(FALLBACK_APPENDER)
                .build(LevelFilter::Info),
        )
}
