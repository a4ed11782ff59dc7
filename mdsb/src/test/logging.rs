use std::sync::Mutex;

lazy_static! {
    static ref MUTEX: Mutex<bool> = Mutex::new(false);
}

pub fn init_log() {
    let mut done = MUTEX.lock().unwrap();
    if !*done {
        use log::LevelFilter;
        use log4rs::{
            append::console::{ConsoleAppender, Target},
            config::{Appender, Config, Root},
            encode::pattern::PatternEncoder,
        };

        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new("{l:<5} {M} - {m}{n}")))
            .build();
        let config = Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Debug))
            .unwrap();

        log4rs::init_config(config).unwrap();
        *done = true;
    }
}
