use {
    log::{Level, LevelFilter, Log, Metadata, Record},
    std::{
        fmt::Write as FmtWrite,
        io::Write,
        sync::{
            Once,
            atomic::{AtomicUsize, Ordering},
        },
        time::SystemTime,
    },
};

static LEVEL: AtomicUsize = AtomicUsize::new(Level::Info as usize);
static INSTALL: Once = Once::new();

pub fn install() {
    INSTALL.call_once(|| {
        let _ = log::set_logger(&Logger);
        log::set_max_level(LevelFilter::Info);
    });
}

pub fn set_level(level: Level) {
    LEVEL.store(level as usize, Ordering::Relaxed);
    log::set_max_level(level.to_level_filter());
}

struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() as usize <= LEVEL.load(Ordering::Relaxed)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut buf = String::new();
        let now = humantime::format_rfc3339_millis(SystemTime::now());
        let _ = match record.module_path() {
            Some(mp) => writeln!(buf, "[{} {:5} {}] {}", now, record.level(), mp, record.args()),
            _ => writeln!(buf, "[{} {:5}] {}", now, record.level(), record.args()),
        };
        let _ = std::io::stderr().lock().write_all(buf.as_bytes());
    }

    fn flush(&self) {
        // nothing
    }
}
