//! `log` records → browser console, plus the panic hook.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        #[cfg(target_arch = "wasm32")]
        {
            let msg = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::info_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = line;
    }

    fn flush(&self) {}
}

fn format_record(record: &Record<'_>) -> String {
    format!("[qc {}] {}: {}", level_tag(record.level()), record.target(), record.args())
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

/// Parse a host-supplied level name; unknown names mean `warn`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Warn)
}

/// Install the console logger and panic hook once. Later calls only change
/// the level.
pub fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("QC WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" TRACE "), LevelFilter::Trace);
        assert_eq!(parse_level("loud"), LevelFilter::Warn);
        assert_eq!(parse_level(""), LevelFilter::Warn);
    }

    #[test]
    fn records_carry_level_and_target() {
        let line = format_record(
            &Record::builder()
                .level(Level::Warn)
                .target("engine")
                .args(format_args!("duplicate id {}", "a"))
                .build(),
        );
        assert_eq!(line, "[qc warn] engine: duplicate id a");
    }
}
