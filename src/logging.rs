// Logger setup

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
///
/// `filter` uses `env_logger` syntax (e.g. "debug", "fshape=debug,wgpu=warn").
/// Without one, `RUST_LOG` is read, then `info` for this crate and `warn`
/// for everything else.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        builder(filter, rust_log.as_deref()).init();
        log::debug!("logging initialized");
    });
}

/// Logger builder for an explicit filter and the value of `RUST_LOG`, the
/// explicit filter winning.
fn builder(filter: Option<&str>, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = filter.or(rust_log) {
        builder.parse_filters(filter);
    } else {
        builder
            .filter_level(log::LevelFilter::Warn)
            .filter_module("fshape", log::LevelFilter::Info);
    }

    builder
}
