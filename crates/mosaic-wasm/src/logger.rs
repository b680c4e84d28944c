//! Browser console logging through `console_log`.

use log::{Level, LevelFilter};

/// Install the console logger. Later calls only change the level.
pub(crate) fn install(level: LevelFilter) {
    // Filtering happens in `set_max_level`. Repeat installs fail and are ignored
    let _ = console_log::init_with_level(Level::Trace);
    log::set_max_level(level);
}

/// Parse a level name from JS (`"debug"`, `"warn"`, ...). Unknown names fall back to info.
pub(crate) fn parse_level(name: Option<&str>) -> LevelFilter {
    name.and_then(|n| n.parse().ok()).unwrap_or(LevelFilter::Info)
}
