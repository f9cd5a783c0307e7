/// Installs a terminal logger for the `debug!`/`trace!` output of the
/// reduction routines. Intended for binaries and test harnesses that
/// want to watch long computations; call once at startup.
pub fn init_simple_logger(l: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    use simplelog::*;

    let mut cb = simplelog::ConfigBuilder::new();
    cb.set_location_level(LevelFilter::Off);
    cb.set_target_level(LevelFilter::Off);
    cb.set_thread_level(LevelFilter::Off);
    cb.set_level_color(Level::Trace, Some(Color::Green));
    let config = cb.build();

    TermLogger::init(
        l,
        config,
        TerminalMode::Mixed,
        ColorChoice::Always
    )
}
