
/// Routes `log` output to the test harness so rotation traces show up for failing tests.
pub(crate) fn init_logging() {
    // Every test calls this and only the first one can install the logger.
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}
