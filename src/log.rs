use slog::{o, Discard, Drain, Logger};
use slog_async::{Async, OverflowStrategy};
use slog_term::{FullFormat, TermDecorator};

/// Terminal logger for harness code, writing to stderr so stdout stays free for results.
/// The channel blocks instead of dropping records when full; a benchmark report is
/// worthless with lines missing.
pub fn create_logger(for_module: &str) -> Logger {
    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator)
        .use_utc_timestamp()
        .use_original_order()
        .build()
        .fuse();
    let async_drain = Async::new(drain)
        .chan_size(1024)
        .overflow_strategy(OverflowStrategy::Block)
        .build()
        .fuse();
    Logger::root(
        async_drain,
        o!("component" => "PPGCore", "module" => for_module.to_string()),
    )
}

/// Logger that drops everything, the default for library types.
pub fn discard() -> Logger {
    Logger::root(Discard, o!())
}
