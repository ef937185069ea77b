use std::sync::Mutex;

use slog::Drain;
use slog::Fuse;
use slog::{Never, SendSyncRefUnwindSafeDrain};
use slog_async::Async;
use slog_json::Json;

pub use slog::{debug, error, info, o, trace, warn, Logger};

/// Builds the root logger: JSON lines on stderr, written from a
/// background thread. With the `env_logging` feature, records are
/// filtered through `RUST_LOG` first.
pub fn initialize_logger() -> Logger {
    let drain = Mutex::new(Json::default(std::io::stderr())).map(Fuse);

    #[cfg(feature = "env_logging")]
    let drain = slog_envlogger::new(drain).ignore_res();

    let drain = Async::new(drain).build().fuse();

    with_build_info(drain)
}

/// Roots a logger on `drain`, tagging every record with the build
/// metadata from `info`.
fn with_build_info<D>(drain: D) -> Logger
where
    D: SendSyncRefUnwindSafeDrain<Ok = (), Err = Never> + 'static + std::panic::UnwindSafe,
{
    Logger::root(
        drain,
        o!("version" => info::VERSION, "revision" => info::REVISION, "build_timestamp" => info::BUILD_TIMESTAMP),
    )
}
