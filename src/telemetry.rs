use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::configuration::{LogFormat, LoggerSettings};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber.
///
/// The returned guard flushes the file appender on drop and must be held for
/// the lifetime of the process. Calling `init` again is a no-op.
pub fn init(settings: &LoggerSettings) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    // console layer for tracing-subscriber
    let console = console_layer(settings.format);

    // file appender layer for tracing-subscriber
    let (file, guard): (Option<BoxedLayer>, Option<WorkerGuard>) = match &settings.file {
        Some(file) => {
            let file_appender = tracing_appender::rolling::daily(&file.directory, &file.prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .json()
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let layers: Vec<BoxedLayer> = std::iter::once(console).chain(file).collect();

    if tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .is_err()
    {
        return None;
    }
    guard
}

fn console_layer(format: LogFormat) -> BoxedLayer {
    let layer = fmt::Layer::new().with_span_events(FmtSpan::CLOSE);
    match format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}
