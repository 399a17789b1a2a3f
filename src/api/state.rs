use std::sync::Arc;

use crate::api::routes::demo::DemoHandler;
use crate::application::{with_custom_log, with_log, Timed, TracingFormat};
use crate::domain::ports::{Handler, LogSink};
use crate::infrastructure::{AccessLogConfig, Config};

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<dyn Handler>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Serves the demo handler, access-logged as `config` describes.
    pub fn new(config: Config) -> Self {
        let handler = decorate(DemoHandler, &config.access_log);
        Self {
            handler,
            config: Arc::new(config),
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = handler;
        self
    }
}

/// Wraps `handler` with the access log `config` selects.
pub fn decorate<H: Handler + 'static>(handler: H, config: &AccessLogConfig) -> Arc<dyn Handler> {
    if config.structured {
        return Arc::new(with_custom_log(handler, TracingFormat));
    }
    decorate_with_sink(handler, config, config.build_log_sink())
}

/// Line-format decoration writing to `sink` instead of the configured one.
pub fn decorate_with_sink<H: Handler + 'static>(
    handler: H,
    config: &AccessLogConfig,
    sink: Arc<dyn LogSink>,
) -> Arc<dyn Handler> {
    if config.timing {
        Arc::new(with_custom_log(handler, Timed::new(sink)))
    } else {
        Arc::new(with_log(handler, sink))
    }
}
