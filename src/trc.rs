//! Tracing configuration and initialization.
//!
//! All log output goes to stderr so command output on stdout stays pipeable.

use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{
    EnvFilter,
    fmt::format::FmtSpan,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::term;

/// Filter used when neither `GITILES_BROWSE_LOG` nor `RUST_LOG` is set. Only our own `info` spans
/// get through, which drive the spinners; everything else is `warn` and up.
const DEFAULT_FILTER: &str = "warn,gitiles=info,gitiles_browse=info";

enum TrcMode {
    /// Plain, verbose logging with span timings.
    Plain,
    /// Compact logging with a spinner per in-flight fetch.
    Pretty,
}

pub struct Trc {
    mode: TrcMode,
    env_filter: EnvFilter,
}

impl Default for Trc {
    fn default() -> Self {
        let maybe_env_filter = EnvFilter::try_from_env("GITILES_BROWSE_LOG")
            .or_else(|_| EnvFilter::try_from_default_env());

        match maybe_env_filter {
            // An explicit filter selects plain output.
            Ok(env_filter) => Self {
                mode: TrcMode::Plain,
                env_filter,
            },
            Err(_) => Self {
                mode: TrcMode::Pretty,
                env_filter: EnvFilter::new(DEFAULT_FILTER),
            },
        }
    }
}

impl Trc {
    pub fn init(self) -> Result<(), TryInitError> {
        let use_color = term::should_use_color(&std::io::stderr());
        match self.mode {
            TrcMode::Plain => tracing_subscriber::registry()
                .with(self.env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(use_color)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .try_init(),
            TrcMode::Pretty => {
                let indicatif_layer = IndicatifLayer::new();
                tracing_subscriber::registry()
                    .with(self.env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(indicatif_layer.get_stderr_writer())
                            .with_ansi(use_color)
                            .with_target(false)
                            .without_time()
                            .compact(),
                    )
                    .with(indicatif_layer)
                    .try_init()
            }
        }
    }
}
