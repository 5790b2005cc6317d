//! uadetect telemetry modules.

pub mod tracing {
    //! Tracing core rexport and utilities, for your convenience

    pub use ::tracing::*;

    pub use ::tracing_subscriber as subscriber;

    use ::tracing_subscriber::{
        EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
    };

    /// Install a global `fmt` subscriber, filtered by the `RUST_LOG` environment
    /// variable and falling back to `default_level` when it is not set.
    ///
    /// Logs are written as JSON lines when `json` is true.
    ///
    /// Returns an error when a global subscriber was already installed.
    pub fn try_init_subscriber(
        default_level: LevelFilter,
        json: bool,
    ) -> Result<(), crate::error::BoxError> {
        let filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();
        let registry = ::tracing_subscriber::registry().with(filter);
        if json {
            registry
                .with(::tracing_subscriber::fmt::layer().json())
                .try_init()?;
        } else {
            registry
                .with(::tracing_subscriber::fmt::layer())
                .try_init()?;
        }
        Ok(())
    }

}
