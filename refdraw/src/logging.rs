/// Keeps the GPU stack's per-frame chatter out of the default output.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Installs `env_logger`. `RUST_LOG` replaces the default filter when set.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .init();
    log::debug!("logging initialized");
}
