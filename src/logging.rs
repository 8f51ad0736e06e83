//! Thin logging setup. The library itself only ever calls the `log` macros
//! (`trace!`/`debug!`/`warn!` at plugin-load, descriptor-selection, and
//! segment-partitioning decision points); installing a backend is left to
//! the binary, mirroring how `dbalsom-fluxfox` keeps `log` in the library
//! and `env_logger` only in its CLI crates.

/// Installs `env_logger`, honoring `RUST_LOG`. Call once from `main`.
pub fn init_cli_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
