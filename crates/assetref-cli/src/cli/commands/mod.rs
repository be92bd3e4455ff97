//! CLI command handlers, one per file.

mod completions;
mod config;
mod defaults;
mod optimize;
mod probe;
mod resolve;
mod select;

pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use defaults::run_defaults;
pub use optimize::run_optimize;
pub use probe::run_probe;
pub use resolve::run_resolve;
pub use select::run_select;

use assetref_core::{AssetrefConfig, DefaultImageRole};

/// Fallback reference chosen by `--fallback` or `--role`, else the thumbnail default.
fn fallback_reference<'a>(
    cfg: &'a AssetrefConfig,
    fallback: Option<&'a str>,
    role: Option<DefaultImageRole>,
) -> &'a str {
    match (fallback, role) {
        (Some(f), _) => f,
        (None, Some(role)) => cfg.defaults.get(role),
        (None, None) => cfg.defaults.thumbnail(),
    }
}
