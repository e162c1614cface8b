// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads for meshing.
    pub worker_threads: usize,
    /// Tracing filter directive.
    pub log_filter: String,
    /// Human-readable multi-line log output instead of compact lines.
    pub pretty_logs: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            worker_threads: lookup("WORKER_THREADS")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or_else(num_cpus::get),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info,shape3d_cli=debug".into()),
            pretty_logs: lookup("SHAPE3D_PRETTY_LOGS")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
