use tracing_subscriber::EnvFilter;

/// HTTP plumbing crates capped at `warn` so `--log-level debug` stays readable.
const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

fn build_filter(level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = level.to_string();
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{}=warn", module));
    }
    EnvFilter::new(directives)
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_includes_noise_suppression() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let rendered = build_filter("debug").to_string();
        assert!(rendered.contains("reqwest=warn"));
        assert!(rendered.contains("debug"));
    }
}
