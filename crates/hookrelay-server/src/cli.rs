use clap::Parser;
use hookrelay_core::{RelayError, Result, proxy::Proxy};

/// Hookrelay - validate Git webhooks and forward them upstream
///
/// Every flag can also be set through the environment (or a `.env` file).
#[derive(Parser)]
#[command(name = "hookrelayd")]
#[command(version = hookrelay_core::VERSION)]
#[command(about = "Git webhook relay daemon", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOOKRELAY_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Base URL hooks are forwarded to (scheme defaults to http)
    #[arg(long, env = "HOOKRELAY_UPSTREAM_URL")]
    pub upstream_url: String,

    /// Comma-separated paths allowed to be relayed (empty allows all)
    #[arg(long, env = "HOOKRELAY_ALLOWED_PATHS", value_delimiter = ',')]
    pub allowed_paths: Vec<String>,

    /// Webhook vendor: github or gitlab
    #[arg(long, env = "HOOKRELAY_PROVIDER", default_value = "github")]
    pub provider: String,

    /// Shared webhook secret
    #[arg(long, env = "HOOKRELAY_SECRET", hide_env_values = true)]
    pub secret: String,
}

impl Cli {
    /// Allow-list entries, trimmed, with blanks dropped.
    pub fn allowed_paths(&self) -> Vec<String> {
        self.allowed_paths
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    }

    /// Validates the configuration and builds the relay.
    pub fn build_proxy(&self) -> Result<Proxy> {
        if self.listen.trim().is_empty() {
            return Err(RelayError::Configuration(
                "Cannot create Proxy with empty listen address".to_string(),
            ));
        }

        Proxy::new(
            &self.upstream_url,
            Some(self.allowed_paths()),
            &self.provider,
            &self.secret,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "HOOKRELAY_LISTEN",
        "HOOKRELAY_UPSTREAM_URL",
        "HOOKRELAY_ALLOWED_PATHS",
        "HOOKRELAY_PROVIDER",
        "HOOKRELAY_SECRET",
    ];

    fn with_env<F: FnOnce()>(values: &[(&str, &str)], f: F) {
        let vars: Vec<(&str, Option<&str>)> = VARS
            .iter()
            .map(|name| {
                let value = values
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| *v);
                (*name, value)
            })
            .collect();
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_flags() {
        with_env(&[], || {
            let cli = Cli::try_parse_from([
                "hookrelayd",
                "--upstream-url",
                "http://jenkins:8080",
                "--allowed-paths",
                "/github-webhook, /project/",
                "--provider",
                "gitlab",
                "--secret",
                "s3cret",
            ])
            .unwrap();

            assert_eq!(cli.listen, "0.0.0.0:8080");
            assert_eq!(cli.allowed_paths(), vec!["/github-webhook", "/project/"]);

            let proxy = cli.build_proxy().unwrap();
            assert_eq!(proxy.provider_name(), "gitlab");
            assert_eq!(proxy.upstream_url(), "http://jenkins:8080");
        });
    }

    #[test]
    fn test_env_configuration() {
        with_env(
            &[
                ("HOOKRELAY_LISTEN", "127.0.0.1:9090"),
                ("HOOKRELAY_UPSTREAM_URL", "ci.internal"),
                ("HOOKRELAY_ALLOWED_PATHS", "/a,,/b"),
                ("HOOKRELAY_SECRET", "from-env"),
            ],
            || {
                let cli = Cli::try_parse_from(["hookrelayd"]).unwrap();

                assert_eq!(cli.listen, "127.0.0.1:9090");
                assert_eq!(cli.provider, "github");
                assert_eq!(cli.allowed_paths(), vec!["/a", "/b"]);
                assert!(cli.build_proxy().is_ok());
            },
        );
    }

    #[test]
    fn test_allowed_paths_default_to_allow_all() {
        with_env(
            &[
                ("HOOKRELAY_UPSTREAM_URL", "http://up"),
                ("HOOKRELAY_SECRET", "secret"),
            ],
            || {
                let cli = Cli::try_parse_from(["hookrelayd"]).unwrap();
                let proxy = cli.build_proxy().unwrap();

                assert!(proxy.allowed_paths().is_empty());
                assert!(proxy.is_path_allowed("/anything"));
            },
        );
    }

    #[test]
    fn test_missing_required_values() {
        with_env(&[("HOOKRELAY_SECRET", "secret")], || {
            assert!(Cli::try_parse_from(["hookrelayd"]).is_err());
        });
        with_env(&[("HOOKRELAY_UPSTREAM_URL", "http://up")], || {
            assert!(Cli::try_parse_from(["hookrelayd"]).is_err());
        });
    }

    #[test]
    fn test_blank_values_are_fatal() {
        with_env(
            &[
                ("HOOKRELAY_UPSTREAM_URL", "http://up"),
                ("HOOKRELAY_SECRET", "   "),
            ],
            || {
                let cli = Cli::try_parse_from(["hookrelayd"]).unwrap();
                let result = cli.build_proxy();
                assert!(matches!(result, Err(RelayError::Configuration(_))));
            },
        );
        with_env(
            &[
                ("HOOKRELAY_LISTEN", " "),
                ("HOOKRELAY_UPSTREAM_URL", "http://up"),
                ("HOOKRELAY_SECRET", "secret"),
            ],
            || {
                let cli = Cli::try_parse_from(["hookrelayd"]).unwrap();
                let result = cli.build_proxy();
                assert!(matches!(result, Err(RelayError::Configuration(_))));
            },
        );
    }
}
