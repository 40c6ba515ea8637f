//! Command-line interface
//!
//! Flags keep the single-dash spelling of existing monitoring command
//! definitions (`-addr`, `-tls-insecure=false`); [`normalize_args`] rewrites
//! them to the double-dash form before parsing.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, DEFAULT_ADDR, DEFAULT_JOB_FILE};

#[derive(Parser, Debug)]
#[command(name = "nomad-probe")]
#[command(about = "Submit a Nomad job and report its allocation status as a monitoring check", long_about = None)]
pub struct Cli {
    /// The address of the Nomad server
    #[arg(long, default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// TLS certificate to use when connecting to Nomad
    #[arg(long = "tls-cert", env = "NOMAD_CLIENT_CERT")]
    pub tls_cert: Option<String>,

    /// TLS key to use when connecting to Nomad
    #[arg(long = "tls-key", env = "NOMAD_CLIENT_KEY")]
    pub tls_key: Option<String>,

    /// TLS CA cert to use to validate the Nomad server certificate
    #[arg(long = "tls-ca-cert", env = "NOMAD_CACERT")]
    pub tls_ca_cert: Option<String>,

    /// Skip validation of the server certificate
    #[arg(
        long = "tls-insecure",
        env = "NOMAD_SKIP_VERIFY",
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        require_equals = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub tls_insecure: bool,

    /// Timeout for the test job, in seconds
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    pub timeout: i64,

    /// Path to the Nomad job file (HCL or JSON)
    #[arg(long, default_value = DEFAULT_JOB_FILE)]
    pub file: PathBuf,

    /// Only check whether this existing job ID is running
    #[arg(long)]
    pub check: Option<String>,

    /// ACL token
    #[arg(long, env = "NOMAD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Namespace of the job
    #[arg(long, env = "NOMAD_NAMESPACE")]
    pub namespace: Option<String>,

    /// Region of the job
    #[arg(long, env = "NOMAD_REGION")]
    pub region: Option<String>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            addr: cli.addr,
            tls_cert: non_empty(cli.tls_cert).map(PathBuf::from),
            tls_key: non_empty(cli.tls_key).map(PathBuf::from),
            tls_ca_cert: non_empty(cli.tls_ca_cert).map(PathBuf::from),
            tls_insecure: cli.tls_insecure,
            timeout: u64::try_from(cli.timeout).ok().map(Duration::from_secs),
            file: cli.file,
            check: non_empty(cli.check),
            token: non_empty(cli.token),
            namespace: non_empty(cli.namespace),
            region: non_empty(cli.region),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Rewrite single-dash long flags to the double-dash form
///
/// `-addr x` and `-timeout=5` become `--addr x` and `--timeout=5`. Only names
/// of known long flags are rewritten; values, short flags and everything after
/// a `--` terminator are passed through.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let command = Cli::command();
    let known: Vec<&str> = command
        .get_arguments()
        .filter_map(|arg| arg.get_long())
        .chain(["help"])
        .collect();

    let mut terminated = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || terminated {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                terminated = true;
                return arg;
            }

            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if known.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let args = std::iter::once("nomad-probe")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::try_parse_from(normalize_args(args)).unwrap().into()
    }

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let args = normalize_args(os(&["nomad-probe", "-addr", "http://nomad:4646", "-timeout=30"]));
        assert_eq!(
            args,
            os(&["nomad-probe", "--addr", "http://nomad:4646", "--timeout=30"])
        );
    }

    #[test]
    fn test_normalize_leaves_other_args() {
        let args = normalize_args(os(&[
            "nomad-probe",
            "--file",
            "job.nomad",
            "-unknown",
            "-h",
            "--",
            "-check",
        ]));
        assert_eq!(
            args,
            os(&["nomad-probe", "--file", "job.nomad", "-unknown", "-h", "--", "-check"])
        );
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    // Env fallbacks are exercised by the binary; these tests assume the
    // NOMAD_* variables are unset.
    #[test]
    fn test_go_style_flags() {
        let config = parse(&[
            "-addr",
            "https://nomad.service:4646",
            "-tls-cert",
            "/etc/nomad/cli.pem",
            "-tls-key",
            "/etc/nomad/cli-key.pem",
            "-tls-ca-cert",
            "/etc/nomad/ca.pem",
            "-tls-insecure",
            "-timeout",
            "30",
            "-file",
            "/etc/icinga/probe.nomad",
        ]);

        assert_eq!(config.addr, "https://nomad.service:4646");
        assert_eq!(config.tls_cert, Some(PathBuf::from("/etc/nomad/cli.pem")));
        assert_eq!(config.tls_ca_cert, Some(PathBuf::from("/etc/nomad/ca.pem")));
        assert!(config.tls_insecure);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.file, PathBuf::from("/etc/icinga/probe.nomad"));
        assert!(config.check_only().is_none());
        assert!(config.tls().is_some());
    }

    #[test]
    fn test_explicit_bool_value() {
        let config = parse(&["-tls-insecure=false", "-check", "web"]);
        assert!(!config.tls_insecure);
        assert_eq!(config.check_only(), Some("web"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = parse(&["-check", "", "-tls-cert", ""]);
        assert!(config.check.is_none());
        assert!(config.tls_cert.is_none());
    }

    #[test]
    fn test_negative_timeout_is_accepted() {
        let config = parse(&["-timeout", "-1", "-check", "web"]);
        assert_eq!(config.timeout, None);
        assert_eq!(config.check_only(), Some("web"));

        let config = parse(&["-timeout=-5"]);
        assert_eq!(config.timeout, None);

        let config = parse(&["-timeout", "0"]);
        assert_eq!(config.timeout, Some(Duration::ZERO));
    }

    #[test]
    fn test_addr_ignores_environment() {
        let command = Cli::command();
        let addr = command
            .get_arguments()
            .find(|arg| arg.get_long() == Some("addr"))
            .unwrap();
        assert!(addr.get_env().is_none());
    }

    #[test]
    fn test_malformed_timeout_is_rejected() {
        let args = normalize_args(os(&["nomad-probe", "-timeout", "soon"]));
        let err = Cli::try_parse_from(args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
