//! Explicit engine launch options.
//!
//! The launch configuration used to be communicated by mutating process
//! environment state; here it is a plain options structure built once, with
//! the two alternate-API-host variables read exactly at construction time.

use std::env;
use std::path::PathBuf;

/// Environment variable supplying the alternate plazma API host.
pub const PLAZMA_API_ENV: &str = "TD_PLAZMA_API";

/// Environment variable supplying the alternate presto API host.
pub const PRESTO_API_ENV: &str = "TD_PRESTO_API";

/// Alternate API hosts, only configured when both environment variables are
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHosts {
    /// REST API host derived from the client endpoint
    pub api: String,
    /// Plazma API host
    pub plazma: String,
    /// Presto API host
    pub presto: String,
}

/// Everything a backend needs to launch a session.
#[derive(Debug, Clone)]
pub struct EngineLaunchOptions {
    /// Local path of the engine runtime archive
    pub runtime_path: PathBuf,
    /// API key the session authenticates with
    pub apikey: String,
    /// Site region inferred from the endpoint
    pub site: String,
    /// Alternate API hosts, when configured
    pub api_hosts: Option<ApiHosts>,
}

impl EngineLaunchOptions {
    /// Build options for the given identity, reading the alternate API host
    /// variables from the process environment.
    pub fn build(runtime_path: PathBuf, apikey: &str, endpoint: &str) -> Self {
        Self::with_api_env(
            runtime_path,
            apikey,
            endpoint,
            env::var(PLAZMA_API_ENV).ok(),
            env::var(PRESTO_API_ENV).ok(),
        )
    }

    pub(crate) fn with_api_env(
        runtime_path: PathBuf,
        apikey: &str,
        endpoint: &str,
        plazma_api: Option<String>,
        presto_api: Option<String>,
    ) -> Self {
        let api_hosts = match (plazma_api, presto_api) {
            (Some(plazma), Some(presto)) => Some(ApiHosts {
                api: api_host(endpoint),
                plazma,
                presto,
            }),
            _ => None,
        };

        Self {
            runtime_path,
            apikey: apikey.to_string(),
            site: site_for_endpoint(endpoint).to_string(),
            api_hosts,
        }
    }

    /// Render as the engine's submit argument vector.
    pub fn submit_args(&self) -> Vec<String> {
        let mut args = vec![
            "--jars".to_string(),
            self.runtime_path.display().to_string(),
        ];
        push_conf(&mut args, format!("spark.td.apikey={}", self.apikey));
        push_conf(&mut args, format!("spark.td.site={}", self.site));
        if let Some(hosts) = &self.api_hosts {
            push_conf(&mut args, format!("spark.td.api.host={}", hosts.api));
            push_conf(&mut args, format!("spark.td.plazma_api.host={}", hosts.plazma));
            push_conf(&mut args, format!("spark.td.presto_api.host={}", hosts.presto));
        }
        push_conf(
            &mut args,
            "spark.serializer=org.apache.spark.serializer.KryoSerializer".to_string(),
        );
        push_conf(
            &mut args,
            "spark.sql.execution.arrow.enabled=true".to_string(),
        );
        args
    }
}

fn push_conf(args: &mut Vec<String>, conf: String) {
    args.push("--conf".to_string());
    args.push(conf);
}

/// Infer the site region from the endpoint host.
fn site_for_endpoint(endpoint: &str) -> &'static str {
    if endpoint.contains("eu01") {
        "eu01"
    } else if endpoint.contains(".co.jp") {
        "jp"
    } else {
        "us"
    }
}

/// Derive the REST API host from the endpoint: scheme and trailing slash
/// stripped.
fn api_host(endpoint: &str) -> String {
    let host = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .unwrap_or(endpoint);
    host.trim_end_matches('/').to_string()
}
