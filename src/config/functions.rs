//! The impls and functions
//!
use std::{collections::HashMap, env, fs, io::Write, path::Path, str::FromStr, time::Duration};
use log::*;
use anyhow::{bail, Context, Result};
use itertools::Itertools;
use crate::config::{Config, ConfigOptions, DEFAULT_META_SERVERS, DEFAULT_PARALLEL, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_TOPOLOGY_TIMEOUT_MS, DEFAULT_COLLECT_TIMEOUT_MS, DEFAULT_FAIL_FAST};
use crate::perf_client::{CollectSettings, FailurePolicy};
use crate::perf_counter::{AggregationPolicy, DEFAULT_BLACKLIST};

impl Config {
    /// Resolves every setting from option, environment or default.
    ///
    /// The settings set by option or environment are added to `changed_options`, for [dotenv_writer].
    pub fn resolve(
        options: &ConfigOptions,
        changed_options: &mut HashMap<&'static str, String>,
    ) -> Result<Config>
    {
        let meta_servers: Vec<String> = set_option(&options.meta_servers, "KVSTATS_META_SERVERS", DEFAULT_META_SERVERS, changed_options)
            .split(',')
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(String::from)
            .collect();
        if meta_servers.is_empty() {
            bail!("no meta servers set");
        }

        let parallel: usize = parse_option(&options.parallel, "KVSTATS_PARALLEL", DEFAULT_PARALLEL, changed_options)?;
        if parallel == 0 {
            bail!("parallel must be at least 1");
        }
        let request_timeout_ms: u64 = parse_option(&options.request_timeout_ms, "KVSTATS_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS, changed_options)?;
        let topology_timeout_ms: u64 = parse_option(&options.topology_timeout_ms, "KVSTATS_TOPOLOGY_TIMEOUT_MS", DEFAULT_TOPOLOGY_TIMEOUT_MS, changed_options)?;
        let collect_timeout_ms: u64 = parse_option(&options.collect_timeout_ms, "KVSTATS_COLLECT_TIMEOUT_MS", DEFAULT_COLLECT_TIMEOUT_MS, changed_options)?;

        // the flag can only switch fail-fast on, otherwise the environment decides.
        let fail_fast_option = options.fail_fast.then(|| "true".to_string());
        let fail_fast: bool = parse_option(&fail_fast_option, "KVSTATS_FAIL_FAST", DEFAULT_FAIL_FAST, changed_options)?;

        let blacklist = set_option(&options.blacklist, "KVSTATS_BLACKLIST", DEFAULT_BLACKLIST, changed_options);
        let policy = AggregationPolicy::new(&blacklist)
            .with_context(|| format!("invalid blacklist regex: {}", blacklist))?;

        Ok(Config {
            meta_servers,
            request_timeout: Duration::from_millis(request_timeout_ms),
            collect: CollectSettings {
                parallel,
                topology_timeout: Duration::from_millis(topology_timeout_ms),
                collect_timeout: Duration::from_millis(collect_timeout_ms),
                failure_policy: if fail_fast { FailurePolicy::FailFast } else { FailurePolicy::Partial },
                policy,
            },
        })
    }
}

/// Returns the option if set, otherwise the environment variable `env_name` if set, otherwise the default.
pub fn set_option(
    option: &Option<String>,
    env_name: &'static str,
    default: &str,
    changed_options: &mut HashMap<&'static str, String>,
) -> String
{
    if let Some(value) = option {
        info!("{} set by option: using: {}", env_name, value);
        changed_options.insert(env_name, value.clone());
        return value.clone();
    }
    match env::var(env_name) {
        Ok(value) => {
            info!("{} set via environment: using: {}", env_name, value);
            changed_options.insert(env_name, value.clone());
            value
        }
        Err(_e) => {
            info!("{} not set: using default: {}", env_name, default);
            default.to_string()
        }
    }
}

fn parse_option<T>(
    option: &Option<String>,
    env_name: &'static str,
    default: &str,
    changed_options: &mut HashMap<&'static str, String>,
) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = set_option(option, env_name, default, changed_options);
    value.trim().parse::<T>()
        .with_context(|| format!("invalid value for {}: {}", env_name, value))
}

/// Writes the changed options to the dotenv file at `path`, if `write_dotenv` is set.
pub fn dotenv_writer(
    write_dotenv: bool,
    changed_options: &HashMap<&'static str, String>,
    path: &Path,
) -> Result<()>
{
    if !changed_options.is_empty() && write_dotenv {
        info!("Writing {}", path.display());
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Error writing dotenv file: {}", path.display()))?;

        for (key, value) in changed_options.iter().sorted() {
            file.write_all(format!("{}={}\n", key, value).as_bytes())?;
            info!("{}={}", key, value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ConfigOptions {
        ConfigOptions {
            meta_servers: Some("meta-1:34601, meta-2:34601,".to_string()),
            parallel: Some("4".to_string()),
            request_timeout_ms: Some("1000".to_string()),
            topology_timeout_ms: Some("2000".to_string()),
            collect_timeout_ms: Some("3000".to_string()),
            fail_fast: true,
            blacklist: Some("latency".to_string()),
        }
    }

    #[test]
    fn unit_resolve_from_options() {
        let mut changed_options = HashMap::new();
        let config = Config::resolve(&options(), &mut changed_options).unwrap();
        assert_eq!(config.meta_servers, vec!["meta-1:34601", "meta-2:34601"]);
        assert_eq!(config.request_timeout, Duration::from_secs(1));
        assert_eq!(config.collect.parallel, 4);
        assert_eq!(config.collect.topology_timeout, Duration::from_secs(2));
        assert_eq!(config.collect.collect_timeout, Duration::from_secs(3));
        assert_eq!(config.collect.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.collect.policy.blacklist.as_str(), "latency");
        assert_eq!(changed_options["KVSTATS_PARALLEL"], "4");
    }

    #[test]
    fn unit_resolve_rejects_invalid_values() {
        let mut changed_options = HashMap::new();
        let invalid = ConfigOptions { parallel: Some("many".to_string()), ..options() };
        assert!(Config::resolve(&invalid, &mut changed_options).is_err());
        let invalid = ConfigOptions { parallel: Some("0".to_string()), ..options() };
        assert!(Config::resolve(&invalid, &mut changed_options).is_err());
        let invalid = ConfigOptions { blacklist: Some("(".to_string()), ..options() };
        assert!(Config::resolve(&invalid, &mut changed_options).is_err());
        let invalid = ConfigOptions { meta_servers: Some(" , ".to_string()), ..options() };
        assert!(Config::resolve(&invalid, &mut changed_options).is_err());
    }

    #[test]
    fn unit_set_option_order() {
        let mut changed_options = HashMap::new();
        env::remove_var("KVSTATS_UNIT_SET_OPTION_ORDER");
        assert_eq!(set_option(&None, "KVSTATS_UNIT_SET_OPTION_ORDER", "default", &mut changed_options), "default");
        assert!(changed_options.is_empty());

        env::set_var("KVSTATS_UNIT_SET_OPTION_ORDER", "from-env");
        assert_eq!(set_option(&None, "KVSTATS_UNIT_SET_OPTION_ORDER", "default", &mut changed_options), "from-env");
        assert_eq!(changed_options["KVSTATS_UNIT_SET_OPTION_ORDER"], "from-env");

        let option = Some("from-option".to_string());
        assert_eq!(set_option(&option, "KVSTATS_UNIT_SET_OPTION_ORDER", "default", &mut changed_options), "from-option");
        assert_eq!(changed_options["KVSTATS_UNIT_SET_OPTION_ORDER"], "from-option");
        env::remove_var("KVSTATS_UNIT_SET_OPTION_ORDER");
    }

    #[test]
    fn unit_dotenv_writer() {
        let path = env::temp_dir().join(format!("kv_stats_unit_dotenv_writer_{}", std::process::id()));
        let changed_options = HashMap::from([
            ("KVSTATS_PARALLEL", "4".to_string()),
            ("KVSTATS_META_SERVERS", "meta-1:34601".to_string()),
        ]);

        dotenv_writer(false, &changed_options, &path).unwrap();
        assert!(!path.exists());

        dotenv_writer(true, &changed_options, &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(written, "KVSTATS_META_SERVERS=meta-1:34601\nKVSTATS_PARALLEL=4\n");
    }
}
