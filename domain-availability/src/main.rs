//! Domain Availability CLI Application
//!
//! A command-line interface for checking domain availability through the
//! WhoisXMLAPI Domain Availability service, built on domain-availability-lib.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_availability_lib::{
    load_env_config, parse_timeout_string, AvailabilityChecker, CheckConfig, ConfigManager,
    ErrorPayload, API_KEY_ENV_VAR,
};
use std::process;
use std::time::Duration;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-availability
#[derive(Parser, Debug)]
#[command(name = "domain-availability")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check domain availability via the WhoisXMLAPI Domain Availability service")]
#[command(
    long_about = "Check whether domain names are available for registration.\n\nQueries the WhoisXMLAPI Domain Availability API with the key from the DOMAIN_API_KEY environment variable. Supports concurrent checks and JSON output."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain names to check
    #[arg(value_name = "DOMAINS", help_heading = "Domain Selection")]
    pub domains: Vec<String>,

    /// Input file with domains (one per line, '#' for comments)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Domain Selection"
    )]
    pub file: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Enable colorful, formatted output
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Max concurrent checks (default: 10, max: 100)
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Timeout per check (e.g. "5s", "2m")
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Override the upstream API endpoint
    #[arg(long = "endpoint", value_name = "URL", help_heading = "Configuration")]
    pub endpoint: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Output preferences resolved from config file, environment and CLI args.
#[derive(Debug, Default)]
struct OutputPrefs {
    json: bool,
    pretty: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run_availability_check(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Route library tracing to stderr; RUST_LOG still wins when set.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    // Must have either domains or a file
    if args.domains.is_empty() && args.file.is_none() {
        return Err("You must specify domain names or a file with --file".to_string());
    }

    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > 100 {
            return Err("Concurrency must be between 1 and 100".to_string());
        }
    }

    if let Some(timeout) = &args.timeout {
        if parse_timeout_string(timeout).is_none() {
            return Err(format!(
                "Invalid timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout
            ));
        }
    }

    Ok(())
}

/// Main checking logic
async fn run_availability_check(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let (config, prefs) = build_config(&args)?;

    let domains = collect_domains(&args)?;
    if domains.is_empty() {
        return Err("No domains to check".into());
    }

    let checker = AvailabilityChecker::new(config)?;

    if prefs.json {
        run_json_check(&checker, &domains).await
    } else {
        run_streaming_check(&checker, &domains, &prefs).await
    }
}

/// Gather domains from positional args and an optional input file.
///
/// Inputs are forwarded to the upstream API verbatim; no format validation
/// beyond dropping empty lines and '#' comments in files.
fn collect_domains(args: &Args) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut domains = args.domains.clone();

    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read domains file '{}': {}", path, e))?;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            domains.push(line.to_string());
        }
    }

    Ok(domains)
}

/// Collect all results, then emit wire payloads as a JSON array.
///
/// Always an array, even for a single domain, so consumers parse the output
/// uniformly. Each failed domain serializes to the same generic error payload
/// the HTTP endpoint would return.
async fn run_json_check(
    checker: &AvailabilityChecker,
    domains: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let results = checker.check_domains(domains).await;

    let payloads: Vec<serde_json::Value> = results
        .into_iter()
        .map(|result| match result {
            Ok(result) => serde_json::to_value(&result),
            Err(e) => {
                tracing::warn!(error = %e, "check failed");
                serde_json::to_value(ErrorPayload::generic())
            }
        })
        .collect::<Result<_, _>>()?;

    println!("{}", serde_json::to_string_pretty(&payloads)?);

    Ok(())
}

/// Stream results to the terminal as they complete.
async fn run_streaming_check(
    checker: &AvailabilityChecker,
    domains: &[String],
    prefs: &OutputPrefs,
) -> Result<(), Box<dyn std::error::Error>> {
    use futures::StreamExt;

    if prefs.pretty {
        ui::print_header(domains.len(), checker.config().concurrency);
    }

    let total = domains.len();
    let mut completed = 0usize;
    let mut available_count = 0usize;
    let mut taken_count = 0usize;
    let mut failed_count = 0usize;

    let start_time = std::time::Instant::now();

    // Pair each future with its domain so failures keep their context
    let domain_futures = domains.iter().map(|domain| {
        let domain = domain.clone();
        let checker = checker.clone();
        async move {
            let result = checker.check_domain(&domain).await;
            (domain, result)
        }
    });

    let mut stream =
        futures::stream::iter(domain_futures).buffer_unordered(checker.config().concurrency);

    while let Some((domain, result)) = stream.next().await {
        completed += 1;
        let counter = if total > 1 {
            Some((completed, total))
        } else {
            None
        };

        match result {
            Ok(result) => {
                if result.available {
                    available_count += 1;
                } else {
                    taken_count += 1;
                }
                if prefs.pretty {
                    ui::print_result(&result, counter);
                } else {
                    ui::print_result_default(&result, counter);
                }
            }
            Err(e) => {
                failed_count += 1;
                tracing::warn!(%domain, error = %e, "check failed");
                if prefs.pretty {
                    ui::print_error(&domain, e.user_message(), counter);
                } else {
                    ui::print_error_default(&domain, e.user_message(), counter);
                }
            }
        }
    }

    if total > 1 {
        ui::print_summary(
            total,
            available_count,
            taken_count,
            failed_count,
            start_time.elapsed(),
        );
    }

    Ok(())
}

/// Build CheckConfig and output preferences from CLI arguments with config
/// file integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (DA_*)
/// 3. Local config file (./domain-availability.toml)
/// 4. Global config file (~/.domain-availability.toml)
/// 5. XDG config file (~/.config/domain-availability/config.toml)
/// 6. Built-in defaults
///
/// The API key comes from DOMAIN_API_KEY only; it is never stored in files.
fn build_config(args: &Args) -> Result<(CheckConfig, OutputPrefs), Box<dyn std::error::Error>> {
    let api_key = std::env::var(API_KEY_ENV_VAR)
        .map_err(|_| format!("Missing API key: set the {} environment variable", API_KEY_ENV_VAR))?;

    let mut config = CheckConfig::new(api_key);
    let mut prefs = OutputPrefs::default();

    // Step 1: config files (explicit --config or automatic discovery)
    let config_manager = ConfigManager::new(args.verbose);
    let file_config = if let Some(explicit_path) = &args.config {
        config_manager
            .load_file(explicit_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", explicit_path, e))?
    } else {
        config_manager.discover_and_load().unwrap_or_default()
    };

    if let Some(defaults) = file_config.defaults {
        if let Some(concurrency) = defaults.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout_str) = &defaults.timeout {
            if let Some(secs) = parse_timeout_string(timeout_str) {
                config = config.with_timeout(Duration::from_secs(secs));
            }
        }
        if let Some(endpoint) = defaults.endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(pretty) = defaults.pretty {
            prefs.pretty = pretty;
        }
    }

    // Step 2: environment variables (DA_*)
    let env_config = load_env_config(args.verbose);
    if let Some(concurrency) = env_config.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout_str) = &env_config.timeout {
        if let Some(secs) = parse_timeout_string(timeout_str) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
    }
    if let Some(endpoint) = env_config.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(pretty) = env_config.pretty {
        prefs.pretty = pretty;
    }
    if let Some(json) = env_config.json {
        prefs.json = json;
    }

    // Step 3: CLI arguments (highest precedence)
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout_str) = &args.timeout {
        if let Some(secs) = parse_timeout_string(timeout_str) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
    }
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if args.pretty {
        prefs.pretty = true;
    }
    if args.json {
        prefs.json = true;
    }

    Ok((config, prefs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            domains: vec!["example.com".to_string()],
            file: None,
            json: false,
            pretty: false,
            concurrency: None,
            timeout: None,
            endpoint: None,
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_validate_args_requires_input() {
        let mut args = base_args();
        args.domains.clear();
        assert!(validate_args(&args).is_err());

        args.file = Some("domains.txt".to_string());
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_concurrency_bounds() {
        let mut args = base_args();
        args.concurrency = Some(0);
        assert!(validate_args(&args).is_err());

        args.concurrency = Some(101);
        assert!(validate_args(&args).is_err());

        args.concurrency = Some(50);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_timeout_format() {
        let mut args = base_args();
        args.timeout = Some("abc".to_string());
        assert!(validate_args(&args).is_err());

        args.timeout = Some("10s".to_string());
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_collect_domains_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment line").unwrap();
        writeln!(file, "from-file.com").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  padded.com  ").unwrap();
        file.flush().unwrap();

        let mut args = base_args();
        args.file = Some(file.path().to_string_lossy().to_string());

        let domains = collect_domains(&args).unwrap();
        assert_eq!(domains, vec!["example.com", "from-file.com", "padded.com"]);
    }
}
