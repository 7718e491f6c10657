use clap::Parser;
use tcplatency::report::{print_attempt, print_summary};
use tcplatency::util::parse_host_port;
use tcplatency::{Measurement, OutputFormat, ProbeConfig};

#[derive(Parser, Debug)]
#[command(name = "tcplatency", version, about = "tcplatency measures network latencies using tcp pings", long_about = None)]
struct Cli {
    /// Host to measure, optionally as host:port
    #[arg(value_name = "HOST")]
    target: Option<String>,
    /// The host address
    #[arg(long)]
    host: Option<String>,
    /// The host port [default: 443]
    #[arg(short, long)]
    port: Option<u16>,
    /// Timeout in seconds [default: 5]
    #[arg(short, long)]
    timeout: Option<u64>,
    /// Number of latency points to return [default: 5]
    #[arg(short, long)]
    runs: Option<usize>,
    /// Seconds to wait between each run [default: 1]
    #[arg(short, long)]
    wait: Option<u64>,
    /// JSON config file; flags override its values
    #[arg(long, env = "TCPLATENCY_CONFIG")]
    config: Option<String>,
    /// trace, debug, info, warn or error [default: warn]
    #[arg(long)]
    log_level: Option<String>,
    /// Output format [default: text]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl Cli {
    async fn into_config(self) -> anyhow::Result<ProbeConfig> {
        let mut config = match &self.config {
            Some(path) => ProbeConfig::load_file_config(path).await?,
            None => ProbeConfig::default(),
        };
        let m = &mut config.measurement;

        if let Some(host) = self.host {
            m.host = host;
        }
        if let Some(target) = self.target {
            let (host, port) = parse_host_port(&target);
            m.host = host;
            if let Some(port) = port {
                m.port = port;
            }
        }
        if let Some(port) = self.port {
            m.port = port;
        }
        if let Some(timeout) = self.timeout {
            m.timeout_secs = timeout;
        }
        if let Some(runs) = self.runs {
            m.runs = runs;
        }
        if let Some(wait) = self.wait {
            m.wait_secs = wait;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not usage errors
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = cli.into_config().await?;
    let log_level = config.get_tracing_level()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()
                         .add_directive(format!("tcplatency={}", log_level.as_str().to_lowercase()).parse()?))
        .init();

    config.measurement.validate()?;

    let format = config.format;
    let host = config.measurement.host.clone();
    let mut measurement = Measurement::new(config.measurement);

    measurement.run(|attempt| print_attempt(attempt, format)).await;
    print_summary(&host, &measurement.result(), format);

    Ok(())
}
