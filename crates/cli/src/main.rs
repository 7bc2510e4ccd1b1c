use clap::Parser;
use dohgate_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dohgate")]
#[command(version)]
#[command(about = "dohgate - UDP DNS to DNS-over-HTTPS gateway with subnet-hint routing")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// UDP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Proxy IP advertised for listed domains
    #[arg(short = 'i', long = "ip", value_name = "IP")]
    proxy_ip: Option<String>,

    /// Domain list file, one suffix per line
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    domain_file: Option<String>,

    /// Public IP advertised for everything else (skips discovery)
    #[arg(long, value_name = "IP")]
    public_ip: Option<String>,

    /// Pre-resolved DoH resolver address (skips bootstrap lookup)
    #[arg(long, value_name = "IP")]
    upstream_ip: Option<String>,

    /// Maximum concurrent upstream calls
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short = 'd', long)]
    debug: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            port: self.port,
            bind_address: self.bind.clone(),
            proxy_ip: self.proxy_ip.clone(),
            public_ip: self.public_ip.clone(),
            domain_file: self.domain_file.clone(),
            upstream_address: self.upstream_ip.clone(),
            max_concurrent: self.max_concurrent,
            log_level: self.log_level.clone(),
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);

    info!("Starting dohgate v{}", env!("CARGO_PKG_VERSION"));

    let endpoints = bootstrap::resolve_endpoints(&config).await?;
    let domains = bootstrap::load_domains(&config);

    let services = di::DnsServices::new(&config, endpoints, domains)?;

    if let Err(e) = server::start_dns_server(config.bind_addr()?, services.handler).await {
        error!(error = %e, "DNS server error");
        return Err(e);
    }

    info!(
        abandoned = services.gate.in_flight(),
        "Server shutdown complete"
    );
    Ok(())
}
