use std::error::Error;

use dns::{DnsError, ResourceRecord};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod console;
mod resolve;

use cli_args::CliArgs;
use console::{Command, Console};
use resolve::{ResolveError, Resolver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: CliArgs = argh::from_env();
    let config = configuration::get_config(&args.config, &args.overrides())?;
    tracing::debug!("config: {:?}", config);

    let server_addr = config.dns.server_address();
    let resolver = Resolver::bind(server_addr, config.dns.timeout()).await?;
    println!("Client started, server: {}", server_addr);

    let mut console = Console::new(BufReader::new(tokio::io::stdin()));
    loop {
        match console.next_command().await? {
            Command::Stop => break,
            Command::Query(name_query) => report(resolver.resolve(name_query).await),
        }
    }

    Ok(())
}

fn report(result: Result<Vec<ResourceRecord>, ResolveError>) {
    match result {
        Ok(records) => {
            for r in records {
                println!("{} - {}", r.domain, r.rdata);
            }
        }
        Err(ResolveError::Dns(DnsError::QuestionMismatch)) => {
            println!("Received a response whose question does not match the one sent.")
        }
        Err(e) => println!("{}", e),
    }
}
