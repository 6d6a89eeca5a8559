use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecg_client::{BillingOrchestrator, ClientConfig, RequestParams};

#[derive(Parser)]
#[command(name = "ecg-client", version, about = "Check or top up an ECG prepaid meter")]
struct Cli {
    /// Print the parsed balance snapshot instead of the raw response
    #[arg(long, global = true)]
    parsed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the balance of a prepaid meter
    Balance { meter_number: String },
    /// Pay for a prepaid meter with mobile money
    Pay {
        meter_number: String,
        amount: String,
        mobile_number: String,
        network: String,
        voucher: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "ecg_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    info!("Using billing API at {}", config.endpoints.api_base);

    let orchestrator = BillingOrchestrator::new(&config)?;

    match cli.command {
        Command::Balance { meter_number } => {
            let params = RequestParams::for_balance(meter_number)?;
            let report = orchestrator.get_balance(&params).await?;
            if cli.parsed {
                println!("{:#?}", report.snapshot()?);
            } else {
                println!("{}", report.body);
            }
        }
        Command::Pay {
            meter_number,
            amount,
            mobile_number,
            network,
            voucher,
        } => {
            let params =
                RequestParams::for_payment(meter_number, mobile_number, network, voucher, &amount)?;
            let report = orchestrator.make_payment(&params).await?;
            println!("{}", report.combined_text());
        }
    }

    Ok(())
}
