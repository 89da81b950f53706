use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod call_cmd;

#[derive(Parser)]
#[command(name = "hermes", about = "Hermes CLI - call tools on a hermes server")]
struct Cli {
    /// Hermes server URL
    #[arg(long, env = "HERMES_URL", default_value = "http://localhost:4006")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the server's initialize descriptor
    Info,

    /// List all registered tools
    ListTools,

    /// Call a tool by name
    Call {
        /// Tool name
        name: String,

        /// Tool arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },
}

async fn get_json(url: &str) -> anyhow::Result<serde_json::Value> {
    let resp = reqwest::Client::new().get(url).send().await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await?;
        anyhow::bail!("Request failed ({status}): {body}");
    }
    Ok(resp.json().await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info => {
            let body = get_json(&format!("{}/mcp/initialize", cli.url)).await?;
            println!("{}", serde_json::to_string_pretty(&body["result"])?);
        }
        Commands::ListTools => {
            let body = get_json(&format!("{}/mcp/tools/list", cli.url)).await?;
            println!("{}", serde_json::to_string_pretty(&body["tools"])?);
        }
        Commands::Call { name, args } => {
            let arguments = call_cmd::parse_arguments(args.as_deref())?;
            call_cmd::run(&cli.url, &name, arguments).await?;
        }
    }

    Ok(())
}
