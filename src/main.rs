use clap::Parser;
use pet_friends::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::AppArgs::parse();

    args.run().await
}
