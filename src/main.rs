#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = manguezal_rust::run().await {
        eprintln!("manguezal-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
