#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fundscan_lib::run().await
}
