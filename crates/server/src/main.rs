#[tokio::main]
async fn main() -> anyhow::Result<()> {
    metagen_server::start().await
}
