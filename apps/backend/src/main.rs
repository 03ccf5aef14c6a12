#[tokio::main]
async fn main() -> anyhow::Result<()> {
    protocol_review_backend::run().await
}
