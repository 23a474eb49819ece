#[tokio::main]
async fn main() {
    amharic_corpus::start().await;
}
