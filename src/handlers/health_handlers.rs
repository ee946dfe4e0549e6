pub async fn health_handler() -> String {
    "ok".to_string()
}
