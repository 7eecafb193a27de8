/// Masks a secret for logging, keeping only a short recognisable prefix
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if prefix.chars().count() == secret.chars().count() {
        "***".to_string()
    } else {
        format!("{}***", prefix)
    }
}
