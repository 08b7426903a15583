use emotion_wordclouds::utils::{goemotions_ekman_manifest, ModelHub};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let hub = ModelHub::with_default_dir();
    hub.ensure(&goemotions_ekman_manifest()).await?;
    println!("Models ready!");
    Ok(())
}
