use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};

use emotion_wordclouds::config::{AppConfig, CONFIG_FILE};
use emotion_wordclouds::modules::cloud::{compose_grid, group_sentences, MaskSet, WordcloudRenderer};
use emotion_wordclouds::modules::emotion::EmotionClassifier;
use emotion_wordclouds::modules::sentences::load_sentences;
use emotion_wordclouds::utils::{goemotions_ekman_manifest, ModelHub};

/// Create word clouds of your emotional interactions with a friend
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to your unzipped chat export
    #[arg(short, long)]
    path: PathBuf,

    /// Name of the friend
    #[arg(short, long)]
    friend: String,

    /// Maximum number of sentences to process
    #[arg(short, long, default_value_t = 1000)]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE))?;

    let hub = ModelHub::with_default_dir();
    let model_dir = hub.ensure(&goemotions_ekman_manifest()).await?;

    println!("Loading sentences...");
    let sentences = load_sentences(&cli.path, &cli.friend, cli.limit, &mut rand::thread_rng())?;

    println!("Inferring emotions...");
    let mut classifier = EmotionClassifier::new(&model_dir)?;
    let labels = classifier.label_sentences(&sentences, &config.labeling)?;

    println!("Grouping sentences and labels...");
    let buckets = group_sentences(&sentences, &labels);

    println!("Creating wordclouds...");
    let masks = MaskSet::discover(&config.render.mask_dir)?;
    let renderer = WordcloudRenderer::new(config.render.clone());
    let clouds = renderer.render_all(&buckets, &masks)?;

    println!("Plotting wordclouds...");
    let grid = compose_grid(&clouds)?;
    grid.save(&config.output.file)?;
    println!("Wrote {}", config.output.file.display());

    Ok(())
}
