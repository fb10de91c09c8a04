use anyhow::Context;
use clap::Parser;
use page_trail::config::TrailConfig;
use std::path::PathBuf;

/// Page Trail - run the cursor trail headlessly and log the final frame
#[derive(Parser, Debug)]
#[command(name = "page-trail")]
#[command(version, about, long_about = None)]
struct Args {
    /// Trail configuration file (JSON)
    config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 300)]
    frames: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    page_trail::init_tracing();

    let config = match &args.config {
        Some(path) => TrailConfig::from_file(path)
            .with_context(|| format!("Failed to load trail config from {}", path.display()))?,
        None => TrailConfig::default(),
    };

    let styles = page_trail::run_demo(config, args.frames).await?;

    for (index, style) in styles.iter().enumerate() {
        tracing::info!(
            "point {:2}: transform={} opacity={} color={}",
            index,
            style.css_transform(),
            style.css_opacity(),
            style.css_color()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["page-trail"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.frames, 300);
    }

    #[test]
    fn test_args_config_and_frames() {
        let args = Args::try_parse_from(["page-trail", "trail.json", "--frames", "42"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("trail.json")));
        assert_eq!(args.frames, 42);
    }

    #[test]
    fn test_args_reject_bad_frame_count() {
        assert!(Args::try_parse_from(["page-trail", "--frames", "many"]).is_err());
    }
}
