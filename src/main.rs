use anyhow::Context;
use std::path::PathBuf;
use unlock_indicator::logging;
use unlock_indicator::preview;
use unlock_indicator::settings::Settings;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args_os().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(Settings::default_path);
    let output = args.next().map(PathBuf::from);

    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug, settings.log_file.clone());
    tracing::info!(settings = %settings_path.display(), "rendering unlock indicator preview");

    let frame = preview::render(&settings, &preview::sample_state())?;
    let output = match output {
        Some(path) => path,
        None => {
            let dir = std::env::current_dir().context("resolve working directory")?;
            preview::default_output(&dir, chrono::Local::now())
        }
    };
    frame.save_png(&output)?;
    tracing::info!(path = %output.display(), "preview written");
    println!("{}", output.display());
    Ok(())
}
