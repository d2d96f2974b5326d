use anyhow::Result;
use ettv_dump::ConfigManager;
use ettv_dump::dump::{build_magnet, encode_tracker};

pub fn handle_magnet(
    config_manager: &ConfigManager,
    hash: String,
    title: Option<String>,
    extra_trackers: Vec<String>,
    no_default_trackers: bool,
) -> Result<()> {
    let mut trackers = if no_default_trackers {
        Vec::new()
    } else {
        config_manager.config().magnet.trackers.clone()
    };
    trackers.extend(extra_trackers.iter().map(|t| encode_tracker(t)));

    println!("{}", build_magnet(&hash, title.as_deref(), &trackers));
    Ok(())
}
