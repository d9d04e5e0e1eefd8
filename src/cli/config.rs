use crate::error::{CardError, Result};
use crate::settings::{load_settings, save_settings_to, settings_path};

pub fn run(init: bool) -> Result<()> {
    let path = settings_path();
    let settings = load_settings();
    if init {
        save_settings_to(&settings, &path)?;
        log::info!("wrote {}", path.display());
    }
    let json =
        serde_json::to_string_pretty(&settings).map_err(|e| CardError::Settings(e.to_string()))?;
    println!("{}", path.display());
    println!("{json}");
    Ok(())
}
