use std::time::SystemTime;

use mandelfract::{
    CliController, PpmFilePresenter, UserAction, ViewerConfig, screenshot_path,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::default();
    let mut controller = CliController::new(&config, PpmFilePresenter::new())?;

    let duration = controller.render()?;
    log::info!("initial view rendered in {:?}", duration);

    controller.apply(UserAction::Pan { dx: -4, dy: 1 });
    let duration = controller.render()?;
    log::info!("panned view rendered in {:?}", duration);

    controller.write(screenshot_path(&config.screenshot_dir, SystemTime::now()))?;

    Ok(())
}
