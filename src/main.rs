use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    log::info!("starting orrery solar system viewer");
    let app = orrery::OrreryApp::new()?;
    app.run()?;

    Ok(())
}
