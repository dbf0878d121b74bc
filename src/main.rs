use std::process::ExitCode;

use clap::Parser;

use algovista::{App, Config, catalog, pipeline};

fn run(config: &Config) -> algovista::Result<()> {
    let settings = config.validate(&catalog())?;
    let mut app = App::new(settings);

    let handle = pipeline::mount(&mut app)?;
    let result = pipeline::run(&mut app);
    handle.unmount()?;
    Ok(result?)
}

fn main() -> ExitCode {
    let config = Config::parse();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("algovista: {e}");
            ExitCode::FAILURE
        }
    }
}
