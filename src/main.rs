use std::io;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use carlot::construct::Garage;
use carlot::menu::Menu;
use carlot::persist::PersistenceMode;
use carlot::settings::Settings;

// Diagnostics go to stderr and follow RUST_LOG, warnings only by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact())
        .init();
}

fn run() -> carlot::error::Result<()> {
    let settings = Settings::load()?;
    info!(source = %settings.source_file.display(), compatibility = ?settings.compatibility, "starting");
    let garage = Garage::new(PersistenceMode::File(settings.source_file))?;
    let stdin = io::stdin();
    let mut menu = Menu::new(garage, settings.compatibility, stdin.lock(), io::stdout(), io::stderr());
    menu.run()
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "carlot stopped");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
