use anyhow::Context;
use expense_core::{Config, Synchronizer, ViewModel};
use tracker::{logging, Session, UreqTransport};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(base_url = %config.base_url, reconcile = ?config.reconcile, "starting");

    let sync = Synchronizer::new(ViewModel::from_config(&config), UreqTransport::new());
    let mut session = Session::new(sync);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout)
}
