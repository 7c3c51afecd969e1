mod cli;
mod handlers;

use anyhow::Result;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "buscollate";
}

fn main() -> Result<()> {
    let app = cli::build_parser();
    let matches = app.get_matches();

    handlers::run_collate(&matches)?;

    Ok(())
}
