use std::io;

use anyhow::Context;
use clap::Parser;

use quickbasket_cli::{Cli, Session};
use quickbasket_infra::open_store;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    quickbasket_observability::init(cli.log_format, "warn");

    let data_file = (!cli.in_memory).then_some(cli.data_file.as_path());
    let store = open_store(data_file, !cli.no_seed)?;
    tracing::debug!(data_file = ?data_file, "store opened");

    let mut session = Session::new(store);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session
        .run(&mut stdin.lock(), &mut stdout)
        .context("terminal i/o failed")
}
