// ABOUTME: Entry point for the netkeys binary
// ABOUTME: Prints the keys of one entity, suitable for sshd's AuthorizedKeysCommand

use clap::Parser;
use netkeys_cli::Cli;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    netkeys_log::init(cli.verbose);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    netkeys_cli::run(&cli, &mut stdout, &mut stderr).await.into()
}
