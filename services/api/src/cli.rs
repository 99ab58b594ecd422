use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fairhire::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FairHire",
    about = "Run the bias-reduced recruiting service or walk through a shortlist demo",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a seeded shortlist, its compliance outcome and the audit trail
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_flags_parse() {
        let cli = Cli::try_parse_from([
            "fairhire-api",
            "demo",
            "--jd",
            "jd-2",
            "--top-n",
            "1",
            "--override-reason",
            "Specialist role",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.jd, "jd-2");
                assert_eq!(args.top_n, Some(1));
                assert_eq!(args.override_reason.as_deref(), Some("Specialist role"));
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["fairhire-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
