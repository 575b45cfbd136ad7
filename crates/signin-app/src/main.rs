use clap::Parser;
use std::process::ExitCode;

use signin_app::presentation::bootstrap;
use signin_app::presentation::cli::{self, Cli};
use signin_domain::shared::DomainError;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let state = match bootstrap::initialize(args.config, args.log_dir).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to start: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::execute(&state, args.command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<DomainError>() {
                Some(domain_err) => {
                    tracing::error!(code = domain_err.code().code(), "{}", domain_err);
                    eprintln!("{}", domain_err.format_with_code());
                }
                None => {
                    tracing::error!("{:#}", e);
                    eprintln!("{:#}", e);
                }
            }
            ExitCode::FAILURE
        }
    }
}
