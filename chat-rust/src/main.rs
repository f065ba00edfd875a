use llm_chat::{telemetry, ChatConfig, ChatResult};
use std::process::ExitCode;

async fn try_main() -> ChatResult<()> {
    let config = ChatConfig::from_env()?;
    telemetry::init_tracing();

    llm_chat::run(&config, &mut std::io::stdout().lock()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    match try_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
