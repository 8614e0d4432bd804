use std::env;
use std::process;

use gitscribe::config::Config;
use gitscribe::error::{AppError, AppResult};
use gitscribe::generate::{GenerateOptions, Generator};
use gitscribe::git::{ChangeSource, Repository};
use gitscribe::host::{ConsoleNotifier, EditMsgSink};
use gitscribe::llm::GeminiClient;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => {}
        Err(e) => {
            // Pipeline failures were already reported through the notifier
            if !matches!(e, AppError::Generate(_)) {
                eprintln!("Error: {}", e);
            }
            process::exit(1);
        }
    }
}

async fn run() -> AppResult<()> {
    let config = Config::load_or_default()?;

    let workdir = env::current_dir()?;
    let repo = Repository::discover_from(&workdir).ok();

    let api_key = config.get_api_key().unwrap_or_default();

    let options = GenerateOptions {
        api_key: api_key.clone(),
        temperature: config.llm.temperature,
        max_diff_length: config.prompt.max_diff_length,
        max_log_length: config.prompt.max_log_length,
        log_items: config.prompt.log_items,
    };

    let generator = Generator::new(
        Box::new(GeminiClient::with_model(api_key, config.llm.model.clone())),
        Box::new(EditMsgSink::new(&workdir)),
        Box::new(ConsoleNotifier),
        options,
    );

    generator
        .run(repo.as_ref().map(|r| r as &dyn ChangeSource))
        .await?;

    Ok(())
}
