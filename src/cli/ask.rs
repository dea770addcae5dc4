//! The `ask` command

use clap::Args;

use super::{load_dataset, DataSource, DatasetKind};
use crate::ai::OpenAiClient;
use crate::config::Settings;
use crate::error::FinsightResult;
use crate::services::InsightService;

/// Arguments for `ask`
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Kind of dataset
    #[arg(value_enum)]
    pub kind: DatasetKind,

    /// Question about the data
    pub question: String,

    #[command(flatten)]
    pub source: DataSource,
}

/// Answer a question about a dataset and print the reply
pub fn handle_ask_command(settings: &Settings, args: AskArgs) -> FinsightResult<()> {
    let client = OpenAiClient::from_env(&settings.ai)?;
    let loaded = load_dataset(&args.source, args.kind, settings)?;
    let service = InsightService::new(&client, settings);

    let answer = service.answer_question(&loaded.analysis, &args.question)?;
    println!("{}", answer);
    Ok(())
}
