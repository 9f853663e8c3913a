use anyhow::Result;
use clap::Args;
use geoscan_core::translate::QueryTranslator;

use super::query_args::QueryArgs;
use crate::config::Config;

/// Print the search request a document store would receive for a query
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// The maximum number of hits to request
    #[arg(long, default_value_t = 10)]
    pub size: usize,

    #[command(subcommand)]
    pub query: QueryArgs,
}

/// Run the `translate` command
pub fn run_translate(args: TranslateArgs, config: &Config) -> Result<()> {
    let query = args.query.into_query(config.default_unit)?;
    let request = QueryTranslator::new(&config.fields).search_request(&query, args.size);
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
