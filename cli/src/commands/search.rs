use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    thread::spawn,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::Args;
use crossbeam_channel::bounded;
use geoscan_core::{
    ingest::Ingester,
    query,
    store::{MemoryStore, RecordStore},
    Error,
};
use humantime::format_duration;
use tracing::{info, warn};

use super::query_args::QueryArgs;
use crate::config::Config;

/// Search records loaded from a file with one JSON document per line
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// The file containing the documents to search
    #[arg(long, short)]
    pub data: PathBuf,

    #[command(subcommand)]
    pub query: QueryArgs,
}

/// Loads all documents from the given file into a new store. Documents
/// without geo attributes cannot be indexed and are skipped.
fn load_store(path: &Path, ingester: &Ingester) -> Result<MemoryStore> {
    let file =
        File::open(path).with_context(|| format!("Unable to open `{}'", path.display()))?;

    let store = MemoryStore::new();
    let mut skipped = 0;
    for record in ingester.load_json_lines(BufReader::new(file)) {
        let record = record.with_context(|| format!("Unable to load `{}'", path.display()))?;
        match store.put(record) {
            Ok(()) => {}
            Err(Error::InvalidRecord { id }) => {
                warn!(id = id.as_str(), "Skipping document without location or region");
                skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    info!(records = store.len()?, skipped, "Loaded data file");

    Ok(store)
}

/// Run the `search` command
pub fn run_search(args: SearchArgs, config: &Config) -> Result<()> {
    let query = args.query.into_query(config.default_unit)?;

    let ingester = Ingester::new(config.fields.clone());
    let store = load_store(&args.data, &ingester)?;

    let stdout = io::stdout().lock();
    let mut writer = BufWriter::new(stdout);

    let search_start = Instant::now();
    let mut found_records = 0;

    // perform search
    let (search_sender, search_receiver) = bounded(1024 * 10);

    let search_thread = spawn(move || {
        for id in query::search(&query, &store)? {
            let id = id?;
            search_sender.send(id)?;
        }
        anyhow::Ok(())
    });

    for id in search_receiver {
        writeln!(writer, "{id}")?;
        found_records += 1;
    }

    match search_thread.join() {
        Ok(r) => r?,
        Err(err) => bail!("Search thread panicked: {err:?}"),
    }

    writer.flush()?;

    eprintln!(
        "Found {} records in {}",
        found_records,
        format_duration(Duration::from_millis(
            search_start.elapsed().as_millis() as u64
        ))
    );

    Ok(())
}
