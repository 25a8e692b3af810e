//! Evaluates IPv6 netmask filters against the source addresses of events.
//! This part is the main program that loads the configuration, builds the filter nodes and evaluates them for every
//! source given on the command line or read line by line from stdin

use clap::Parser;
use log::{debug, error, info, warn};
use netmask6_filter_common::SourceAddress;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;

// own modules
pub mod conf;
pub mod filters;
pub mod source;

// command line options
#[derive(Debug, Parser)]
struct Opt {
    #[clap(short, long, default_value = "./conf/netmask6-filter.yml")]
    config_path: String, // path to config file
    #[clap(short, long)]
    source: Vec<String>, // sources to evaluate, stdin is read if none is given
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let opt = Opt::parse();
    env_logger::init();

    let config = conf::load_config(&opt.config_path).map_err(|err| anyhow::anyhow!("{}", err))?;
    let filters = filters::build_filters(&config);
    if filters.is_empty() {
        warn!("No filters configured in {}", opt.config_path);
    }

    if !opt.source.is_empty() {
        for text in &opt.source {
            evaluate_source(&filters, text);
        }
        return Ok(());
    }

    info!("Reading sources from stdin, waiting for EOF or Ctrl-C...");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => evaluate_source(&filters, &text),
                None => break,
            },
            res = &mut ctrl_c => {
                res?;
                break;
            }
        }
    }
    info!("Exiting...");
    Ok(())
}

/// Evaluates all filters for one source and prints one line per filter: source, filter name and result
///
/// # Arguments
/// * `filters` - the configured filters
/// * `text` - textual representation of the source, see [`source::parse_source`]
///
fn evaluate_source(filters: &[filters::NamedFilter], text: &str) {
    let source: SourceAddress = match source::parse_source(text) {
        Ok(source) => source,
        Err(err) => {
            error!("{}", err);
            return;
        }
    };
    for (name, result) in filters::evaluate(filters, &source) {
        debug!("Filter {} for {:?}: {}", name, source, result);
        let result = match result {
            true => "match",
            false => "no-match",
        };
        println!("{}\t{}\t{}", text.trim(), name, result);
    }
}
