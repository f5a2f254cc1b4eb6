use std::collections::HashMap;

use tracing::{error, info, span, Level};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().json().init();

    let span = span!(Level::INFO, "main", context = "main");
    let _e = span.enter();
    info!("called");

    let matches = clap::Command::new("b2fs")
        .arg(clap::Arg::new("BUCKET").required(true).index(1))
        .arg(clap::Arg::new("PREFIX").required(false).index(2))
        .get_matches();

    let bucket = matches.get_one::<String>("BUCKET").unwrap();
    let prefix = matches
        .get_one::<String>("PREFIX")
        .map(String::as_str)
        .unwrap_or("");
    info!(bucket = bucket, prefix = prefix, "args");

    let config = b2fs::util::block::block_on(aws_config::load_from_env());
    let client = aws_sdk_s3::Client::new(&config);

    let fs = match b2fs::fs::B2Fs::new(Box::new(client), bucket, prefix, HashMap::new()) {
        Err(err) => {
            error!(error_message=%err, error_group="new");
            std::process::exit(1);
        }
        Ok(fs) => fs,
    };

    let listing = match fs.list_contents("", true) {
        Err(err) => {
            error!(error_message=%err, error_group="list_contents");
            std::process::exit(1);
        }
        Ok(listing) => listing,
    };

    for entry in listing {
        info!(path = %entry.path, size = entry.size, kind = %entry.kind, id = %entry.id, "object");
    }
}
