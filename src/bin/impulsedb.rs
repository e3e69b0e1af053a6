use chrono::Local;
use clap::Parser;
use env_logger::Env;
use impulsedb::{Config, Error, MemoryAdapter, Store};
use log::*;
use serde_json::Value;
use std::io::{self, BufRead, Write};

mod common;

use common::{parse_entry, parse_value, render, Command, Get, Remove, Set};

#[derive(Parser, Debug)]
#[command(name = "impulsedb", author, version, about, long_about = None)]
struct Options {
    #[arg(short, long, default_value = "impulsedb", help = "NAMESPACE")]
    namespace: String,
    #[arg(short, long = "entry", value_parser = parse_entry, help = "COLLECTION=JSON")]
    entries: Vec<(String, Value)>,
}

fn main() -> anyhow::Result<()> {
    // log init
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(record.level()),
                record.module_path().unwrap_or("<unnamed>"),
                &record.args()
            )
        })
        .init();

    let options = Options::parse();

    debug!("version = {:?}", env!("CARGO_PKG_VERSION"));
    debug!("{:?}", options);

    let adapter = options
        .entries
        .into_iter()
        .fold(MemoryAdapter::new(), |adapter, (collection, entry)| {
            adapter.with_entry(collection, entry)
        });
    let mut store = impulsedb::open(options.namespace, Config::new().adapter(adapter))?;
    info!("store {:?} ready", store.namespace());

    let mut stdout = io::stdout().lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let result = Command::try_from(line.as_str())
            .map_err(anyhow::Error::from)
            .and_then(|command| execute(&mut store, command, &mut stdout));
        if let Err(e) = result {
            eprintln!("{}", e.to_string().trim_end());
        }
    }

    Ok(())
}

fn execute(store: &mut Store, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Set(Set {
            collection,
            field,
            value,
        }) => {
            store.collection(collection).set(field, parse_value(&value))?;
        }
        Command::Get(Get { collection, field }) => match store.collection(collection).get(&field) {
            Some(value) => writeln!(out, "{}", render(&value))?,
            None => writeln!(out, "Key not found")?,
        },
        Command::Rm(Remove { collection, field }) => {
            match store.collection(collection).remove(&field) {
                Err(Error::KeyNotFound) => writeln!(out, "Key not found")?,
                other => {
                    other?;
                }
            }
        }
        Command::Dump => writeln!(out, "{}", serde_json::to_string(store.objects())?)?,
    }
    out.flush()?;
    Ok(())
}
