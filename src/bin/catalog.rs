//! Command-line front end for the catalog store.
//!
//! Sends one request through the same dispatcher a network transport would
//! use and prints the response body on stdout. Logs go to stderr so the output
//! can be piped into other JSON tooling.

use anyhow::{Context, Result, bail};
use catalog_store::{CatalogStore, StoreConfig, dispatch, seed_defaults};
use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let mut config = StoreConfig::from_env(cli.store);
    if cli.no_seed {
        config.seed_on_open = false;
    }

    match cli.command {
        Command::Seed => {
            let mut store = CatalogStore::open(&config.store_path)
                .with_context(|| format!("opening {}", config.store_path.display()))?;
            let report = seed_defaults(&mut store).context("seeding default catalog")?;
            println!("{}", serde_json::to_string(&report)?);
            Ok(())
        }
        Command::Request {
            method,
            target,
            body,
        } => {
            let catalog = config
                .open()
                .with_context(|| format!("opening {}", config.store_path.display()))?;
            let body = match body {
                Some(body) => Some(body),
                None if method.eq_ignore_ascii_case("POST") => read_stdin_body()?,
                None => None,
            };
            let response = dispatch(&catalog, &method, &target, body.as_deref());
            println!("{}", response.body);
            if !response.is_success() {
                eprintln!("{method} {target} -> {}", response.status);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

struct Cli {
    store: Option<PathBuf>,
    no_seed: bool,
    command: Command,
}

enum Command {
    Seed,
    Request {
        method: String,
        target: String,
        body: Option<String>,
    },
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();

        let mut store = None;
        let mut no_seed = false;
        let mut body = None;
        let mut positional = Vec::new();

        while let Some(arg) = args.next() {
            let arg = arg
                .into_string()
                .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in argument"))?;
            match arg.as_str() {
                "--store" => {
                    let value = args.next().context("--store requires a path")?;
                    store = Some(PathBuf::from(value));
                }
                "--body" => {
                    let value = args
                        .next()
                        .context("--body requires a JSON value")?
                        .into_string()
                        .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in --body"))?;
                    body = Some(value);
                }
                "--no-seed" => no_seed = true,
                "--help" | "-h" => usage(0),
                flag if flag.starts_with("--") => bail!("Unknown flag: {flag}"),
                _ => positional.push(arg),
            }
        }

        let command = match positional.as_slice() {
            [cmd] if cmd == "seed" => {
                if body.is_some() {
                    bail!("--body is only valid for requests");
                }
                Command::Seed
            }
            [method, target] => Command::Request {
                method: method.clone(),
                target: target.clone(),
                body,
            },
            _ => usage(1),
        };

        Ok(Self {
            store,
            no_seed,
            command,
        })
    }
}

fn read_stdin_body() -> Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut raw = String::new();
    stdin
        .lock()
        .read_to_string(&mut raw)
        .context("reading request body from stdin")?;
    Ok(Some(raw))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog [--store PATH] [--no-seed] <METHOD> <TARGET> [--body JSON]\n       catalog [--store PATH] seed\n\nRequests:\n  GET  /                      Health check (prints api-ok).\n  GET  /products[?name=Q]     List products, optionally by name substring.\n  POST /products              Create a product from --body or stdin JSON.\n  GET  /categories[?ids=A,B]  List categories, optionally by id list.\n\nEnvironment:\n  CATALOG_STORE_PATH  Journal file (default: ./db.ndjson).\n  CATALOG_SKIP_SEED   Skip seeding the default catalog when set.\n  RUST_LOG            Log filter (default: info)."
    );
    std::process::exit(code);
}
