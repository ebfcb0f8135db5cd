use anyhow::Context;
use clap::Parser;

mod api;
mod auth;
mod browse;
mod cli;
mod config;
mod render;
mod session;
mod storage;
#[cfg(test)]
mod tests;

use api::client::HttpClient;
use api::{ProductBackend, ProductPage, RemoteProducts, SimilarityOpts};
use config::Config;
use storage::BackendLocal;

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn base_path() -> anyhow::Result<String> {
    if let Ok(path) = std::env::var("PF_BASE_PATH") {
        return Ok(path);
    }

    let home = homedir::my_home()
        .context("could not determine home directory")?
        .context("home directory path is empty")?;
    Ok(format!("{}/.local/share/pf", home.to_string_lossy()))
}

fn print_page(page: &ProductPage, grid: bool) -> anyhow::Result<()> {
    if grid {
        let width = render::terminal_width();
        println!("{}", render::header_line(page.total, ""));
        println!();
        println!("{}", render::render_grid(page, width));
    } else {
        println!("{}", serde_json::to_string_pretty(page)?);
    }
    Ok(())
}

fn handle_token(store: &BackendLocal, action: &cli::TokenArgs) -> anyhow::Result<()> {
    match action {
        cli::TokenArgs::Set { token } => {
            auth::store_token(store, token)?;
            println!("token stored");
        }
        cli::TokenArgs::Show {} => match auth::resolve_token(store) {
            Some(token) => println!("{}", auth::mask_token(&token)),
            None => println!("no token configured"),
        },
        cli::TokenArgs::Clear {} => {
            auth::clear_token(store)?;
            println!("token cleared");
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = cli::Args::parse();

    let base_path = base_path()?;
    let store = BackendLocal::new(&base_path)?;
    let config = Config::load_with(&base_path)?;

    let make_backend = |config: &Config, store: &BackendLocal| -> RemoteProducts {
        let token = auth::resolve_token(store);
        let http = HttpClient::new(
            &config.backend.base_url,
            token,
            config.backend.timeout_secs,
        );
        RemoteProducts::new(http)
    };

    match args.command {
        cli::Command::Browse { openai } => {
            let backend = make_backend(&config, &store);
            let openai = openai || config.search.openai_embeddings;
            let mut session = session::Session::new(
                Box::new(backend),
                config.search.page_size,
                &config.search.search_type,
                openai,
            );
            browse::run(&mut session)
        }

        cli::Command::List {
            limit,
            skip,
            gender,
            category,
            grid,
        } => {
            let backend = make_backend(&config, &store);
            let limit = limit.unwrap_or(config.search.page_size);
            let page = backend.list_products(limit, skip, &gender, &category)?;
            print_page(&page, grid)
        }

        cli::Command::Search {
            text,
            v0,
            openai,
            limit,
            gender,
            category,
            grid,
        } => {
            let backend = make_backend(&config, &store);
            let openai = openai || config.search.openai_embeddings;
            let limit = limit.unwrap_or(config.search.page_size);

            let page = if v0 {
                ProductPage::from_list(backend.text_search(&text, limit, openai)?)
            } else {
                let opts = SimilarityOpts {
                    search_type: config.search.search_type.clone(),
                    gender,
                    category,
                    number_of_results: limit,
                    is_openai: openai,
                };
                backend.search_user_text(&text, &opts)?
            };
            print_page(&page, grid)
        }

        cli::Command::Similar {
            id,
            image,
            openai,
            limit,
            gender,
            category,
            grid,
        } => {
            let backend = make_backend(&config, &store);
            let opts = SimilarityOpts {
                search_type: config.search.search_type.clone(),
                gender,
                category,
                number_of_results: limit.unwrap_or(config.search.page_size),
                is_openai: openai || config.search.openai_embeddings,
            };

            let page = if image {
                backend.similar_by_image(id, &opts)?
            } else {
                backend.similar_by_text(id, &opts)?
            };
            print_page(&page, grid)
        }

        cli::Command::Token { action } => handle_token(&store, &action),

        cli::Command::Config {} => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
