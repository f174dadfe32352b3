use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::dataset::Dataset;

mod csv_reader;
mod dataset;
mod page;
mod server;
mod views;

const CSV_FILE_PATH: &str = "data/persons.csv";
const BIND_ADDR: &str = "127.0.0.1:8080";
const PAGE_TITLE: &str = "Person dataset indicators";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // Load failure stops everything before any rendering happens.
    let records = csv_reader::read_data(Path::new(CSV_FILE_PATH))
        .with_context(|| format!("could not load {}", CSV_FILE_PATH))?;
    info!("loaded {} person records from {}", records.len(), CSV_FILE_PATH);

    let dataset = Dataset::from_records(records);
    let sections = [
        views::source_table(&dataset),
        views::gender_view(&dataset),
        views::education_view(&dataset),
        views::employment_view(&dataset),
        views::age_view(&dataset),
        views::generation_view(&dataset),
        views::age_histogram(&dataset),
        views::age_gender_histogram(&dataset),
    ];
    let page = page::render_page(PAGE_TITLE, &sections);

    let addr: SocketAddr = BIND_ADDR.parse().context("invalid bind address")?;
    server::serve(addr, page).await
}
