//! Molar dental records server.
//!
//! Patients live in an embedded document store, clinical visit records in
//! a relational store; the HTTP API maps each request onto a single store
//! or service call.

use std::sync::Arc;

use clap::Parser;
use molar_rest::{ServerConfig, create_app_with_config, init_logging};
use molar_service::RecordService;
use molar_store::{SledPatientStore, SqliteRecordStore};
use tracing::{info, warn};

/// Opens and initializes both stores from the server configuration.
fn open_stores(
    config: &ServerConfig,
) -> anyhow::Result<(Arc<SledPatientStore>, Arc<SqliteRecordStore>)> {
    info!(path = %config.patient_db, "opening patient document store");
    let patients = SledPatientStore::open(&config.patient_db)?;

    info!(path = %config.record_db, "opening clinical record store");
    let records = if config.record_db == ":memory:" {
        SqliteRecordStore::in_memory()?
    } else {
        if let Some(parent) = std::path::Path::new(&config.record_db).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        SqliteRecordStore::open(&config.record_db)?
    };
    records.init_schema()?;

    Ok((Arc::new(patients), Arc::new(records)))
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        "starting Molar dental records server"
    );

    let (patients, records) = open_stores(&config)?;

    if config.seed_demo_data {
        let service = RecordService::new(Arc::clone(&patients), Arc::clone(&records));
        // Bootstrap failure is non-fatal: start with whatever subset made
        // it into the stores.
        match service.seed_demo_data().await {
            Ok(report) => info!(
                patients = report.patients_created,
                records = report.records_created,
                failures = report.failures,
                "demo data ready"
            ),
            Err(error) => warn!(%error, "demo data seeding failed, continuing"),
        }
    }

    let app = create_app_with_config(Arc::clone(&patients), Arc::clone(&records), config.clone());
    serve(app, &config).await
}
