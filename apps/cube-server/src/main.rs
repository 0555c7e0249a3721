// [apps/cube-server/src/main.rs]
use cube_server::routes::build_router;
use cube_server::Bootstrap;
use cube_shared_observability::init_tracing;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("cube_server");

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(async {
        let port: u16 = std::env::var("PORT").unwrap_or_else(|_| "4000".to_string()).parse().unwrap_or(4000);
        let data_dir: PathBuf = std::env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string()).into();

        let state = Bootstrap::ignite(&data_dir).expect("failed to boot shard engines");
        let router = build_router(state);

        let address = format!("0.0.0.0:{port}");
        let listener = tokio::net::TcpListener::bind(&address).await.expect("failed to bind listener");
        info!(address = %address, "cube-server listening");

        axum::serve(listener, router).await.expect("server exited unexpectedly");
    });

    Ok(())
}
