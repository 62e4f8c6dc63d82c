use route_planner::routing::models::{ErrorResponse, OptimizeRequest, RoutesResponse};
use route_planner::{build_optimizer, logging, Config, OptimizeError, Overrides};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

// Reads an optimization request (JSON) from the file given as the first
// argument, or from stdin, and prints the routes as JSON on stdout.
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let _guard = logging::init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    let input = match read_input(std::env::args().nth(1)).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to read request");
            return ExitCode::from(2);
        }
    };

    let optimizer = match build_optimizer(&config) {
        Ok(o) => o,
        Err(e) => {
            error!(error = %e, "Failed to build OSRM client");
            return ExitCode::FAILURE;
        }
    };

    info!(
        render_paths = config.render_paths,
        osrm_url     = %config.osrm_url,
        "Starting route optimization"
    );

    let result = async {
        let request: OptimizeRequest = serde_json::from_str(&input)
            .map_err(|e| OptimizeError::invalid_input(format!("request body: {e}")))?;
        let points = request.points()?;
        let overrides = Overrides {
            depot: request.depot,
            capacity: request.capacity,
        };
        optimizer.optimize_with(&points, overrides).await
    }
    .await;

    let (body, code) = match result {
        Ok(routes) => (
            serde_json::to_string_pretty(&RoutesResponse::from(routes.as_slice())),
            ExitCode::SUCCESS,
        ),
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Route optimization failed");
            (
                serde_json::to_string_pretty(&ErrorResponse::from(&e)),
                ExitCode::FAILURE,
            )
        }
    };

    match body {
        Ok(json) => {
            println!("{json}");
            code
        }
        Err(e) => {
            error!(error = %e, "Failed to encode response");
            ExitCode::FAILURE
        }
    }
}

async fn read_input(path: Option<String>) -> std::io::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            Ok(buf)
        }
    }
}
