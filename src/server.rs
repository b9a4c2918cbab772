use crate::data::{GenerationInput, GenerationOutput};
use crate::engine;
use axum::{Json, Router, routing::post};

async fn generate_handler(
    Json(input): Json<GenerationInput>,
) -> Result<Json<GenerationOutput>, (axum::http::StatusCode, String)> {
    match engine::generate(&input) {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err((axum::http::StatusCode::BAD_REQUEST, e)),
    }
}

pub async fn run_server() {
    let app = Router::new().route("/v1/schedule/generate", post(generate_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
