#!/usr/bin/env cargo
use savings_api::openapi::SavingsApiDoc;
use utoipa::OpenApi;

fn main() {
    let openapi = SavingsApiDoc::openapi();
    match serde_json::to_string_pretty(&openapi) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI document to JSON: {e}");
            std::process::exit(1);
        }
    }
}
