// src/server/openapi.rs
// OpenAPI 3 description of the HTTP surface, served at /api-docs/openapi.json

use serde_json::{json, Value};

pub fn openapi_document() -> Value {
    let error_body = json!({
        "type": "object",
        "properties": {
            "statusCode": { "type": "integer" },
            "message": { "type": "string" },
            "error": { "type": "string" }
        }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "mailjson",
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION")
        },
        "tags": [{ "name": "mail" }],
        "paths": {
            "/mail/parse-email": {
                "get": {
                    "tags": ["mail"],
                    "summary": "Parse an email and return the JSON found as an attachment or as links.",
                    "parameters": [{
                        "name": "path",
                        "in": "query",
                        "required": true,
                        "description": "Local path or URL of the email (.eml) file.",
                        "schema": { "type": "string" },
                        "example": "/home/me/Downloads/report.eml"
                    }],
                    "responses": {
                        "200": {
                            "description": "JSON extracted from the email.",
                            "content": { "application/json": { "schema": {} } }
                        },
                        "400": {
                            "description": "The path parameter is missing, or no JSON was found.",
                            "content": { "application/json": { "schema": error_body.clone() } }
                        },
                        "500": {
                            "description": "The email could not be read or parsed.",
                            "content": { "application/json": { "schema": error_body } }
                        }
                    }
                }
            }
        }
    })
}
