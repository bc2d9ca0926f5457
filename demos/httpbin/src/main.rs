//! httpbin.org demo
//!
//! Demonstrates chela's fluent request/handler chains against a public echo
//! service.

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use chela::prelude::*;
use serde::{Deserialize, Serialize};

/// Slice of httpbin's `/json` sample document.
#[derive(Debug, Default, Deserialize)]
struct Slideshow {
    slideshow: SlideshowBody,
}

#[derive(Debug, Default, Deserialize)]
struct SlideshowBody {
    author: String,
    title: String,
}

/// Payload echoed back by httpbin's `/post` endpoint.
#[derive(Debug, Serialize)]
struct Note {
    subject: String,
    starred: bool,
}

/// httpbin wraps the echoed request in this envelope.
#[derive(Debug, Default, Deserialize)]
struct Echo {
    data: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Decode a JSON document.
    let mut slideshow = Slideshow::default();
    chela::get("https://httpbin.org/json")
        .header("Accept", "application/json")
        .expect_code(200)
        .decode(&mut slideshow)
        .send()
        .await?;
    println!(
        "slideshow: {} by {}",
        slideshow.slideshow.title, slideshow.slideshow.author
    );

    // Post a JSON body and read the echoed payload.
    let note = Note {
        subject: "chela".to_string(),
        starred: true,
    };
    let mut echo = Echo::default();
    chela::post("https://httpbin.org/post")
        .content_type(ContentType::Json)
        .body_json(&note)
        .expect_code(200)
        .decode(&mut echo)
        .send()
        .await?;
    println!("echoed: {}", echo.data);

    // Collect cookies set by the server.
    let mut cookies = Vec::new();
    let mut body = String::new();
    chela::get("https://httpbin.org/response-headers?Set-Cookie=session%3Dabc123")
        .to_cookies(&mut cookies)
        .to_string(&mut body)
        .send()
        .await?;
    for cookie in &cookies {
        println!("cookie: {cookie}");
    }

    Ok(())
}
