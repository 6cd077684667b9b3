//! The home page suite against a real Chromium and playwright.dev.
//!
//! Needs network access and a Chrome install:
//! `cargo test -p playwright-site --features chromium -- --ignored`

#![cfg(feature = "chromium")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use playwright_site::{HomeSteps, Site};
use pomkit::{ChromiumDriver, ChromiumOptions, PageDriver};
use std::sync::Arc;

async fn session() -> Arc<dyn PageDriver> {
    let options = ChromiumOptions {
        sandbox: false,
        ..ChromiumOptions::default()
    };
    Arc::new(ChromiumDriver::launch(options).await.unwrap())
}

#[tokio::test]
#[ignore = "requires Chrome and network access"]
async fn test_verify_home_page_title() {
    let site = Site::load().unwrap();
    let session = session().await;
    let hooks = site.hooks(session.clone());
    hooks.before_all().await;
    hooks.before_each().await.unwrap();

    let steps = HomeSteps::new(&site, session).unwrap();
    steps.verify_home_page_opened().await.unwrap();
    steps.verify_home_page_title().await.unwrap();
    hooks.after_all().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome and network access"]
async fn test_click_get_started_button() {
    let site = Site::load().unwrap();
    let session = session().await;
    let hooks = site.hooks(session.clone());
    hooks.before_each().await.unwrap();

    let steps = HomeSteps::new(&site, session).unwrap();
    steps.verify_home_page_opened().await.unwrap();
    steps.verify_menu_bar_loaded().await.unwrap();
    steps.click_get_started_button().await.unwrap();
    hooks.after_all().await.unwrap();
}
