mod accounts;
mod app;
mod audio;
mod config;
mod content;
mod interaction;
mod logging;
mod mpris;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
