mod app;
mod cli;
mod discovery;
mod execution;
mod metadata;
mod runner;
mod stats;

fn main() {
    app::run();
}
