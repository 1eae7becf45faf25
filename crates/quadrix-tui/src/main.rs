use clap::Parser;

use crate::app::App;

mod app;
mod runtime;
mod view;

/// Terminal falling-block puzzle.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Logic updates (and render frames) per second
    #[clap(long, default_value_t = 60)]
    fps: u32,
    /// Seed for the piece sequence (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut app = App::new(&args);
    ratatui::run(|terminal| app.run(terminal))?;
    Ok(())
}
