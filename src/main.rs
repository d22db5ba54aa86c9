use clap::Parser;
use color_eyre::Result;
use navgen::app::App;
use navgen::args::Options;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Options::parse();
    App::new(args).run()
}
