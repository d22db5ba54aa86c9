use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct Options {
    /// Backup file to convert
    #[arg(default_value = "infinityBackup.infinity")]
    pub input: PathBuf,

    /// Where to write the generated page
    #[arg(short, long, default_value = "bookmarks.html")]
    pub output: PathBuf,
}
