use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "copia", version, about, max_term_width = 100)]
pub struct Args {
    /// Path to the config file. Without it, `copia.json` is looked up in
    /// the current directory, then in the per-user data directory.
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// When given, logs go to stderr at this verbosity instead of the
    /// config-driven log file.
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
}
