use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};

use speller::config::Config;
use speller::dictionary::WordDictionary;
use speller::error::ConfigError;
use speller::lexer::Lexer;
use speller::pipeline::{CheckReport, Pipeline};
use speller::report::{self, timed, Timings};

#[derive(Parser, Debug)]
#[command(version, about, override_usage = "speller [DICTIONARY] text")]
struct Args {
    /// Optional dictionary word list followed by the text to check
    #[arg(num_args = 1..=2, required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// JSON config file, defaults to <config dir>/speller/config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of hash buckets in the dictionary
    #[arg(long)]
    buckets: Option<usize>,

    /// Longest word accepted by the dictionary and the scanner
    #[arg(long)]
    max_word_length: Option<usize>,
}

impl Args {
    fn text(&self) -> &Path {
        &self.paths[self.paths.len() - 1]
    }

    fn settings(&self) -> Result<Config, ConfigError> {
        let mut config = Config::resolve(self.config.as_deref())?;
        if self.paths.len() == 2 {
            config.dictionary = self.paths[0].clone();
        }
        if let Some(buckets) = self.buckets {
            config.bucket_count = buckets;
        }
        if let Some(max_word_length) = self.max_word_length {
            config.max_word_length = max_word_length;
        }
        config.validate()?;
        debug!("{config:?}");
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match args.settings() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    run(&config, args.text())
}

fn run(config: &Config, text_path: &Path) -> ExitCode {
    let mut timings = Timings::default();
    let mut dictionary = WordDictionary::with_config(config);

    let (loaded, elapsed) = timed(|| dictionary.load(&config.dictionary));
    timings.load = elapsed;
    if let Err(err) = loaded {
        error!("{err}");
        println!("Could not load {}.", config.dictionary.display());
        return ExitCode::FAILURE;
    }

    let mut file = match File::open(text_path) {
        Ok(file) => file,
        Err(err) => {
            error!("{err}");
            println!("Could not open {}.", text_path.display());
            dictionary.unload();
            return ExitCode::FAILURE;
        }
    };
    let mut text = Vec::new();
    if let Err(err) = file.read_to_end(&mut text) {
        error!("{err}");
        println!("Error reading {}.", text_path.display());
        dictionary.unload();
        return ExitCode::FAILURE;
    }

    let lexer = Lexer::new(text, dictionary.max_word_length());
    let check_report = Pipeline::new(&dictionary).run(lexer);
    timings.check = check_report.check_time;
    info!(
        "Checked {} words from {}",
        check_report.words,
        text_path.display()
    );

    let (size, elapsed) = timed(|| dictionary.size());
    timings.size = elapsed;

    let ((), elapsed) = timed(|| dictionary.unload());
    timings.unload = elapsed;

    if let Err(err) = print_report(&check_report, size, &timings) {
        error!("could not write report: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_report(check_report: &CheckReport, size: usize, timings: &Timings) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_header(&mut out)?;
    report::write_misspellings(&mut out, check_report)?;
    report::write_summary(&mut out, check_report, size, timings)?;
    out.flush()
}
