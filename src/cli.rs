use crate::Arguments;
use clap::{
    arg, builder::PossibleValue, crate_authors, crate_description, crate_name, crate_version,
    value_parser, Arg, ArgMatches, Command, ValueEnum,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub const DEFAULT_OUTPUT_FILE: &str = "blurred.png";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExecutorKind {
    Sequential,
    Pooled,
}

impl ValueEnum for ExecutorKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Sequential, Self::Pooled]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Sequential => Some(PossibleValue::new("Sequential")),
            Self::Pooled => Some(PossibleValue::new("Pooled")),
        }
    }
}

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_threads_argument(command);
        Self::register_executor_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_executor_argument(command: Command) -> Command {
        command.arg(Self::create_executor_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to the image to blur (PNG, JPEG or BMP)")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output_file <FILE> "Path to PNG output file")
            .default_value(DEFAULT_OUTPUT_FILE)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(u64).range(1..))
    }

    fn create_executor_argument() -> Arg {
        arg!(-e --executor <EXECUTOR> "How the blur is executed")
            .default_value("Pooled")
            .value_parser(value_parser!(ExecutorKind))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            executor: Self::extract_executor_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Output file must be provided, but was unset.")
            .clone()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<u64>("threads")
            .map(|&threads| threads as usize)
            .expect("Required argument threads not provided")
    }

    fn extract_executor_argument(matches: &ArgMatches) -> ExecutorKind {
        matches
            .get_one::<ExecutorKind>("executor")
            .expect("Executor must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
