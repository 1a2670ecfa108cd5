use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{debug, info, LevelFilter};
use quill::format::{Destination, MappingFormat, MappingsOptions};
use quill::progress::ProgressListener;
use quill::tree::mappings_diff::MappingDelta;

mod project;

#[derive(Debug, Parser)]
#[command(version)]
/// Writes the renames of a project into a mappings file.
struct Cli {
	/// Be verbose, repeat for even more output.
	#[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Writes the renames of a project into a mappings file
	Export {
		/// The project json file to read the renames from
		project: PathBuf,
		/// The file to write the mappings to, replacing it if it exists
		output: PathBuf,
		#[arg(long = "format", value_enum, default_value_t)]
		format: Format,
		/// An option for the format, given as `key=value`. See the `formats` command for the available ones.
		#[arg(short = 'o', long = "option", value_parser = MappingsOptions::parse_pair)]
		options: Vec<(String, String)>,
	},
	/// Lists the formats mappings can be written in, together with their options
	Formats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Format {
	#[default]
	/// The Tiny v1 format, writing to a single file.
	TinyV1,
}

impl From<Format> for MappingFormat {
	fn from(value: Format) -> Self {
		match value {
			Format::TinyV1 => MappingFormat::TinyV1,
		}
	}
}

impl Display for Format {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&MappingFormat::from(*self), f)
	}
}

fn setup_logger(verbose: u8) -> Result<()> {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(level)
		.chain(std::io::stderr())
		.apply()
		.context("failed to set up logging")
}

/// Reports the progress of writing mappings to the log.
#[derive(Debug, Default)]
struct LogProgress {
	total_work: usize,
}

impl ProgressListener for LogProgress {
	fn init(&mut self, total_work: usize, title: &str) {
		self.total_work = total_work;
		info!("{title} ({total_work} in total)");
	}

	fn step(&mut self, num_done: usize, message: &str) {
		debug!("[{num_done}/{}] {message}", self.total_work);
	}
}

fn export(project: &Path, output: &Path, format: MappingFormat, options: MappingsOptions) -> Result<()> {
	let project = project::read_file(project)?;

	let destination = Destination::detect(output);
	let delta = MappingDelta::added(&project.mappings);

	format.write(&project.mappings, &delta, &destination, &mut LogProgress::default(), &options, &project.index)
		.with_context(|| anyhow!("failed to export {format} mappings to {output:?}"))?;

	info!("exported {} renames to {output:?}", delta.len());
	Ok(())
}

fn print_formats() {
	for format in MappingFormat::ALL {
		let layouts: Vec<_> = format.supported_path_types().iter().map(ToString::to_string).collect();
		println!("{format} (writes to: {})", layouts.join(", "));
		for option in format.options() {
			println!("\t-o {}=<value> (default: {:?})", option.key(), option.default());
		}
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_logger(cli.verbose)?;

	match cli.command {
		Command::Export { project, output, format, options } => {
			export(&project, &output, format.into(), options.into_iter().collect())
		},
		Command::Formats => {
			print_formats();
			Ok(())
		},
	}
}
