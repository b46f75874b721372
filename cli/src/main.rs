use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use c64asm::disasm::disassemble;
use c64asm::{
    Assembler, AssemblerOptions, AssemblyImage, Diagnostics, InstructionTable, LabelPolicy,
    ListingFormat,
};
use clap::Parser;
use color_print::{ceprintln, cprintln};
use tracing::Level;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

/// Assembled when no input file is given.
const DEMO: &str = "\
* = $4000
start
    ldx #$00
next
    lda msg,x
    sta $0400,x
    inx
    cpx #$14
    bne next
    jmp *
msg
    .screen \"HELLO WORLD FROM C64\"
";

#[derive(Debug, Parser)]
#[command(version, about = "6502 assembler for C64 machine code", help_template = HELP_TEMPLATE)]
struct Args {
    /// Assembly source file (built-in demo program when omitted)
    input: Option<PathBuf>,

    /// Write the raw image to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a listing to this file (`-` for stdout)
    #[arg(short, long, value_name = "FILE")]
    listing: Option<String>,

    /// Leave addresses out of the listing
    #[arg(long)]
    no_address: bool,

    /// Leave source text out of the listing
    #[arg(long)]
    no_source: bool,

    /// Plain hex rows instead of one line per source line
    #[arg(long)]
    raw: bool,

    /// Bytes per row with `--raw`
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    bytes_per_row: u16,

    /// Treat a label defined twice as an error
    #[arg(long)]
    strict_labels: bool,

    /// Print the decoded image
    #[arg(short, long)]
    disassemble: bool,

    /// Print label addresses
    #[arg(short, long)]
    symbols: bool,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

impl Args {
    fn options(&self) -> AssemblerOptions {
        AssemblerOptions {
            label_policy: if self.strict_labels { LabelPolicy::Reject } else { LabelPolicy::Overwrite },
        }
    }

    fn listing_format(&self) -> ListingFormat {
        ListingFormat {
            include_address: !self.no_address,
            match_source_code: !self.raw,
            include_source_code: !self.no_source,
            max_bytes_per_row: self.bytes_per_row as usize,
        }
    }

    /// Nothing asked for explicitly: show the listing.
    fn wants_default_listing(&self) -> bool {
        self.output.is_none() && self.listing.is_none() && !self.disassemble && !self.symbols
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ceprintln!("<red,bold>error</>: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the source did not assemble.
fn run(args: &Args) -> anyhow::Result<bool> {
    let (name, source) = match &args.input {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            (path.display().to_string(), source)
        }
        None => ("<demo>".to_string(), DEMO.to_string()),
    };

    let assembler = Assembler::with_options(InstructionTable::shared(), args.options());
    let image = match assembler.assemble(&source) {
        Ok(image) => image,
        Err(diags) => {
            print_diagnostics(&diags, &name, &source);
            return Ok(false);
        }
    };
    tracing::info!(file = %name, bytes = image.len(), "assembled");

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        let mut w = BufWriter::new(file);
        image.write_bin(&mut w)?;
        w.flush()
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    match args.listing.as_deref() {
        Some("-") => print_listing(&image, &args.listing_format())?,
        Some(path) => write_listing_file(&image, &args.listing_format(), path)?,
        None if args.wants_default_listing() => print_listing(&image, &args.listing_format())?,
        None => {}
    }

    if args.symbols {
        for (label, address) in &image.labels {
            cprintln!("<blue>${:04X}</> {}", address, label);
        }
    }

    if args.disassemble {
        for decoded in disassemble(InstructionTable::shared(), &image.bytes, image.start_address) {
            let hex: Vec<String> = decoded.bytes.iter().map(|b| format!("{b:02X}")).collect();
            println!("{:04X}  {:<9} {}", decoded.address, hex.join(" "), decoded);
        }
    }

    Ok(true)
}

fn print_listing(image: &AssemblyImage, format: &ListingFormat) -> anyhow::Result<()> {
    let mut text = image.listing(format);
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    io::stdout().lock().write_all(text.as_bytes())?;
    Ok(())
}

fn write_listing_file(image: &AssemblyImage, format: &ListingFormat, path: &str) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create file: {path}"))?;
    let mut w = BufWriter::new(file);
    image.write_listing(format, &mut w)?;
    w.flush().with_context(|| format!("Failed to write file: {path}"))?;
    Ok(())
}

/// Prints each diagnostic with its file location and the offending source line.
fn print_diagnostics(diags: &Diagnostics, name: &str, source: &str) {
    for err in diags.errors() {
        ceprintln!("<red,bold>error</>: {}", err);
        let Some(row) = err.row() else { continue };
        ceprintln!("     <blue>--></> <underline>{}:{}</>", name, row);
        ceprintln!("      <blue>|</>");
        let line = source.lines().nth(row.saturating_sub(1)).unwrap_or("");
        ceprintln!(" <blue>{:>4} |</> {}", row, line);
        ceprintln!("      <blue>|</>");
    }
}
