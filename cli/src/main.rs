//! latent-grid CLI - inspect and navigate extracted tables

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use regex::RegexBuilder;

use latent_grid::client::{BaseRequest, PdfRequest, TableExtractor};
use latent_grid::{
    parse_image_reader, parse_pdf_reader, Cell, Direction, LinkOptions, Matching, TableAccess,
};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "latent-grid")]
#[command(version)]
#[command(about = "Inspect and navigate tables returned by the extraction service", long_about = None)]
struct Cli {
    /// Skip malformed tables instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Saved JSON response from the extraction service
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// The file holds a PDF response (tables carry page numbers)
    #[arg(long)]
    pdf: bool,
}

#[derive(Args)]
struct Remote {
    /// URL of the document to process
    #[arg(value_name = "URL")]
    url: String,

    /// Extraction server base URL
    #[arg(long, env = "LATENT_GRID_URL", default_value = "http://localhost:8000")]
    server: String,

    /// Detect rows without explicit separators
    #[arg(long)]
    implicit_rows: bool,

    /// Detect columns without explicit separators
    #[arg(long)]
    implicit_columns: bool,

    /// Detect tables without borders
    #[arg(long)]
    borderless: bool,

    /// Minimum OCR confidence (0-99)
    #[arg(long, default_value = "50")]
    min_confidence: u8,

    /// Correct page rotation before detection
    #[arg(long)]
    detect_rotation: bool,
}

impl Remote {
    fn request(&self) -> BaseRequest {
        BaseRequest::new(&self.url)
            .with_implicit_rows(self.implicit_rows)
            .with_implicit_columns(self.implicit_columns)
            .with_borderless_tables(self.borderless)
            .with_min_confidence(self.min_confidence)
            .with_detect_rotation(self.detect_rotation)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of every table in a response
    Info {
        #[command(flatten)]
        source: Source,
    },

    /// Print tables as tab-separated text
    Text {
        #[command(flatten)]
        source: Source,

        /// Only print this table (0-indexed)
        #[arg(short, long)]
        table: Option<usize>,
    },

    /// Show a cell with its span and neighbors
    Cell {
        #[command(flatten)]
        source: Source,

        /// Table index (0-indexed)
        #[arg(short, long, default_value = "0")]
        table: usize,

        /// Grid row
        #[arg(long)]
        row: usize,

        /// Grid column
        #[arg(long)]
        col: usize,
    },

    /// Find cells by content
    Find {
        #[command(flatten)]
        source: Source,

        /// Text to search for
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Treat the pattern as a regular expression
        #[arg(long)]
        regex: bool,

        /// Match case-insensitively
        #[arg(short = 'i', long)]
        ignore_case: bool,
    },

    /// Extract tables from an image through a running server
    Image {
        #[command(flatten)]
        remote: Remote,
    },

    /// Extract tables from a PDF through a running server
    Pdf {
        #[command(flatten)]
        remote: Remote,

        /// Pages to process (e.g., "1,3,5")
        #[arg(long, value_delimiter = ',')]
        pages: Vec<u32>,

        /// Always OCR instead of using embedded PDF text
        #[arg(long)]
        no_text_extraction: bool,
    },

    /// Check that the server is up
    Health {
        /// Extraction server base URL
        #[arg(long, env = "LATENT_GRID_URL", default_value = "http://localhost:8000")]
        server: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = if cli.lenient {
        LinkOptions::new().lenient()
    } else {
        LinkOptions::new()
    };

    let result = match cli.command {
        Commands::Info { source } => cmd_info(&source, options),
        Commands::Text { source, table } => cmd_text(&source, options, table),
        Commands::Cell {
            source,
            table,
            row,
            col,
        } => cmd_cell(&source, options, table, row, col),
        Commands::Find {
            source,
            pattern,
            regex,
            ignore_case,
        } => cmd_find(&source, options, &pattern, regex, ignore_case),
        Commands::Image { remote } => cmd_image(&remote, options),
        Commands::Pdf {
            remote,
            pages,
            no_text_extraction,
        } => cmd_pdf(&remote, options, pages, no_text_extraction),
        Commands::Health { server } => cmd_health(&server),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(source: &Source, options: LinkOptions) -> Result<Vec<Box<dyn TableAccess>>, Box<dyn Error>> {
    let reader = BufReader::new(File::open(&source.input)?);
    log::debug!("Loading {} (pdf: {})", source.input.display(), source.pdf);

    let tables: Vec<Box<dyn TableAccess>> = if source.pdf {
        parse_pdf_reader(reader, options)?
            .into_iter()
            .map(|t| Box::new(t) as Box<dyn TableAccess>)
            .collect()
    } else {
        parse_image_reader(reader, options)?
            .into_iter()
            .map(|t| Box::new(t) as Box<dyn TableAccess>)
            .collect()
    };
    Ok(tables)
}

fn select(tables: &[Box<dyn TableAccess>], index: usize) -> Result<&dyn TableAccess, Box<dyn Error>> {
    tables
        .get(index)
        .map(|t| t.as_ref())
        .ok_or_else(|| format!("Table {} not found (response has {} tables)", index, tables.len()).into())
}

fn heading(index: usize, table: &dyn TableAccess) -> String {
    match table.page() {
        Some(page) => format!("Table {} (page {})", index, page),
        None => format!("Table {}", index),
    }
}

fn describe(cell: &Cell<'_>) -> String {
    let mut line = format!("#{} {:?}", cell.index(), cell.content().unwrap_or(""));
    if let Some(anchor) = cell.anchor() {
        line.push_str(&format!(" at {}", anchor));
    }
    line
}

fn print_info(index: usize, table: &dyn TableAccess) {
    let grid = table.table();
    let bbox = table.bbox();
    let merged = grid.cells().filter(|c| c.is_merged()).count();

    println!("{}", heading(index, table).cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if let Some(title) = table.title() {
        println!("{}: {}", "Title".bold(), title);
    }
    println!(
        "{}: ({}, {}) - ({}, {})",
        "Box".bold(),
        bbox.x1,
        bbox.y1,
        bbox.x2,
        bbox.y2
    );
    println!(
        "{}: {} rows x {} columns",
        "Grid".bold(),
        grid.row_count(),
        grid.column_count()
    );
    println!("{}: {} ({} merged)", "Cells".bold(), grid.cell_count(), merged);
    println!();
}

fn cmd_info(source: &Source, options: LinkOptions) -> CliResult {
    let tables = load(source, options)?;

    println!("{}: {}", "File".bold(), source.input.display());
    println!("{}: {}", "Tables".bold(), tables.len());
    println!();

    for (index, table) in tables.iter().enumerate() {
        print_info(index, table.as_ref());
    }

    Ok(())
}

fn cmd_text(source: &Source, options: LinkOptions, only: Option<usize>) -> CliResult {
    let tables = load(source, options)?;

    let selected: Vec<(usize, &dyn TableAccess)> = match only {
        Some(index) => vec![(index, select(&tables, index)?)],
        None => tables.iter().map(|t| t.as_ref()).enumerate().collect(),
    };

    for (index, table) in selected {
        println!("{}", heading(index, table).cyan().bold());
        println!("{}", table.table().plain_text());
        println!();
    }

    Ok(())
}

fn cmd_cell(source: &Source, options: LinkOptions, index: usize, row: usize, col: usize) -> CliResult {
    let tables = load(source, options)?;
    let table = select(&tables, index)?;

    let cell = table
        .get_cell(row, col)
        .ok_or_else(|| format!("No cell at ({}, {}) in table {}", row, col, index))?;

    println!("{}", describe(&cell).cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {}",
        "Content".bold(),
        cell.content().unwrap_or("(empty)")
    );
    let positions: Vec<String> = cell.positions().iter().map(ToString::to_string).collect();
    println!("{}: {}", "Positions".bold(), positions.join(" "));
    println!(
        "{}: {} row(s) x {} column(s)",
        "Span".bold(),
        cell.rowspan(),
        cell.colspan()
    );

    for direction in Direction::ALL {
        let neighbors = cell.neighbors(direction);
        let label = format!("{:?}", direction);
        if neighbors.is_empty() {
            println!("{}: {}", label.bold(), "none".dimmed());
        } else {
            let described: Vec<String> = neighbors.iter().map(describe).collect();
            println!("{}: {}", label.bold(), described.join(", "));
        }
    }

    Ok(())
}

fn cmd_find(
    source: &Source,
    options: LinkOptions,
    pattern: &str,
    regex: bool,
    ignore_case: bool,
) -> CliResult {
    let tables = load(source, options)?;

    let compiled = if regex {
        Some(
            RegexBuilder::new(pattern)
                .case_insensitive(ignore_case)
                .build()?,
        )
    } else {
        None
    };
    let needle = pattern.to_lowercase();

    let mut total = 0;
    for (index, table) in tables.iter().enumerate() {
        let grid = table.table();
        let found = match &compiled {
            Some(re) => grid.find_cells_by_content(re),
            None if ignore_case => {
                grid.find_cells_by_content(Matching(|s: &str| s.to_lowercase().contains(&needle)))
            }
            None => grid.find_cells_by_content(pattern),
        };

        for cell in &found {
            println!("{}: {}", heading(index, table.as_ref()).dimmed(), describe(cell));
        }
        total += found.len();
    }

    println!("\n{} {} matching cells", "Done!".green().bold(), total);

    Ok(())
}

fn extractor(server: &str, options: LinkOptions) -> Result<TableExtractor, Box<dyn Error>> {
    Ok(TableExtractor::new(server)?.with_link_options(options))
}

fn cmd_image(remote: &Remote, options: LinkOptions) -> CliResult {
    println!("{} {}", "Processing".cyan(), remote.url);
    let tables = extractor(&remote.server, options)?.process_image(&remote.request())?;

    for (index, table) in tables.iter().enumerate() {
        print_info(index, table);
    }
    println!("{} {} tables extracted", "Done!".green().bold(), tables.len());

    Ok(())
}

fn cmd_pdf(remote: &Remote, options: LinkOptions, pages: Vec<u32>, no_text_extraction: bool) -> CliResult {
    let mut request = PdfRequest::from_base(remote.request()).with_text_extraction(!no_text_extraction);
    if !pages.is_empty() {
        request = request.with_pages(pages);
    }

    println!("{} {}", "Processing".cyan(), remote.url);
    let tables = extractor(&remote.server, options)?.process_pdf(&request)?;

    for (index, table) in tables.iter().enumerate() {
        print_info(index, table);
    }
    println!("{} {} tables extracted", "Done!".green().bold(), tables.len());

    Ok(())
}

fn cmd_health(server: &str) -> CliResult {
    let healthy = TableExtractor::new(server)?.health()?;
    if healthy {
        println!("{} {}", "OK".green().bold(), server);
        Ok(())
    } else {
        Err(format!("{} is not healthy", server).into())
    }
}
