use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use ripeq::lens::render::{
    render_records, write_output, OutputSink, RenderOptions, DEFAULT_SEPARATOR,
};
use ripeq::lens::rows::RowOptions;
use ripeq::lens::search::{SearchArgs, SearchLens, SearchProgress, SearchProgressCallback};
use ripeq::lens::utils::{parse_field_list, OutputFormat, PlainStyle, NO_RECORDS_MESSAGE};
use ripeq::RipeqConfig;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the registry search
#[derive(Args)]
pub struct SearchCmdArgs {
    /// The search string to use for the RIPE API query
    #[clap(short, long)]
    pub query: String,

    /// Comma-separated list of fields to extract and include in the output.
    /// Available fields include: inetnum, netname, person, admin-c, descr, country, status, etc.
    #[clap(short, long)]
    pub filter: Option<String>,

    /// Separator string for grepable and plain formats
    #[clap(short, long, default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Output file path
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[clap(short = 't', long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output_type: OutputFormat,

    /// Output results as a table
    #[clap(short = 'T', long)]
    pub table: bool,

    /// Output results in a grepable format
    #[clap(short, long)]
    pub grepable: bool,

    /// Convert subnet ranges to CIDR notation
    #[clap(short, long)]
    pub cidr: bool,

    /// Remove duplicate entries from the output
    #[clap(short, long)]
    pub unique: bool,
}

pub fn run(config: &RipeqConfig, args: SearchCmdArgs) {
    let SearchCmdArgs {
        query,
        filter,
        separator,
        output,
        output_type,
        table,
        grepable,
        cidr,
        unique,
    } = args;

    let fields = filter.as_deref().and_then(parse_field_list);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} pages")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let pb_for_updates = pb.clone();
    let callback: SearchProgressCallback = Arc::new(move |progress: SearchProgress| {
        let pb = &pb_for_updates;
        match progress {
            SearchProgress::TotalFound { total, pages } => {
                pb.suspend(|| eprintln!("Total results found: {}", total));
                pb.set_length(pages);
            }
            SearchProgress::PageStarted { start } => {
                pb.suspend(|| eprintln!("Fetching results starting from {}...", start));
            }
            SearchProgress::PageCompleted { .. } => pb.inc(1),
            SearchProgress::PageFailed { start, .. } => {
                pb.suspend(|| eprintln!("Failed to fetch results for start={}.", start));
                pb.inc(1);
            }
            SearchProgress::Completed { .. } => pb.finish_and_clear(),
        }
    });

    let lens = SearchLens::new(config);
    let search_args = SearchArgs::new(query.as_str()).with_fields(fields.clone());
    let records = match lens.search_with_progress(&search_args, Some(callback)) {
        Ok(records) => records,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Failed to retrieve initial response.");
            eprintln!("ERROR: {:#}", e);
            std::process::exit(1);
        }
    };

    let fields_selected = fields.is_some();
    let row_options = RowOptions::new(fields).with_cidr(cidr).with_unique(unique);
    let render_options = RenderOptions::new(output_type)
        .with_style(PlainStyle::from_flags(table, grepable))
        .with_separator(separator.as_str())
        .with_fields_selected(fields_selected);

    let text = match render_records(&records, &row_options, &render_options) {
        Ok(Some(text)) => text,
        Ok(None) => {
            eprintln!("{}", NO_RECORDS_MESSAGE);
            return;
        }
        Err(e) => {
            eprintln!("ERROR: unable to render output: {:#}", e);
            std::process::exit(1);
        }
    };

    let sink = OutputSink::from_path(output);
    match (write_output(&text, &sink), &sink) {
        (Ok(()), OutputSink::File(path)) => {
            eprintln!("Output written to {}", path.display());
        }
        (Ok(()), OutputSink::Console) => {}
        (Err(e), OutputSink::File(path)) => {
            eprintln!("Failed to write to file {}: {:#}", path.display(), e);
        }
        (Err(e), OutputSink::Console) => {
            let broken_pipe = e
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io| io.kind() == std::io::ErrorKind::BrokenPipe);
            if !broken_pipe {
                eprintln!("{e}");
            }
        }
    }
}
