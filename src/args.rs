use clap::Parser;

/// Finds how your representatives voted on the bills and issues that matter to you.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The configuration file: vote sources, representatives and issue definitions.
    /// For more information about the file format, read the documentation in the manual.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path or empty) The file containing the vote records. Setting this option overrides the
    /// vote sources of the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv, json or excel) The type of the input. By default, it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path) The list of representatives in JSON format, as returned by the legislator lookup.
    #[clap(long, value_parser)]
    pub reps: Option<String>,

    /// (issue key) The issue to report on. It must be defined in the configuration file.
    #[clap(long, value_parser)]
    pub issue: Option<String>,

    /// (bill column, for example HB1_2025) The bill to report on.
    #[clap(long, value_parser)]
    pub bill: Option<String>,

    /// (district name) The district of the address. Representatives elected for another district are
    /// reported as floterial.
    #[clap(long, value_parser)]
    pub base_district: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided, repvotes will
    /// check that the output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. The first worksheet is used by default.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// Only lists the bill columns found in the vote records.
    #[clap(long, takes_value = false)]
    pub list_columns: bool,

    /// Adds the list of all the votes on record for each representative.
    #[clap(long, takes_value = false)]
    pub key_votes: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
