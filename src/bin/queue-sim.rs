use queue_sim::config::{self, Command, FormatArg, ReportArg, RunArgs};
use queue_sim::engine;
use queue_sim::error::Result;
use queue_sim::logging::init_logging;
use queue_sim::output::{
    render_timeline, Formatter, HumanFormatter, JsonFormatter, RunOutput, SummaryFormatter,
};
use queue_sim::report;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;
    match cli.command {
        Some(Command::ShowConfig(args)) => show_config(&args),
        Some(Command::Run(args)) => simulate(&args),
        None => simulate(&cli.run),
    }
}

fn show_config(args: &RunArgs) -> Result<()> {
    let config = config::build_config(args)?;
    print!("{}", config::describe_config(&config));
    Ok(())
}

fn simulate(args: &RunArgs) -> Result<()> {
    init_logging(&args.log_level);
    let config = config::resolve_seed(config::build_config(args)?);
    let scenarios = config.scenarios();

    let output = if config.is_comparison() {
        RunOutput::Comparison(engine::run_comparison(&scenarios)?)
    } else {
        RunOutput::Single(engine::simulate(&scenarios[0])?)
    };

    let formatter = formatter_for(&args.format);
    print!("{}", formatter.write(&output));

    if args.viz && args.format != FormatArg::Json {
        if let RunOutput::Single(result) = &output {
            print!("{}", render_timeline(&result.timeline, args.duration));
        }
    }

    if args.report == ReportArg::Detailed {
        let path = match &output {
            RunOutput::Single(result) => report::write_detailed_report(result, &args.reports_dir)?,
            RunOutput::Comparison(stats) => {
                report::write_comparison_report(stats, &args.reports_dir)?
            }
        };
        if args.format == FormatArg::Json {
            eprintln!("Report saved to {}", path.display());
        } else {
            println!("Report saved to {}", path.display());
        }
    }

    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
