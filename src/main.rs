use std::path::PathBuf;

use clap::{ArgAction, Parser};
use miette::{bail, IntoDiagnostic, Result};

use weatherman::{
    daily_readings, logger, monthly_averages, yearly_extremes, BarChart, ChartStyle, Layout,
    MonthlyReport, YearMonth, YearlyReport,
};

#[derive(Parser)]
/// Reports on monthly weather exports.
struct Args {
    /// Directory holding the monthly files, e.g. `Murree_weather_2004_Aug.txt`.
    dir: PathBuf,
    #[arg(short = 'e', value_name = "YEAR")]
    /// Highest and lowest temperature and most humid day of a year.
    yearly: Option<i32>,
    #[arg(short = 'a', value_name = "YEAR/MONTH")]
    /// Average highest and lowest temperature and mean humidity of a month.
    monthly: Option<YearMonth>,
    #[arg(short = 'c', value_name = "YEAR/MONTH")]
    /// One bar per day, from the lowest to the highest temperature.
    chart: Option<YearMonth>,
    #[arg(long, value_enum, default_value_t)]
    /// How the columns of the files are found.
    layout: Layout,
    #[arg(long)]
    /// Draw the bar chart without colors.
    plain: bool,
    #[arg(short, long, action = ArgAction::Count)]
    /// Show debug logs, twice for trace logs.
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose).into_diagnostic()?;

    if args.yearly.is_none() && args.monthly.is_none() && args.chart.is_none() {
        bail!("Nothing to report, pass at least one of -e, -a or -c");
    }

    if let Some(year) = args.yearly {
        println!("\n----Yearly Report----\n");
        let extremes = yearly_extremes(&args.dir, year, args.layout)?;
        print!("{}", YearlyReport(&extremes));
    }

    if let Some(period) = args.monthly {
        println!("\n----Monthly Report----\n");
        println!("{period}");
        let averages = monthly_averages(&args.dir, period, args.layout)?;
        print!("{}", MonthlyReport(&averages));
    }

    if let Some(period) = args.chart {
        println!("\n----Bar Chart Report----\n");
        println!("{period}");
        let style = if args.plain {
            ChartStyle::PLAIN
        } else {
            ChartStyle::ANSI
        };
        let readings = daily_readings(&args.dir, period, args.layout)?;
        print!("{}", BarChart::new(&readings, style));
    }

    Ok(())
}
